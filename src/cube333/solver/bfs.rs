use crate::cube333::moves::{Htm, Move333, MoveGenerator};
use crate::cube333::CubieCube;
use crate::error::SolveError;
use crate::moves::{Move, MoveSequence};

use log::{debug, info};
use rustc_hash::FxHashMap;

use std::time::Instant;

/// Breadth first search over whole cube states. Every state reached is remembered along with the
/// move that first reached it, so memory grows by roughly a factor of 13 per layer and only a
/// handful of layers are practical.
pub struct BfsSolver {
    max_depth: u8,
}

impl BfsSolver {
    /// A solver that expands at most `max_depth` layers.
    pub fn new(max_depth: u8) -> Self {
        Self { max_depth }
    }

    /// Find a shortest sequence of moves that solves `cube`.
    pub fn solve(&self, cube: &CubieCube) -> Result<MoveSequence<Move333>, SolveError> {
        cube.validate()?;
        if cube.is_solved() {
            return Ok(MoveSequence::default());
        }

        let start = Instant::now();
        let mut parents: FxHashMap<CubieCube, Move333> = FxHashMap::default();
        let mut frontier = vec![cube.clone()];

        for depth in 1..=self.max_depth {
            let mut next = Vec::new();
            for state in &frontier {
                for &m in Htm::MOVE_LIST {
                    let child = state.clone().make_move(m);
                    if child == *cube || parents.contains_key(&child) {
                        continue;
                    }
                    parents.insert(child.clone(), m);
                    if child.is_solved() {
                        let path = walk_back(&parents, cube, child);
                        info!(
                            "found a {} move solution after {} states in {:.3}s",
                            path.len(),
                            parents.len(),
                            start.elapsed().as_secs_f64()
                        );
                        return Ok(path);
                    }
                    next.push(child);
                }
            }

            debug!(
                "depth {depth}: {} new states, {} seen",
                next.len(),
                parents.len()
            );
            if next.is_empty() {
                return Err(SolveError::Exhausted);
            }
            frontier = next;
        }

        Err(SolveError::NotFoundWithinLimit {
            limit: self.max_depth,
        })
    }
}

/// Follow the recorded moves from `end` back to `start`.
fn walk_back(
    parents: &FxHashMap<CubieCube, Move333>,
    start: &CubieCube,
    mut end: CubieCube,
) -> MoveSequence<Move333> {
    let mut path = Vec::new();
    while end != *start {
        let Some(&m) = parents.get(&end) else {
            unreachable!("every state but the start has a parent");
        };
        path.push(m);
        end = end.make_move(m.inverse());
    }
    path.reverse();
    MoveSequence(path)
}
