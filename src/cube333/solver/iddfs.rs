use super::redundant;
use crate::cube333::moves::{Htm, Move333, MoveGenerator};
use crate::cube333::CubieCube;
use crate::error::SolveError;
use crate::moves::MoveSequence;

use log::{debug, info};

use std::time::Instant;

/// Iterative deepening depth first search without a heuristic. Runs a depth limited search for
/// every limit from 0 up to `max_depth`, so the first solution is a shortest one.
pub struct IddfsSolver {
    max_depth: u8,
}

impl IddfsSolver {
    /// A solver that tries solutions of up to `max_depth` moves.
    pub fn new(max_depth: u8) -> Self {
        Self { max_depth }
    }

    /// Find a shortest sequence of moves that solves `cube`.
    pub fn solve(&self, cube: &CubieCube) -> Result<MoveSequence<Move333>, SolveError> {
        cube.validate()?;

        let start = Instant::now();
        let mut path = Vec::new();
        for limit in 0..=self.max_depth {
            let depth_start = Instant::now();
            let mut nodes = 0;
            let found = dfs(cube, limit, &mut path, &mut nodes);
            debug!(
                "depth {limit}: traversed {nodes} nodes in {:.3}s",
                depth_start.elapsed().as_secs_f64()
            );
            if found {
                info!(
                    "found a {} move solution in {:.3}s",
                    path.len(),
                    start.elapsed().as_secs_f64()
                );
                return Ok(MoveSequence(path));
            }
        }

        Err(SolveError::NotFoundWithinLimit {
            limit: self.max_depth,
        })
    }
}

fn dfs(cube: &CubieCube, remaining: u8, path: &mut Vec<Move333>, nodes: &mut u64) -> bool {
    *nodes += 1;
    if cube.is_solved() {
        return true;
    }
    if remaining == 0 {
        return false;
    }

    for &m in Htm::MOVE_LIST {
        if redundant(path.last().copied(), m) {
            continue;
        }
        path.push(m);
        if dfs(&cube.clone().make_move(m), remaining - 1, path, nodes) {
            return true;
        }
        path.pop();
    }
    false
}
