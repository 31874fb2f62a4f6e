use super::redundant;
use crate::cube333::moves::{Htm, Move333, MoveGenerator};
use crate::cube333::pattern_db::PatternDatabase;
use crate::cube333::CubieCube;
use crate::error::SolveError;
use crate::moves::MoveSequence;

use log::{debug, info};

use std::time::Instant;

/// Result of one bounded depth first pass.
enum Probe {
    Found,
    /// Smallest `g + h` that went over the threshold, the next threshold to try.
    Exceeded(u8),
    /// Every branch ended without exceeding the threshold or reaching solved.
    Exhausted,
}

/// Iterative deepening A*, with the corner pattern database as heuristic.
///
/// Each iteration is a depth first search that cuts off any node whose cost so far plus its
/// heuristic value exceeds the current threshold. The next threshold is the smallest value that
/// was cut off. Since the heuristic never overestimates, the first solution found is optimal in
/// the half turn metric.
pub struct IdaStarSolver<'a> {
    db: &'a PatternDatabase,
    max_threshold: u8,
}

struct Search<'a> {
    db: &'a PatternDatabase,
    threshold: u8,
    path: Vec<Move333>,
    nodes: u64,
}

impl<'a> IdaStarSolver<'a> {
    /// Threshold after which [`IdaStarSolver::solve`] gives up, God's number by default.
    pub const DEFAULT_MAX_THRESHOLD: u8 = 20;

    /// A solver using `db` for its heuristic.
    pub fn new(db: &'a PatternDatabase) -> Self {
        Self {
            db,
            max_threshold: Self::DEFAULT_MAX_THRESHOLD,
        }
    }

    /// Give up once the threshold would go above `max_threshold`.
    #[must_use]
    pub fn with_max_threshold(mut self, max_threshold: u8) -> Self {
        self.max_threshold = max_threshold;
        self
    }

    /// Find a shortest sequence of moves that solves `cube`.
    pub fn solve(&self, cube: &CubieCube) -> Result<MoveSequence<Move333>, SolveError> {
        cube.validate()?;

        let start = Instant::now();
        let mut search = Search {
            db: self.db,
            threshold: self.db.heuristic(cube),
            path: Vec::new(),
            nodes: 0,
        };
        info!("starting IDA* with threshold {}", search.threshold);

        loop {
            if search.threshold > self.max_threshold {
                info!(
                    "gave up after {:.3}s, threshold {} is above {}",
                    start.elapsed().as_secs_f64(),
                    search.threshold,
                    self.max_threshold
                );
                return Err(SolveError::NotFoundWithinLimit {
                    limit: self.max_threshold,
                });
            }

            let iteration_start = Instant::now();
            search.nodes = 0;
            let probe = search.probe(cube, 0);
            debug!(
                "threshold {}: traversed {} nodes in {:.3}s",
                search.threshold,
                search.nodes,
                iteration_start.elapsed().as_secs_f64()
            );

            match probe {
                Probe::Found => {
                    info!(
                        "found a {} move solution in {:.3}s",
                        search.path.len(),
                        start.elapsed().as_secs_f64()
                    );
                    return Ok(MoveSequence(search.path));
                }
                Probe::Exceeded(next) => search.threshold = next,
                Probe::Exhausted => return Err(SolveError::Exhausted),
            }
        }
    }
}

impl Search<'_> {
    fn probe(&mut self, cube: &CubieCube, g: u8) -> Probe {
        self.nodes += 1;
        if cube.is_solved() {
            return Probe::Found;
        }

        let mut min_exceeded: Option<u8> = None;
        for &m in Htm::MOVE_LIST {
            if redundant(self.path.last().copied(), m) {
                continue;
            }

            let child = cube.clone().make_move(m);
            let f = g.saturating_add(1).saturating_add(self.db.heuristic(&child));
            if f > self.threshold {
                min_exceeded = Some(min_exceeded.map_or(f, |min| min.min(f)));
                continue;
            }

            self.path.push(m);
            match self.probe(&child, g + 1) {
                Probe::Found => return Probe::Found,
                Probe::Exceeded(f) => min_exceeded = Some(min_exceeded.map_or(f, |min| min.min(f))),
                Probe::Exhausted => {}
            }
            self.path.pop();
        }

        match min_exceeded {
            Some(f) => Probe::Exceeded(f),
            None => Probe::Exhausted,
        }
    }
}
