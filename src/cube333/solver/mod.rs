//! Solvers that search for a move sequence bringing a cube back to solved.
//!
//! [`IdaStarSolver`] is the one to use. [`IddfsSolver`] and [`BfsSolver`] search without a
//! heuristic and are only practical for short scrambles, they exist to compare against.

mod bfs;
mod ida;
mod iddfs;

pub use bfs::BfsSolver;
pub use ida::IdaStarSolver;
pub use iddfs::IddfsSolver;

use super::moves::Move333;
use super::pattern_db::PatternDatabase;
use super::CubieCube;
use crate::error::SolveError;
use crate::moves::{Move, MoveSequence};

/// Solve `cube` with IDA* and the default threshold limit.
pub fn solve(
    cube: &CubieCube,
    db: &PatternDatabase,
) -> Result<MoveSequence<Move333>, SolveError> {
    IdaStarSolver::new(db).solve(cube)
}

/// Whether `next` can be skipped after `prev` without losing any optimal solution. Turning the
/// same face twice in a row is never optimal, and of two turns on opposite faces only one order
/// needs searching since they commute.
fn redundant(prev: Option<Move333>, next: Move333) -> bool {
    match prev {
        None => false,
        Some(prev) => {
            prev.same_generator(&next) || (prev.commutes_with(&next) && prev.ty > next.ty)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube333::moves::{Htm, Move333Type, MoveGenerator};
    use crate::mv;

    #[test]
    fn pruning_rules() {
        assert!(!redundant(None, mv!(R, 1)));
        assert!(redundant(Some(mv!(R, 1)), mv!(R, 3)));
        assert!(redundant(Some(mv!(U, 2)), mv!(U, 2)));
        assert!(!redundant(Some(mv!(R, 1)), mv!(L, 1)));
        assert!(redundant(Some(mv!(L, 1)), mv!(R, 1)));
        assert!(!redundant(Some(mv!(R, 1)), mv!(U, 1)));
    }

    #[test]
    fn branching_factor() {
        // 15 successors after R, U or F, and 12 after L, D or B
        let after = |prev: Move333| {
            Htm::MOVE_LIST
                .iter()
                .filter(|&&m| !redundant(Some(prev), m))
                .count()
        };
        assert_eq!(after(mv!(R, 1)), 15);
        assert_eq!(after(mv!(L, 1)), 12);
        assert_eq!(after(mv!(F, 2)), 15);
        assert_eq!(after(mv!(B, 3)), 12);
    }
}
