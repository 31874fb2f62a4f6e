//! Move tables for the corner coordinates

use crate::coord::Coordinate;
use crate::cube333::moves::{Htm, Move333, MoveGenerator};
use crate::cube333::CubieCube;
use crate::moves::MoveSequence;

/// A move table, which stores mappings of coordinate + move pairs to the coordinate that results
/// from applying the move. Rows are indexed by coordinate, columns by `usize::from(Move333)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MoveTable<C: Coordinate<CubieCube>> {
    table: Box<[[C; Htm::SIZE]]>,
}

impl<C: Coordinate<CubieCube>> MoveTable<C> {
    /// Generate a move table. Every coordinate is visited through a full `CubieCube` that
    /// projects onto it, each move is applied to that cube and the result projected again, so
    /// the table agrees with `CubieCube::make_move` by construction.
    pub fn generate() -> Self {
        let mut visited = vec![false; C::count()];
        let mut stack = vec![CubieCube::SOLVED];
        visited[C::from_puzzle(&CubieCube::SOLVED).repr()] = true;

        let mut table: Box<[[C; Htm::SIZE]]> =
            vec![std::array::from_fn(|_| Default::default()); C::count()].into_boxed_slice();

        while let Some(cur_cube) = stack.pop() {
            let c = C::from_puzzle(&cur_cube);
            for &mv in Htm::MOVE_LIST {
                let next = cur_cube.clone().make_move(mv);
                let c2 = C::from_puzzle(&next);

                table[c.repr()][usize::from(mv)] = c2;

                if !visited[c2.repr()] {
                    visited[c2.repr()] = true;
                    stack.push(next);
                }
            }
        }

        debug_assert!(visited.into_iter().all(|b| b));

        Self { table }
    }

    /// Determine what coordinate comes from applying a move.
    pub fn make_move(&self, coord: C, mv: Move333) -> C {
        self.table[coord.repr()][usize::from(mv)]
    }

    /// Determine what coordinate comes from applying a sequence of moves.
    pub fn make_moves(&self, coord: C, alg: MoveSequence<Move333>) -> C {
        alg.0.into_iter().fold(coord, |c, m| self.make_move(c, m))
    }
}
