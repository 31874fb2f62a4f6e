//! Corner coordinates. The pattern database is keyed by [`CornerCoord`], which packs the corner
//! permutation and corner orientation of a cube into one integer.

use super::{Corner, CornerTwist, CubieCube};
use crate::coord::{Coordinate, FromCoordinate};

/// A coordinate representation of the corner orientation of a cube with respect to the U/D faces.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct COCoord(u16);

/// A coordinate representation of the corner permutation of a cube.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct CPCoord(u16);

/// Corner permutation and orientation together, `cp * 3^7 + co`. This determines the corners
/// completely, so it is a lossless encoding of the corner sub-group and a lossy one of the cube.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct CornerCoord(u32);

impl Coordinate<CubieCube> for COCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        COCoord(to_o_coord::<8, 3>(&puzzle.co.map(|n| n.into())))
    }

    fn count() -> usize {
        // 3^7
        2187
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        COCoord(n as u16)
    }
}

impl FromCoordinate<COCoord> for CubieCube {
    fn set_coord(&mut self, coord: COCoord) {
        let mut first = CornerTwist::Oriented;
        let mut n = coord.0;

        for i in (1..8).rev() {
            self.co[i] = match n % 3 {
                0 => CornerTwist::Oriented,
                1 => {
                    first = first.anticlockwise();
                    CornerTwist::Clockwise
                }
                2 => {
                    first = first.clockwise();
                    CornerTwist::AntiClockwise
                }
                _ => unreachable!(),
            };
            n /= 3;
        }

        self.co[0] = first;
    }
}

impl Coordinate<CubieCube> for CPCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        CPCoord(to_p_coord::<8>(&puzzle.cp.map(|n| n.into())) as u16)
    }

    fn count() -> usize {
        // 8!
        40320
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        CPCoord(n as u16)
    }
}

impl FromCoordinate<CPCoord> for CubieCube {
    fn set_coord(&mut self, coord: CPCoord) {
        let mut n = coord.0 as usize;
        let mut greater = [0; 8];
        for (i, g) in greater.iter_mut().enumerate().skip(1) {
            *g = n % (i + 1);
            n /= i + 1;
        }

        // Walk backwards picking, among the corners not placed yet, the one with exactly
        // `greater[i]` larger corners left over.
        let mut remaining = Corner::ARRAY.to_vec();
        for i in (0..8).rev() {
            self.cp[i] = remaining.remove(i - greater[i]);
        }
    }
}

impl CornerCoord {
    /// Combine a permutation and an orientation coordinate.
    pub fn from_parts(cp: CPCoord, co: COCoord) -> Self {
        CornerCoord(cp.0 as u32 * COCoord::count() as u32 + co.0 as u32)
    }

    /// The permutation part.
    pub fn cp(self) -> CPCoord {
        CPCoord((self.0 / COCoord::count() as u32) as u16)
    }

    /// The orientation part.
    pub fn co(self) -> COCoord {
        COCoord((self.0 % COCoord::count() as u32) as u16)
    }
}

impl Coordinate<CubieCube> for CornerCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        Self::from_parts(CPCoord::from_puzzle(puzzle), COCoord::from_puzzle(puzzle))
    }

    fn count() -> usize {
        // 8! * 3^7
        88179840
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        CornerCoord(n as u32)
    }
}

impl FromCoordinate<CornerCoord> for CubieCube {
    fn set_coord(&mut self, coord: CornerCoord) {
        self.set_coord(coord.cp());
        self.set_coord(coord.co());
    }
}

fn to_o_coord<const COUNT: usize, const STATES: u16>(arr: &[u8; COUNT]) -> u16 {
    arr.iter()
        .skip(1)
        .fold(0, |acc, &i| (acc * STATES) + i as u16)
}

// Lehmer code: digit `idx` counts the earlier entries that are larger than `arr[idx]`, and has
// base `idx + 1`.
fn to_p_coord<const COUNT: usize>(arr: &[u8; COUNT]) -> u32 {
    (1..COUNT).rev().fold(0, |acc, idx| {
        (acc * (idx + 1) as u32) + arr[0..idx].iter().filter(|&&x| x > arr[idx]).count() as u32
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube333::moves::{Move333, Move333Type};
    use crate::cube333::{Edge, EdgeFlip};
    use crate::moves::MoveSequence;
    use crate::mv;

    #[test]
    fn solved_is_zero() {
        assert!(CornerCoord::from_puzzle(&CubieCube::SOLVED).solved());
        assert!(!CornerCoord::from_puzzle(&CubieCube::SOLVED.make_move(mv!(R, 1))).solved());
        // U/D turns keep corner orientation
        let u = CubieCube::SOLVED.make_move(mv!(U, 1));
        assert!(COCoord::from_puzzle(&u).solved());
        assert!(!CPCoord::from_puzzle(&u).solved());
    }

    #[test]
    fn ignores_edges() {
        let mut cube = CubieCube::SOLVED.make_move(mv!(F, 1));
        let key = CornerCoord::from_puzzle(&cube);
        cube.ep.swap(0, 1);
        cube.eo[5] = EdgeFlip::Flipped;
        cube.ep[11] = Edge::BR;
        assert_eq!(CornerCoord::from_puzzle(&cube), key);
    }

    #[test]
    fn largest_permutation() {
        let mut cube = CubieCube::SOLVED;
        cube.cp.reverse();
        assert_eq!(CPCoord::from_puzzle(&cube).repr(), CPCoord::count() - 1);
    }

    use proptest::collection::vec;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn convert_invertible_co(c in (0..2187u16).prop_map(COCoord)) {
            let mut cube = CubieCube::SOLVED;
            cube.set_coord(c);
            prop_assert_eq!(c, COCoord::from_puzzle(&cube));
            prop_assert_eq!(cube.co_parity(), CornerTwist::Oriented);
        }

        #[test]
        fn convert_invertible_cp(c in (0..40320u16).prop_map(CPCoord)) {
            let mut cube = CubieCube::SOLVED;
            cube.set_coord(c);
            prop_assert_eq!(c, CPCoord::from_puzzle(&cube));
        }

        #[test]
        fn corner_coord_of_random_state(mvs in vec(any::<Move333>(), 0..30).prop_map(MoveSequence)) {
            let state = CubieCube::SOLVED.make_moves(mvs);
            let key = CornerCoord::from_puzzle(&state);
            prop_assert!(key.repr() < CornerCoord::count());
            prop_assert_eq!(CornerCoord::from_parts(key.cp(), key.co()), key);

            let mut representative = CubieCube::SOLVED;
            representative.set_coord(key);
            prop_assert_eq!(representative.cp, state.cp);
            prop_assert_eq!(representative.co, state.co);
        }
    }
}
