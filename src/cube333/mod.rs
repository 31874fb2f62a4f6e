//! The 3x3x3 cube: cubie level state, moves, coordinates, the corner pattern database and the
//! solvers that work on top of them.

pub mod coordcube;
pub mod moves;
pub mod pattern_db;
pub mod solver;
pub mod sticker;

pub use sticker::StickerCube;

use crate::error::TryFromIntToEnumError;

use thiserror::Error;

/// A corner position (or the corner cubie that belongs there when solved).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Corner {
    UFR,
    UFL,
    UBL,
    UBR,
    DFR,
    DFL,
    DBL,
    DBR,
}

impl Corner {
    /// Every corner, in position order.
    pub const ARRAY: [Corner; 8] = [
        Corner::UFR,
        Corner::UFL,
        Corner::UBL,
        Corner::UBR,
        Corner::DFR,
        Corner::DFL,
        Corner::DBL,
        Corner::DBR,
    ];
}

/// An edge position (or the edge cubie that belongs there when solved).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Edge {
    UF,
    UL,
    UB,
    UR,
    DF,
    DL,
    DB,
    DR,
    FR,
    FL,
    BL,
    BR,
}

impl Edge {
    /// Every edge, in position order.
    pub const ARRAY: [Edge; 12] = [
        Edge::UF,
        Edge::UL,
        Edge::UB,
        Edge::UR,
        Edge::DF,
        Edge::DL,
        Edge::DB,
        Edge::DR,
        Edge::FR,
        Edge::FL,
        Edge::BL,
        Edge::BR,
    ];
}

/// Twist of a corner relative to its U/D sticker.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CornerTwist {
    /// The U/D sticker faces U/D.
    Oriented = 0,
    /// Twisted a third of a turn clockwise.
    Clockwise = 1,
    /// Twisted a third of a turn anticlockwise.
    AntiClockwise = 2,
}

impl CornerTwist {
    /// Reduce `n` modulo 3 into a twist.
    pub(crate) fn from_mod3(n: u8) -> Self {
        match n % 3 {
            0 => CornerTwist::Oriented,
            1 => CornerTwist::Clockwise,
            _ => CornerTwist::AntiClockwise,
        }
    }

    /// One more third of a turn clockwise.
    pub fn clockwise(self) -> Self {
        Self::from_mod3(self as u8 + 1)
    }

    /// One more third of a turn anticlockwise.
    pub fn anticlockwise(self) -> Self {
        Self::from_mod3(self as u8 + 2)
    }

    /// Compose two twists.
    pub fn twist_by(self, other: CornerTwist) -> Self {
        Self::from_mod3(self as u8 + other as u8)
    }

    /// The twist that undoes this one.
    pub fn inverse(self) -> Self {
        Self::from_mod3(3 - self as u8)
    }
}

/// Flip of an edge relative to its U/D sticker (F/B for E slice edges).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeFlip {
    /// The reference sticker is on its reference face.
    Oriented = 0,
    /// The edge is flipped in place.
    Flipped = 1,
}

impl EdgeFlip {
    /// Reduce `n` modulo 2 into a flip.
    pub(crate) fn from_mod2(n: u8) -> Self {
        if n % 2 == 0 {
            EdgeFlip::Oriented
        } else {
            EdgeFlip::Flipped
        }
    }

    /// Flip the edge.
    pub fn flip(self) -> Self {
        Self::from_mod2(self as u8 + 1)
    }

    /// Compose two flips.
    pub fn flip_by(self, other: EdgeFlip) -> Self {
        Self::from_mod2(self as u8 + other as u8)
    }
}

macro_rules! u8_enum_conversions {
    ($ty:ty, $array:expr) => {
        impl From<$ty> for u8 {
            fn from(v: $ty) -> u8 {
                v as u8
            }
        }

        impl TryFrom<u8> for $ty {
            type Error = TryFromIntToEnumError;

            fn try_from(n: u8) -> Result<Self, Self::Error> {
                $array
                    .get(n as usize)
                    .copied()
                    .ok_or(TryFromIntToEnumError::OutOfBounds)
            }
        }
    };
}

u8_enum_conversions!(Corner, Corner::ARRAY);
u8_enum_conversions!(Edge, Edge::ARRAY);
u8_enum_conversions!(
    CornerTwist,
    [
        CornerTwist::Oriented,
        CornerTwist::Clockwise,
        CornerTwist::AntiClockwise
    ]
);
u8_enum_conversions!(EdgeFlip, [EdgeFlip::Oriented, EdgeFlip::Flipped]);

/// A cube described by which cubie sits in each position and how it is oriented. Arrays are
/// indexed by position (`Corner as usize`, `Edge as usize`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubieCube {
    /// Corner orientations.
    pub co: [CornerTwist; 8],
    /// Corner permutation.
    pub cp: [Corner; 8],
    /// Edge orientations.
    pub eo: [EdgeFlip; 12],
    /// Edge permutation.
    pub ep: [Edge; 12],
}

impl Default for CubieCube {
    fn default() -> Self {
        Self::SOLVED
    }
}

/// Error for a `CubieCube` that cannot be reached from the solved state. Records which of the
/// invariants is broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("a cube was in an illegal state")]
pub struct IllegalCubeError {
    /// The edge flip coset we are in.
    pub eo: EdgeFlip,
    /// The corner twist coset we are in.
    pub co: CornerTwist,
    /// Whether we have permutation parity or not.
    pub perm: bool,
    /// Whether some cubie appears twice, so `cp` or `ep` is not a permutation at all.
    pub duplicates: bool,
}

impl CubieCube {
    /// The solved cube stored as a const.
    pub const SOLVED: Self = CubieCube {
        co: [CornerTwist::Oriented; 8],
        cp: Corner::ARRAY,
        eo: [EdgeFlip::Oriented; 12],
        ep: Edge::ARRAY,
    };

    /// Whether every cubie is home and oriented.
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// Total corner twist. Zero on any legal cube.
    pub fn co_parity(&self) -> CornerTwist {
        self.co
            .iter()
            .fold(CornerTwist::Oriented, |acc, &t| acc.twist_by(t))
    }

    /// Total edge flip. Zero on any legal cube.
    pub fn eo_parity(&self) -> EdgeFlip {
        self.eo
            .iter()
            .fold(EdgeFlip::Oriented, |acc, &f| acc.flip_by(f))
    }

    /// Whether corner and edge permutations have different parities. Always false on a legal
    /// cube since every face turn is a 4-cycle on both.
    pub fn perm_parity(&self) -> bool {
        odd_permutation(&self.cp.map(u8::from)) != odd_permutation(&self.ep.map(u8::from))
    }

    /// Whether some position holds a cubie that also sits somewhere else.
    pub fn has_duplicates(&self) -> bool {
        !is_permutation(&self.cp.map(u8::from)) || !is_permutation(&self.ep.map(u8::from))
    }

    /// Whether the cube is unreachable from solved.
    pub fn illegal(&self) -> bool {
        self.has_duplicates()
            || self.co_parity() != CornerTwist::Oriented
            || self.eo_parity() != EdgeFlip::Oriented
            || self.perm_parity()
    }

    /// Check that the cube can be reached from solved.
    pub fn validate(&self) -> Result<(), IllegalCubeError> {
        if self.illegal() {
            return Err(IllegalCubeError {
                eo: self.eo_parity(),
                co: self.co_parity(),
                perm: self.perm_parity(),
                duplicates: self.has_duplicates(),
            });
        }
        Ok(())
    }
}

fn is_permutation(perm: &[u8]) -> bool {
    let mut seen = 0u32;
    for &p in perm {
        if p as usize >= perm.len() || seen & (1 << p) != 0 {
            return false;
        }
        seen |= 1 << p;
    }
    true
}

fn odd_permutation(perm: &[u8]) -> bool {
    let mut inversions = 0;
    for i in 0..perm.len() {
        for j in i + 1..perm.len() {
            if perm[i] > perm[j] {
                inversions += 1;
            }
        }
    }
    inversions % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube333::moves::{Move333, Move333Type};
    use crate::mv;

    #[test]
    fn solved_is_solved() {
        assert!(CubieCube::SOLVED.is_solved());
        assert!(!CubieCube::SOLVED.make_move(mv!(F, 1)).is_solved());
        assert_eq!(CubieCube::default(), CubieCube::SOLVED);
    }

    #[test]
    fn twist_arithmetic() {
        use CornerTwist as CT;
        assert_eq!(CT::Oriented.clockwise(), CT::Clockwise);
        assert_eq!(CT::AntiClockwise.clockwise(), CT::Oriented);
        assert_eq!(CT::Oriented.anticlockwise(), CT::AntiClockwise);
        assert_eq!(CT::Clockwise.twist_by(CT::AntiClockwise), CT::Oriented);
        assert_eq!(CT::Clockwise.inverse(), CT::AntiClockwise);
        assert_eq!(CT::Oriented.inverse(), CT::Oriented);
        assert_eq!(EdgeFlip::Flipped.flip(), EdgeFlip::Oriented);
        assert_eq!(EdgeFlip::Flipped.flip_by(EdgeFlip::Flipped), EdgeFlip::Oriented);
    }

    #[test]
    fn enum_conversions() {
        assert_eq!(Corner::try_from(3).unwrap(), Corner::UBR);
        assert_eq!(Edge::try_from(11).unwrap(), Edge::BR);
        assert!(Corner::try_from(8).is_err());
        assert!(CornerTwist::try_from(3).is_err());
        assert_eq!(u8::from(EdgeFlip::Flipped), 1);
    }

    #[test]
    fn illegal_states() {
        let mut twist = CubieCube::SOLVED;
        twist.co[0] = CornerTwist::Clockwise;
        assert_eq!(
            twist.validate(),
            Err(IllegalCubeError {
                eo: EdgeFlip::Oriented,
                co: CornerTwist::Clockwise,
                perm: false,
                duplicates: false,
            })
        );
        twist.co[1] = CornerTwist::AntiClockwise;
        assert!(twist.validate().is_ok());

        let mut flip = CubieCube::SOLVED;
        flip.eo[0] = EdgeFlip::Flipped;
        assert!(flip.illegal());
        flip.eo[1] = EdgeFlip::Flipped;
        assert!(!flip.illegal());

        let mut swap = CubieCube::SOLVED;
        swap.ep[0] = Edge::UR;
        swap.ep[3] = Edge::UF;
        assert_eq!(
            swap.validate().unwrap_err().to_string(),
            "a cube was in an illegal state"
        );
        assert!(swap.perm_parity());
        swap.cp[0] = Corner::UBR;
        swap.cp[3] = Corner::UFR;
        assert!(swap.validate().is_ok());
    }

    #[test]
    fn duplicate_cubies_are_illegal() {
        let mut corners = CubieCube::SOLVED;
        corners.cp[1] = Corner::UFR;
        assert!(corners.has_duplicates());
        assert!(matches!(
            corners.validate(),
            Err(IllegalCubeError {
                duplicates: true,
                ..
            })
        ));

        let mut edges = CubieCube::SOLVED;
        edges.ep[1] = Edge::UF;
        assert!(edges.illegal());

        // Duplicating a cubie on both orbits keeps the parities equal
        let mut both = CubieCube::SOLVED;
        both.cp[1] = Corner::UFR;
        both.ep[1] = Edge::UF;
        assert!(!both.perm_parity());
        assert!(both.validate().unwrap_err().duplicates);
    }

    use proptest::collection::vec;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn moves_preserve_legality(mvs in vec(any::<Move333>(), 0..30)) {
            let cube = mvs.into_iter().fold(CubieCube::SOLVED, |c, m| c.make_move(m));
            prop_assert!(cube.validate().is_ok());
        }
    }
}
