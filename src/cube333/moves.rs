//! Face turns of the 3x3x3 cube: notation, the half turn metric move set, scrambles and
//! application of moves to a [`CubieCube`].

use super::{CornerTwist, CubieCube, EdgeFlip};
use crate::error::ParseMoveError;
use crate::moves::MoveSequence;

use std::fmt;
use std::str::FromStr;

#[cfg(test)]
use proptest_derive::Arbitrary;

/// Represents each type of move. Note that the `Move` struct uses this variable along with a
/// counter to represents move such as R2 or U'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Move333Type {
    /// Right
    R,
    /// Left
    L,
    /// Up
    U,
    /// Down
    D,
    /// Front
    F,
    /// Back
    B,
}

impl Move333Type {
    /// The move type on the face opposite to the given one.
    pub fn opposite(self) -> Move333Type {
        match self {
            Move333Type::R => Move333Type::L,
            Move333Type::L => Move333Type::R,
            Move333Type::U => Move333Type::D,
            Move333Type::D => Move333Type::U,
            Move333Type::F => Move333Type::B,
            Move333Type::B => Move333Type::F,
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(Move333Type::R),
            'L' => Some(Move333Type::L),
            'U' => Some(Move333Type::U),
            'D' => Some(Move333Type::D),
            'F' => Some(Move333Type::F),
            'B' => Some(Move333Type::B),
            _ => None,
        }
    }
}

/// Stores a move type and counter. An anti-clockwise move will have a count of 3, and the count
/// is always 1, 2 or 3.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
#[allow(missing_docs)]
pub struct Move333 {
    pub ty: Move333Type,
    #[cfg_attr(test, proptest(strategy = "1..=3u8"))]
    pub count: u8,
}

impl crate::moves::Move for Move333 {
    fn inverse(self) -> Self {
        Self {
            ty: self.ty,
            count: 4u8.wrapping_sub(self.count).rem_euclid(4),
        }
    }

    fn commutes_with(&self, b: &Self) -> bool {
        self.ty == b.ty || self.ty.opposite() == b.ty
    }

    fn same_generator(&self, b: &Self) -> bool {
        self.ty == b.ty
    }
}

// I don't want to have the default derive debug for this!
impl fmt::Debug for Move333 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count {
            1 => write!(f, "{:?}", self.ty),
            3 => write!(f, "{:?}'", self.ty),
            _ => write!(f, "{:?}{}", self.ty, self.count),
        }
    }
}

impl fmt::Display for Move333 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Move333 {
    type Err = ParseMoveError;

    /// Parse standard notation (`U`, `U'`, `U2`). Face letters are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMoveError::Invalid(s.to_owned());
        let mut chars = s.trim().chars();
        let ty = chars
            .next()
            .and_then(Move333Type::from_letter)
            .ok_or_else(invalid)?;
        let count = match chars.as_str() {
            "" => 1,
            "2" => 2,
            "'" => 3,
            _ => return Err(invalid()),
        };
        Ok(Move333 { ty, count })
    }
}

impl FromStr for MoveSequence<Move333> {
    type Err = ParseMoveError;

    /// Parse whitespace separated moves. The empty string is the empty sequence.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace().map(str::parse).collect()
    }
}

/// A trait to classify a type as a move generator. A move generator is a set which can be used to
/// generate a set, i.e. find every combination of moves using moves in the move generator to find
/// unique states.
pub trait MoveGenerator {
    /// The amount of moves that are available in the moveset.
    const SIZE: usize;
    /// A list of all valid moves. The index of a move in this list will be the same index used
    /// when accessing the move table.
    const MOVE_LIST: &'static [Move333];
}

impl From<Move333> for usize {
    fn from(mv: Move333) -> usize {
        debug_assert!(
            (1..=3).contains(&mv.count),
            "move count {} is not 1, 2 or 3",
            mv.count
        );
        (mv.count as usize - 1) * 6 + mv.ty as usize
    }
}

/// Create a move by specifying a move type and move count. Note that you do not need to specify
/// for example Move333Type::R, you only need to specify R.
#[macro_export]
macro_rules! mv {
    ($ty:ident, $count: expr) => {
        Move333 {
            ty: Move333Type::$ty,
            count: $count,
        }
    };
}

/// Type for Half Turn Metric
pub struct Htm;

impl MoveGenerator for Htm {
    const SIZE: usize = 18;
    const MOVE_LIST: &'static [Move333] = &[
        mv!(R, 1),
        mv!(L, 1),
        mv!(U, 1),
        mv!(D, 1),
        mv!(F, 1),
        mv!(B, 1),
        mv!(R, 2),
        mv!(L, 2),
        mv!(U, 2),
        mv!(D, 2),
        mv!(F, 2),
        mv!(B, 2),
        mv!(R, 3),
        mv!(L, 3),
        mv!(U, 3),
        mv!(D, 3),
        mv!(F, 3),
        mv!(B, 3),
    ];
}

/// Draw `n` moves uniformly from the 18 half turn metric moves and apply them to a solved cube.
/// Consecutive moves may cancel; nothing is simplified.
pub fn random_scramble(n: usize) -> (MoveSequence<Move333>, CubieCube) {
    random_scramble_with(&mut fastrand::Rng::new(), n)
}

/// Like [`random_scramble`] but drawing from the given generator, so a seeded `Rng` gives a
/// reproducible scramble.
pub fn random_scramble_with(rng: &mut fastrand::Rng, n: usize) -> (MoveSequence<Move333>, CubieCube) {
    let mvs: MoveSequence<Move333> = (0..n)
        .map(|_| Htm::MOVE_LIST[rng.usize(..Htm::SIZE)])
        .collect();
    let cube = CubieCube::SOLVED.make_moves(mvs.clone());
    (mvs, cube)
}

// Each row describes one clockwise quarter turn: position i receives the cubie from position
// `*_OFFSETS[i]`, twisted or flipped by `*O_OFFSETS[i]`.
const CO_OFFSETS: [[u8; 8]; 6] = [
    [2, 0, 0, 1, 1, 0, 0, 2],
    [0, 1, 2, 0, 0, 2, 1, 0],
    [0; 8],
    [0; 8],
    [1, 2, 0, 0, 2, 1, 0, 0],
    [0, 0, 1, 2, 0, 0, 2, 1],
];
const CP_OFFSETS: [[u8; 8]; 6] = [
    [4, 1, 2, 0, 7, 5, 6, 3],
    [0, 2, 6, 3, 4, 1, 5, 7],
    [3, 0, 1, 2, 4, 5, 6, 7],
    [0, 1, 2, 3, 5, 6, 7, 4],
    [1, 5, 2, 3, 0, 4, 6, 7],
    [0, 1, 3, 7, 4, 5, 2, 6],
];
const EO_OFFSETS: [[u8; 12]; 6] = [
    [0; 12],
    [0; 12],
    [0; 12],
    [0; 12],
    [1, 0, 0, 0, 1, 0, 0, 0, 1, 1, 0, 0],
    [0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 1],
];
const EP_OFFSETS: [[u8; 12]; 6] = [
    [0, 1, 2, 8, 4, 5, 6, 11, 7, 9, 10, 3],
    [0, 10, 2, 3, 4, 9, 6, 7, 8, 1, 5, 11],
    [3, 0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11],
    [0, 1, 2, 3, 5, 6, 7, 4, 8, 9, 10, 11],
    [9, 1, 2, 3, 8, 5, 6, 7, 0, 4, 10, 11],
    [0, 1, 11, 3, 4, 5, 10, 7, 8, 9, 2, 6],
];

impl CubieCube {
    /// Apply an algorithm to a cube
    pub fn make_moves(self, mvs: MoveSequence<Move333>) -> CubieCube {
        mvs.0.into_iter().fold(self, |c, m| c.make_move(m))
    }

    /// Apply a move to a cube.
    pub fn make_move(self, mv: Move333) -> CubieCube {
        (0..mv.count).fold(self, |c, _| c.make_move_type(mv.ty))
    }

    /// Make a single clockwise quarter turn of a face.
    pub fn make_move_type(self, mv: Move333Type) -> CubieCube {
        let co_offsets = CO_OFFSETS[mv as usize];
        let cp_offsets = CP_OFFSETS[mv as usize];
        let eo_offsets = EO_OFFSETS[mv as usize];
        let ep_offsets = EP_OFFSETS[mv as usize];

        let mut result = self.clone();

        for i in 0..8 {
            let from = cp_offsets[i] as usize;
            result.co[i] = self.co[from].twist_by(CornerTwist::from_mod3(co_offsets[i]));
            result.cp[i] = self.cp[from];
        }

        for i in 0..12 {
            let from = ep_offsets[i] as usize;
            result.eo[i] = self.eo[from].flip_by(EdgeFlip::from_mod2(eo_offsets[i]));
            result.ep[i] = self.ep[from];
        }

        result
    }

    /// Multiply two cube states in the Rubik's cube group.
    pub fn multiply_cube(self, other: CubieCube) -> CubieCube {
        let mut result = CubieCube::SOLVED;

        for i in 0..8 {
            let oa = self.co[other.cp[i] as usize];
            let ob = other.co[i];
            result.co[i] = oa.twist_by(ob);
            result.cp[i] = self.cp[other.cp[i] as usize];
        }

        for i in 0..12 {
            let oa = self.eo[other.ep[i] as usize];
            let ob = other.eo[i];
            result.eo[i] = oa.flip_by(ob);
            result.ep[i] = self.ep[other.ep[i] as usize];
        }

        result
    }

    /// Get the inverse in the Rubik's cube group.
    pub fn inverse(self) -> CubieCube {
        let mut result = CubieCube::SOLVED;

        for i in 0..8 {
            result.co[self.cp[i] as usize] = self.co[i].inverse();
            result.cp[self.cp[i] as usize] = super::Corner::ARRAY[i];
        }

        for i in 0..12 {
            result.eo[self.ep[i] as usize] = self.eo[i];
            result.ep[self.ep[i] as usize] = super::Edge::ARRAY[i];
        }

        result
    }
}
