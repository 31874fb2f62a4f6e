//! Facelet level view of a cube, used for printing.

use super::{CubieCube, Corner, Edge};

use std::fmt;

/// One of the six sticker colours, named after the face it belongs to when solved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    /// Faces in facelet order.
    pub const ARRAY: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];
}

/// A cube as 54 stickers, 9 per face in the order U R F D L B. Within a face, stickers are read
/// row by row as the face appears in the unfolded net printed by `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StickerCube(pub [Face; 54]);

// Sticker slots of each corner position, starting from the U/D sticker and going clockwise.
const CORNER_FACELETS: [[usize; 3]; 8] = [
    [8, 9, 20],
    [6, 18, 38],
    [0, 36, 47],
    [2, 45, 11],
    [29, 26, 15],
    [27, 44, 24],
    [33, 53, 42],
    [35, 17, 51],
];

const CORNER_COLOURS: [[Face; 3]; 8] = [
    [Face::U, Face::R, Face::F],
    [Face::U, Face::F, Face::L],
    [Face::U, Face::L, Face::B],
    [Face::U, Face::B, Face::R],
    [Face::D, Face::F, Face::R],
    [Face::D, Face::L, Face::F],
    [Face::D, Face::B, Face::L],
    [Face::D, Face::R, Face::B],
];

// Sticker slots of each edge position, reference sticker first.
const EDGE_FACELETS: [[usize; 2]; 12] = [
    [7, 19],
    [3, 37],
    [1, 46],
    [5, 10],
    [28, 25],
    [30, 43],
    [34, 52],
    [32, 16],
    [23, 12],
    [21, 41],
    [50, 39],
    [48, 14],
];

const EDGE_COLOURS: [[Face; 2]; 12] = [
    [Face::U, Face::F],
    [Face::U, Face::L],
    [Face::U, Face::B],
    [Face::U, Face::R],
    [Face::D, Face::F],
    [Face::D, Face::L],
    [Face::D, Face::B],
    [Face::D, Face::R],
    [Face::F, Face::R],
    [Face::F, Face::L],
    [Face::B, Face::L],
    [Face::B, Face::R],
];

impl From<CubieCube> for StickerCube {
    fn from(cube: CubieCube) -> Self {
        let mut stickers = [Face::U; 54];

        for (face, &colour) in Face::ARRAY.iter().enumerate() {
            stickers[face * 9 + 4] = colour;
        }

        for pos in Corner::ARRAY {
            let i = pos as usize;
            let piece = cube.cp[i] as usize;
            let twist = cube.co[i] as usize;
            for n in 0..3 {
                stickers[CORNER_FACELETS[i][(n + twist) % 3]] = CORNER_COLOURS[piece][n];
            }
        }

        for pos in Edge::ARRAY {
            let i = pos as usize;
            let piece = cube.ep[i] as usize;
            let flip = cube.eo[i] as usize;
            for n in 0..2 {
                stickers[EDGE_FACELETS[i][(n + flip) % 2]] = EDGE_COLOURS[piece][n];
            }
        }

        StickerCube(stickers)
    }
}

impl StickerCube {
    /// The nine stickers of a face.
    pub fn face(&self, face: Face) -> &[Face] {
        let start = face as usize * 9;
        &self.0[start..start + 9]
    }

    fn row(&self, face: Face, row: usize) -> String {
        self.face(face)[row * 3..row * 3 + 3]
            .iter()
            .map(|f| format!("{f:?}"))
            .collect()
    }
}

impl fmt::Display for StickerCube {
    /// Print the net
    ///
    /// ```text
    ///     UUU
    ///     UUU
    ///     UUU
    /// LLL FFF RRR BBB
    /// LLL FFF RRR BBB
    /// LLL FFF RRR BBB
    ///     DDD
    ///     DDD
    ///     DDD
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            writeln!(f, "    {}", self.row(Face::U, row))?;
        }
        for row in 0..3 {
            writeln!(
                f,
                "{} {} {} {}",
                self.row(Face::L, row),
                self.row(Face::F, row),
                self.row(Face::R, row),
                self.row(Face::B, row)
            )?;
        }
        for row in 0..3 {
            writeln!(f, "    {}", self.row(Face::D, row))?;
        }
        Ok(())
    }
}
