//! A coordinate is an integer encoding of some part of a puzzle's state. Coordinates index move
//! tables and pattern databases, so every coordinate type knows how many values it can take.

/// A coordinate type, encoding a projection of the puzzle P onto a smaller state space.
pub trait Coordinate<P>: Copy + Default + Eq {
    /// Obtain the coordinate that corresponds to the given puzzle.
    fn from_puzzle(puzzle: &P) -> Self;

    /// Determine whether the given coordinate represents a solved state
    fn solved(self) -> bool {
        self.repr() == 0
    }

    /// The number of possible coordinate states.
    fn count() -> usize;

    /// A representation of this coordinate as a usize, for use in table lookups.
    fn repr(self) -> usize;

    /// Convert the representation of a coordinate to the coordinate itself. We assume 0
    /// corresponds to the solved state, and that `n < Self::count()`.
    fn from_repr(n: usize) -> Self;
}

/// Gives the ability to set a coordinate onto a puzzle.
pub trait FromCoordinate<C>: Sized
where
    C: Coordinate<Self>,
{
    /// Modify the puzzle so that its coordinate for `C` is `coord`. Parts of the puzzle that `C`
    /// does not describe are left alone.
    fn set_coord(&mut self, coord: C);
}
