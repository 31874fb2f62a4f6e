//! Module for puzzle move generics and related functionality

use std::fmt;

/// A move, for use in writing expressions or algorithms. It is intended that a term of this trait
/// is a power of a symbol in some group presentation.
///
/// Commutativity relations are encoded in the `commutes_with` method and the "same generator"
/// relation in `same_generator`. Searches use both to avoid generating sequences that are
/// obviously equal to shorter or already visited ones.
pub trait Move: Eq + Clone {
    /// Take the inverse of a move. These inverses must satisfy the invertibility conditions of
    /// a group, i.e. that `X X^{-1} = X^{-1} X = e` where `e` is the empty sequence.
    fn inverse(self) -> Self
    where
        Self: Sized;

    /// Returns whether the two moves commute, i.e. can be swapped when adjacent. It is required
    /// that this property is transitive.
    ///
    /// If A and B are moves, then `A.commutes_with(B)` iff
    /// `A B = B A`
    /// moreover, if `B.commutes_with(C)`, then it must be true that `A.commutes_with(C)`
    fn commutes_with(&self, b: &Self) -> bool;

    /// Returns whether both moves are powers of the same generator, in which case `A B` is
    /// always equal to a single move or to nothing at all.
    ///
    /// ```rust
    /// use cube_solver::mv;
    /// use cube_solver::cube333::moves::{Move333, Move333Type};
    /// use cube_solver::moves::Move;
    ///
    /// assert!(mv!(R, 1).same_generator(&mv!(R, 3)));
    /// assert!(!mv!(R, 1).same_generator(&mv!(L, 1)));
    /// ```
    fn same_generator(&self, b: &Self) -> bool;
}

/// A sequence of moves (also known as an algorithm) for some specific type of move.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct MoveSequence<M: Move>(pub Vec<M>);

// Derived `Default` would require `M: Default`.
impl<M: Move> Default for MoveSequence<M> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<M: Move> MoveSequence<M> {
    /// Invert a sequence of moves.
    ///
    /// If `X` is a sequence of moves and `X^{-1}` is its inverse and `o` is composition, then
    /// `X o X^{-1} = X^{-1} o X = e` where `e` is the empty sequence.
    pub fn inverse(self) -> Self {
        Self(self.0.into_iter().rev().map(|m| m.inverse()).collect())
    }

    /// Number of moves in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence contains no moves.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenate two sequences, `self` first.
    pub fn append(mut self, mut other: Self) -> Self {
        self.0.append(&mut other.0);
        self
    }

    /// Iterate over the moves in order.
    pub fn iter(&self) -> std::slice::Iter<'_, M> {
        self.0.iter()
    }
}

impl<M: Move> FromIterator<M> for MoveSequence<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<M: Move> IntoIterator for MoveSequence<M> {
    type Item = M;
    type IntoIter = std::vec::IntoIter<M>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<M: Move + fmt::Display> fmt::Display for MoveSequence<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for m in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{m}")?;
            first = false;
        }
        Ok(())
    }
}
