//! This module defines general error types used throughout the crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::cube333::IllegalCubeError;

/// Error type for converting integers to (C like) enums using TryFrom
#[derive(Debug, Error)]
pub enum TryFromIntToEnumError {
    /// attempted to convert integer into enum value, but integer was out of bounds
    #[error("attempted to convert integer into enum value, but integer was out of bounds")]
    OutOfBounds,
}

/// Error for text that does not name a move in standard notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    /// The token is not a face letter optionally followed by `'` or `2`.
    #[error("invalid move `{0}`, expected standard notation such as U, U' or U2")]
    Invalid(String),
}

/// Error for configuration values outside of their documented range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested pattern database depth would collide with the table's marker bytes.
    #[error("max build depth {given} is out of range, expected 0..={limit}")]
    MaxDepthOutOfRange {
        /// The rejected value.
        given: u8,
        /// The largest accepted value.
        limit: u8,
    },
}

/// Failures while reading or writing a pattern database file.
///
/// A file that exists but is corrupt or was built for another layout is not an error, it is
/// rebuilt instead. What remains are environment problems.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Reading, writing or renaming the database file failed.
    #[error("pattern database I/O failed for {path}: {source}")]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },
}

/// Outcomes of a search that did not produce a solution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Every bound up to the configured limit was searched without reaching the solved state.
    #[error("no solution found within {limit} moves")]
    NotFoundWithinLimit {
        /// The largest bound that was searched.
        limit: u8,
    },
    /// The search space ran out before any bound was exceeded.
    #[error("search space exhausted without reaching the solved state")]
    Exhausted,
    /// The start state cannot be reached from solved, so no sequence of moves solves it.
    #[error(transparent)]
    IllegalCube(#[from] IllegalCubeError),
}

/// Every error the crate can produce, for callers that just want to report failures.
#[derive(Debug, Error)]
pub enum Error {
    /// See [`ParseMoveError`].
    #[error(transparent)]
    ParseMove(#[from] ParseMoveError),
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// See [`DatabaseError`].
    #[error(transparent)]
    Database(#[from] DatabaseError),
    /// See [`SolveError`].
    #[error(transparent)]
    Solve(#[from] SolveError),
}
