//! A 3x3x3 cube solver built around iterative deepening A* guided by a corner pattern database,
//! along with the cube model, move notation and the uninformed solvers it is compared against.

#![deny(missing_docs)]

pub mod coord;
pub mod cube333;
pub mod error;
pub mod moves;
