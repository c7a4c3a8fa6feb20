//! High-level plot types.
//!
//! Provides ready-to-use visualization types with builder APIs.

mod dot_matrix;

pub use dot_matrix::{BuiltDotMatrix, DotMatrixChart};
