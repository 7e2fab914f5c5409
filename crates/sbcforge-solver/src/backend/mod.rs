//! Solver backends.

mod linearize;
mod microlp;

pub use linearize::{Cmp, Column, LinearProgram, Row};
pub use microlp::MicrolpAdapter;

#[cfg(test)]
mod tests;
