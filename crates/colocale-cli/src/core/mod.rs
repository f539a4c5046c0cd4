//! Core types, errors, and shared functionality.

mod errors;
mod project;

pub use errors::*;
pub use project::*;
