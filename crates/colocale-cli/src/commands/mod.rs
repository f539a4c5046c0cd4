//! CLI command implementations.

mod check;
mod common;
mod extract;
mod load;

pub use check::{CheckArgs, run_check};
pub use common::SourceArgs;
pub use extract::{ExtractArgs, run_extract};
pub use load::{LoadArgs, run_load};
