//! CLI command implementations.

pub mod compare;
pub mod compute;
mod context;
pub mod indicators;
pub mod validate;
