//! CLI command implementations.

pub mod circuit;
pub mod common;
pub mod train;
pub mod version;
