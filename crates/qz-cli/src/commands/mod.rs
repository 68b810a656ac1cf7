//! CLI subcommand implementations.

pub mod predict;
pub mod retention;
pub mod schedule;
pub mod topics;
pub mod util;
