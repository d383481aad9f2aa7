//! CLI subcommand implementations.

pub mod estimate;
pub mod lookup;
pub mod schools;
