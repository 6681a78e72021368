//! CLI subcommand implementations.

pub mod dump;
pub mod episodes;
pub mod labels;
pub mod load;
pub mod snapshot;
