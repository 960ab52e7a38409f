//! CLI subcommand implementations.

pub mod cancel;
pub mod delete;
pub mod edit;
pub mod report;
pub mod resume;
pub mod start;
pub mod status;
pub mod stop;
mod util;
