//! Library components of the `edprep` command-line tool.

pub mod logging;
pub mod pipeline;
pub mod types;
