//! Library side of the feedback analytics CLI.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
