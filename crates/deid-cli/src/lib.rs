//! Command-line runner for the tiered de-identification pipeline.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
