//! Renderforge - Render farm job compiler
//!
//! This library crate exposes the command-line boundary (configuration, job
//! files and JSON emission) for integration testing. The compiler itself
//! lives in `renderforge-compiler`.

pub mod config;
pub mod emit;
pub mod job_file;
