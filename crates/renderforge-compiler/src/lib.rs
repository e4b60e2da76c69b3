//! # renderforge-compiler
//!
//! Compiles a render job into tasks for the render farm.
//!
//! This crate provides functionality for:
//! - Parsing frame selections (`"3, 5-10, 47-327"`) and cutting them into
//!   bounded-size chunks
//! - Resolving `{timestamp}` in the render output path template
//! - Rejecting jobs that would render video instead of images
//! - Authoring one renderer invocation per chunk
//!
//! The compiler is synchronous and performs no I/O. Host placeholders such as
//! `{blender}` or `{clientStoragePath}` are emitted verbatim for the worker to
//! resolve.
//!
//! ## Example
//!
//! ```
//! use renderforge_compiler::FrameSet;
//!
//! let chunks = FrameSet::parse("1-5")?.chunk(2)?;
//! assert_eq!(chunks.len(), 3);
//! assert_eq!(chunks[2].to_render_range(), "5");
//! # Ok::<(), renderforge_compiler::Error>(())
//! ```

pub mod author;
pub mod command;
pub mod compiler;
pub mod frames;
pub mod job;
pub mod settings;
pub mod template;
pub mod validate;

// Re-exports
pub use author::AuthorOptions;
pub use command::Command;
pub use compiler::{CompileReport, CompilerOptions, JobCompiler};
pub use frames::{FrameChunk, FrameSet};
pub use job::{Job, JobStatus, Task};
pub use renderforge_common::{Error, Result};
pub use settings::JobSettings;
pub use template::TemplateContext;
pub use validate::{validate, ValidationWarning};
