//! Renderforge-Common: Shared types, identifiers, and utilities.
//!
//! This crate provides common functionality used across renderforge:
//!
//! - **Typed IDs**: [`JobId`] for submitted jobs, [`TaskId`] for authored tasks
//! - **Render formats**: [`RenderFormat`] with the video / FFmpeg classification
//! - **Path Utilities**: separator-agnostic helpers for submission-time paths
//! - **Error Handling**: the common [`Error`] type and [`Result`] alias
//!
//! # Examples
//!
//! ```
//! use renderforge_common::{Error, RenderFormat, Result};
//! use renderforge_common::paths::basename;
//!
//! let format = RenderFormat::new("TARGA");
//! assert_eq!(format.cli_name(), "TGA");
//!
//! assert_eq!(basename(r"C:\jobs\shotA\scene.blend"), "scene.blend");
//!
//! fn example() -> Result<()> {
//!     Err(Error::UnresolvedRenderOutputPath)
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
