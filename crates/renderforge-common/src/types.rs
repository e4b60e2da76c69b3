//! Render output format handling.
//!
//! Formats are kept as the renderer's own identifiers
//! (`scene.render.image_settings.file_format`), so values this crate does not
//! know about still pass through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Formats that render to a video container instead of an image sequence.
const VIDEO_FORMATS: &[&str] = &["FFMPEG", "AVI_RAW", "AVI_JPEG"];

/// Image formats FFmpeg cannot read back as input.
///
/// `EXR` and `MULTILAYER` are the old command-line spellings, the other two
/// are the values the renderer stores in scene files.
const FFMPEG_INCOMPATIBLE_FORMATS: &[&str] =
    &["EXR", "MULTILAYER", "OPEN_EXR", "OPEN_EXR_MULTILAYER"];

/// A render output format, e.g. `PNG`, `OPEN_EXR`, `FFMPEG`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderFormat(String);

impl RenderFormat {
    pub fn new(format: impl Into<String>) -> Self {
        Self(format.into())
    }

    /// The format identifier as submitted.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this format renders to video.
    pub fn is_video(&self) -> bool {
        VIDEO_FORMATS.contains(&self.0.as_str())
    }

    /// Whether FFmpeg will refuse image sequences in this format.
    pub fn is_ffmpeg_incompatible(&self) -> bool {
        FFMPEG_INCOMPATIBLE_FORMATS.contains(&self.0.as_str())
    }

    /// The spelling accepted by the renderer's `--render-format` flag.
    ///
    /// The command line does not accept the long `TARGA` alias.
    pub fn cli_name(&self) -> &str {
        match self.0.as_str() {
            "TARGA" => "TGA",
            other => other,
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RenderFormat {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RenderFormat {
    fn from(s: String) -> Self {
        Self(s)
    }
}
