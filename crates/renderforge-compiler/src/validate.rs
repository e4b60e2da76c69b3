//! Render format validation.

use crate::settings::JobSettings;
use renderforge_common::{Error, RenderFormat, Result};
use std::fmt;

/// A problem with the job that does not stop compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// The image sequence cannot be turned into a preview video with FFmpeg.
    FfmpegIncompatibleFormat(RenderFormat),
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FfmpegIncompatibleFormat(format) => write!(
                f,
                "render format {format} cannot be read by FFmpeg; no preview video can be made from this job's output"
            ),
        }
    }
}

/// Check that the job renders an image sequence.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for video formats
/// (`FFMPEG`, `AVI_RAW`, `AVI_JPEG`).
pub fn validate(settings: &JobSettings) -> Result<Vec<ValidationWarning>> {
    let format = &settings.format;
    if format.is_video() {
        return Err(Error::UnsupportedFormat(format.to_string()));
    }

    let mut warnings = Vec::new();
    if format.is_ffmpeg_incompatible() {
        warnings.push(ValidationWarning::FfmpegIncompatibleFormat(format.clone()));
    }

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::tests::sample_settings;

    fn with_format(format: &str) -> JobSettings {
        let mut settings = sample_settings();
        settings.format = RenderFormat::new(format);
        settings
    }

    #[test]
    fn video_formats_are_rejected() {
        for format in ["FFMPEG", "AVI_RAW", "AVI_JPEG"] {
            let err = validate(&with_format(format)).unwrap_err();
            assert!(matches!(err, Error::UnsupportedFormat(ref f) if f == format));
        }
    }

    #[test]
    fn image_formats_pass_without_warnings() {
        for format in ["PNG", "JPEG", "TARGA", "TIFF", "WEBP"] {
            assert!(validate(&with_format(format)).unwrap().is_empty(), "{format}");
        }
    }

    #[test]
    fn exr_formats_pass_with_a_warning() {
        for format in ["EXR", "MULTILAYER", "OPEN_EXR", "OPEN_EXR_MULTILAYER"] {
            let warnings = validate(&with_format(format)).unwrap();
            assert_eq!(
                warnings,
                [ValidationWarning::FfmpegIncompatibleFormat(RenderFormat::new(format))]
            );
        }
    }
}
