//! Typed job settings.
//!
//! Settings arrive from the submission tooling already evaluated to plain
//! values. The only derived field, `render_output_path`, is computed once by
//! [`JobSettings::derive_render_output_path`] at the submission boundary.

use renderforge_common::paths;
use renderforge_common::{Error, RenderFormat, Result};
use serde::{Deserialize, Serialize};

/// Chunk size used when a job does not set one.
pub const DEFAULT_CHUNK_SIZE: i64 = 1;

/// Upper bound for `add_path_components`.
pub const MAX_PATH_COMPONENTS: u32 = 32;

/// Frame-number placeholder the renderer expands per output image.
const FRAME_NUMBER_PATTERN: &str = "######";

/// Settings of a multi-pass render job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSettings {
    /// Frame range to render, e.g. `47`, `1-30`, `3, 5-10, 47-327`.
    pub frames: String,

    /// Number of frames to render in one task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<i64>,

    /// Base directory of the render output.
    pub render_output_root: String,

    /// Number of directory names of the blend file's location to append to
    /// the render output root.
    #[serde(default)]
    pub add_path_components: u32,

    /// Final render output path. Derived, and overwritten with its resolved
    /// value during compilation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_output_path: Option<String>,

    /// Path of the blend file to render, as seen by the submitter.
    pub blendfile: String,

    pub jobname: String,

    /// Name of the blend file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,

    /// Render output format.
    pub format: RenderFormat,

    /// File extension used when rendering images, e.g. `.png`.
    pub image_file_extension: String,

    /// Whether the renderer also writes preview images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_previews: Option<bool>,
}

impl JobSettings {
    /// The effective chunk size.
    pub fn chunk_size(&self) -> i64 {
        self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    /// Schema check run once when settings enter the system.
    ///
    /// This does not parse `frames` or check `chunk_size`; the compiler
    /// reports those with their own error kinds.
    pub fn check(&self) -> Result<()> {
        let required = [
            ("frames", &self.frames),
            ("render_output_root", &self.render_output_root),
            ("blendfile", &self.blendfile),
            ("jobname", &self.jobname),
            ("image_file_extension", &self.image_file_extension),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(Error::invalid_settings(format!("{key} is required")));
            }
        }

        if self.format.as_str().trim().is_empty() {
            return Err(Error::invalid_settings("format is required"));
        }

        if self.add_path_components > MAX_PATH_COMPONENTS {
            return Err(Error::invalid_settings(format!(
                "add_path_components must be between 0 and {MAX_PATH_COMPONENTS}, got {}",
                self.add_path_components
            )));
        }

        Ok(())
    }

    /// Compute the render output path template:
    /// `<root>/<last N dirs of the blend file>/<jobname>/{timestamp}/######`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use renderforge_compiler::JobSettings;
    /// # let mut settings: JobSettings = serde_json::from_value(serde_json::json!({
    /// #     "frames": "1-10", "render_output_root": "/render", "blendfile": "",
    /// #     "jobname": "", "format": "PNG", "image_file_extension": ".png",
    /// # })).unwrap();
    /// settings.blendfile = "/projects/film/shot_010/anim.blend".into();
    /// settings.jobname = "anim-v3".into();
    /// settings.add_path_components = 1;
    ///
    /// assert_eq!(
    ///     settings.derive_render_output_path(),
    ///     "/render/shot_010/anim-v3/{timestamp}/######"
    /// );
    /// ```
    pub fn derive_render_output_path(&self) -> String {
        let dirs = paths::last_n_dir_parts(&self.blendfile, self.add_path_components as usize);

        let mut parts = vec![self.render_output_root.as_str()];
        parts.extend(dirs);
        parts.extend([self.jobname.as_str(), "{timestamp}", FRAME_NUMBER_PATTERN]);
        paths::join(parts)
    }

    /// Fill in the derived fields, replacing whatever was submitted for them.
    pub fn derive(&mut self) {
        let derived = self.derive_render_output_path();
        if let Some(ref submitted) = self.render_output_path {
            if *submitted != derived {
                tracing::debug!(
                    "Replacing submitted render_output_path {:?} with {:?}",
                    submitted,
                    derived
                );
            }
        }
        self.render_output_path = Some(derived);

        if self.filename.is_none() {
            let name = paths::basename(&self.blendfile);
            if !name.is_empty() {
                self.filename = Some(name.to_string());
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_settings() -> JobSettings {
        JobSettings {
            frames: "1-10".to_string(),
            chunk_size: Some(3),
            render_output_root: "/render".to_string(),
            add_path_components: 0,
            render_output_path: None,
            blendfile: "/projects/film/shot_010/anim.blend".to_string(),
            jobname: "anim".to_string(),
            filename: None,
            fps: Some(24.0),
            format: RenderFormat::new("PNG"),
            image_file_extension: ".png".to_string(),
            has_previews: None,
        }
    }

    #[test]
    fn test_check_accepts_sample() {
        assert!(sample_settings().check().is_ok());
    }

    #[test]
    fn test_check_rejects_missing_required() {
        let mut settings = sample_settings();
        settings.jobname = "  ".to_string();
        let err = settings.check().unwrap_err();
        assert_eq!(err.to_string(), "Invalid settings: jobname is required");

        let mut settings = sample_settings();
        settings.format = RenderFormat::new("");
        assert!(matches!(settings.check(), Err(Error::InvalidSettings(_))));
    }

    #[test]
    fn test_check_path_components_range() {
        let mut settings = sample_settings();
        settings.add_path_components = 32;
        assert!(settings.check().is_ok());

        settings.add_path_components = 33;
        assert!(matches!(settings.check(), Err(Error::InvalidSettings(_))));
    }

    #[test]
    fn test_chunk_size_default() {
        let mut settings = sample_settings();
        settings.chunk_size = None;
        assert_eq!(settings.chunk_size(), 1);
    }

    #[test]
    fn test_derive_render_output_path() {
        let mut settings = sample_settings();
        assert_eq!(
            settings.derive_render_output_path(),
            "/render/anim/{timestamp}/######"
        );

        settings.add_path_components = 2;
        assert_eq!(
            settings.derive_render_output_path(),
            "/render/film/shot_010/anim/{timestamp}/######"
        );
    }

    #[test]
    fn test_derive_replaces_submitted_value_and_sets_filename() {
        let mut settings = sample_settings();
        settings.render_output_path = Some("/somewhere/else".to_string());

        settings.derive();

        assert_eq!(
            settings.render_output_path.as_deref(),
            Some("/render/anim/{timestamp}/######")
        );
        assert_eq!(settings.filename.as_deref(), Some("anim.blend"));
    }

    #[test]
    fn test_deserialize_minimal() {
        let settings: JobSettings = serde_json::from_value(serde_json::json!({
            "frames": "1-250",
            "render_output_root": "/render",
            "blendfile": "/jobs/shotA/scene.blend",
            "jobname": "scene",
            "format": "OPEN_EXR",
            "image_file_extension": ".exr",
        }))
        .unwrap();

        assert_eq!(settings.chunk_size, None);
        assert_eq!(settings.add_path_components, 0);
        assert_eq!(settings.format.as_str(), "OPEN_EXR");
    }
}
