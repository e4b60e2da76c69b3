//! Loading job files submitted on the command line.
//!
//! A job file is TOML:
//!
//! ```toml
//! name = "Shot 010"
//! created = "2024-05-01T09:30:00Z"   # optional
//!
//! [settings]
//! frames = "1-250"
//! chunk_size = 10
//! render_output_root = "/render"
//! blendfile = "/projects/film/shot_010/anim.blend"
//! jobname = "anim"
//! format = "PNG"
//! image_file_extension = ".png"
//! ```

use crate::config::CompilerConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use renderforge_compiler::{Job, JobSettings};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct JobFile {
    #[serde(default)]
    name: Option<String>,

    /// RFC 3339 creation time
    #[serde(default)]
    created: Option<String>,

    settings: JobSettings,
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_created(value: &str) -> Result<DateTime<Utc>> {
    let ts = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Invalid creation time {:?}, expected RFC 3339", value))?;
    Ok(ts.with_timezone(&Utc))
}

/// Load a job file and prepare its settings for compilation.
///
/// `created` overrides the file's own creation time; without either the job
/// is created now.
pub fn load_job(path: &Path, compiler: &CompilerConfig, created: Option<&str>) -> Result<Job> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read job file: {:?}", path))?;

    let file: JobFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse job file: {:?}", path))?;

    let JobFile {
        name,
        created: file_created,
        mut settings,
    } = file;

    if settings.chunk_size.is_none() {
        settings.chunk_size = Some(compiler.default_chunk_size);
    }
    settings
        .check()
        .with_context(|| format!("Job file {:?} has invalid settings", path))?;

    if !is_absolute(&settings.render_output_root) {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let absolute = cwd.join(&settings.render_output_root);
        tracing::debug!(
            "Render output root {:?} is relative, using {:?}",
            settings.render_output_root,
            absolute
        );
        settings.render_output_root = absolute.to_string_lossy().into_owned();
    }

    settings.derive();

    let name = name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| settings.jobname.clone());

    let mut job = Job::new(name, settings);
    if let Some(ts) = created.or(file_created.as_deref()) {
        job = job.with_created(parse_created(ts)?);
    }

    tracing::debug!("Loaded job {} ({}) from {:?}", job.name, job.id, path);
    Ok(job)
}

/// Absolute on this host, or a Windows drive/UNC path submitted from elsewhere.
fn is_absolute(path: &str) -> bool {
    if Path::new(path).is_absolute() || path.starts_with('/') || path.starts_with("\\\\") {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}
