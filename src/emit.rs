//! JSON emission of compiled jobs.

use anyhow::{Context, Result};
use renderforge_compiler::{CompileReport, Job};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// What `renderforge compile` prints: the job with its tasks, plus any
/// validation warnings.
#[derive(Debug, Serialize)]
pub struct CompiledJob<'a> {
    pub job: &'a Job,
    pub warnings: Vec<String>,
}

impl<'a> CompiledJob<'a> {
    pub fn new(job: &'a Job, report: &CompileReport) -> Self {
        Self {
            job,
            warnings: report.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Serialize `compiled` to `writer`, followed by a newline.
pub fn write_json<W: Write>(mut writer: W, compiled: &CompiledJob<'_>, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, compiled)?;
    } else {
        serde_json::to_writer(&mut writer, compiled)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write `compiled` to `path`, or to stdout when no path is given.
pub fn emit(compiled: &CompiledJob<'_>, path: Option<&Path>, pretty: bool) -> Result<()> {
    match path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            write_json(std::io::BufWriter::new(file), compiled, pretty)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            tracing::info!("Wrote {} tasks to {:?}", compiled.job.tasks().len(), path);
            Ok(())
        }
        None => write_json(std::io::stdout().lock(), compiled, pretty),
    }
}
