//! The job compiler: validate, resolve the output path, chunk frames, author
//! and emit tasks.

use crate::author::{self, AuthorOptions};
use crate::frames::FrameSet;
use crate::job::{Job, JobStatus};
use crate::template;
use crate::validate::{self, ValidationWarning};
use renderforge_common::paths;
use renderforge_common::{Error, Result};

/// Options applied to every job compiled by a [`JobCompiler`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    pub author: AuthorOptions,
}

/// Summary of a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    /// Number of tasks added to the job.
    pub tasks: usize,
    /// The resolved render output path.
    pub render_output_path: String,
    /// Non-fatal findings from validation.
    pub warnings: Vec<ValidationWarning>,
}

/// Compiles multi-pass render jobs into render tasks.
///
/// Compilation is all-or-nothing: tasks are only added to the job once every
/// step has succeeded, so a failed job never carries a partial task set.
///
/// # Example
///
/// ```
/// use renderforge_compiler::{Job, JobCompiler, JobSettings, JobStatus};
///
/// let mut settings: JobSettings = serde_json::from_value(serde_json::json!({
///     "frames": "1-5",
///     "chunk_size": 2,
///     "render_output_root": "/render",
///     "blendfile": "/jobs/shotA/scene.blend",
///     "jobname": "scene",
///     "format": "PNG",
///     "image_file_extension": ".png",
/// }))?;
/// settings.derive();
///
/// let mut job = Job::new("scene", settings);
/// let report = JobCompiler::default().compile(&mut job)?;
///
/// assert_eq!(report.tasks, 3);
/// assert_eq!(job.status(), JobStatus::Emitted);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct JobCompiler {
    options: CompilerOptions,
}

impl JobCompiler {
    pub fn new(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compile `job`, adding its tasks to it.
    ///
    /// On failure the job ends up [`JobStatus::Rejected`] with no tasks, and
    /// the error is returned for the submitter.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFormat`] for video output formats
    /// - [`Error::UnresolvedRenderOutputPath`] if the job has no output path
    /// - [`Error::InvalidFrameExpression`] for a malformed `frames` setting
    /// - [`Error::InvalidChunkSize`] for a chunk size below 1
    /// - [`Error::InvalidSettings`] if the job was compiled before, or its
    ///   blend file cannot be staged
    pub fn compile(&self, job: &mut Job) -> Result<CompileReport> {
        if job.status() != JobStatus::Received {
            return Err(Error::invalid_settings(format!(
                "job {} is {}, only received jobs can be compiled",
                job.id,
                job.status()
            )));
        }

        tracing::info!("Render job {} ({}) submitted", job.name, job.id);

        match self.run(job) {
            Ok(report) => {
                tracing::info!(
                    "Job {} compiled into {} tasks, output {}",
                    job.id,
                    report.tasks,
                    report.render_output_path
                );
                Ok(report)
            }
            Err(e) => {
                job.set_status(JobStatus::Rejected);
                tracing::warn!("Job {} rejected: {}", job.id, e);
                Err(e)
            }
        }
    }

    fn run(&self, job: &mut Job) -> Result<CompileReport> {
        let warnings = validate::validate(&job.settings)?;
        job.set_status(JobStatus::Validated);

        let render_output = template::resolve_render_output_path(job)?;
        job.set_status(JobStatus::PathResolved);

        let frames = FrameSet::parse(&job.settings.frames)?;
        let chunks = frames.chunk(job.settings.chunk_size())?;
        tracing::debug!(
            "Frames {} split into {} chunks of at most {}",
            frames,
            chunks.len(),
            job.settings.chunk_size()
        );
        job.set_status(JobStatus::Chunked);

        let render_dir = paths::dirname(&render_output);
        let tasks = author::author_render_tasks(
            &job.settings,
            render_dir,
            &render_output,
            &chunks,
            &self.options.author,
        )?;
        job.set_status(JobStatus::TasksAuthored);

        let count = tasks.len();
        for task in tasks {
            job.add_task(task);
        }
        job.set_status(JobStatus::Emitted);

        Ok(CompileReport {
            tasks: count,
            render_output_path: render_output,
            warnings,
        })
    }
}
