mod cli;

use renderforge::{config, emit, job_file};
use renderforge_compiler::{CompileReport, FrameSet, Job, JobCompiler};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag.
    // Logs go to stderr; stdout carries the emitted JSON.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "renderforge=trace,renderforge_compiler=trace".to_string()
        } else {
            "renderforge=info,renderforge_compiler=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compile { job, created, out } => compile_job(
            &job,
            cli.config.as_deref(),
            created.as_deref(),
            out.as_deref(),
        ),
        Commands::Frames { expr, chunk_size } => preview_frames(&expr, chunk_size),
        Commands::Validate { job } => validate_job(&job, cli.config.as_deref()),
        Commands::Version => {
            println!("renderforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn compile_job(
    job_path: &Path,
    config_path: Option<&Path>,
    created: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let mut job = job_file::load_job(job_path, &config.compiler, created)?;

    let report = compile(&config, &mut job)?;

    let compiled = emit::CompiledJob::new(&job, &report);
    emit::emit(&compiled, out, config.output.pretty)
}

fn preview_frames(expr: &str, chunk_size: i64) -> Result<()> {
    let frames = FrameSet::parse(expr)?;
    let chunks = frames.chunk(chunk_size)?;

    tracing::info!(
        "{} frames ({}) in {} chunks",
        frames.len(),
        frames,
        chunks.len()
    );

    for chunk in &chunks {
        println!("{}\t{}", chunk, chunk.to_render_range());
    }

    Ok(())
}

/// Run the compiler on `job`, naming the job and error kind on rejection.
fn compile(config: &config::Config, job: &mut Job) -> Result<CompileReport> {
    let compiler = JobCompiler::new(config.compiler.options());
    match compiler.compile(job) {
        Ok(report) => Ok(report),
        Err(e) => {
            let kind = e.kind();
            Err(anyhow::Error::new(e).context(format!("Job {:?} rejected [{}]", job.name, kind)))
        }
    }
}

fn validate_job(job_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Validating job file: {:?}", job_path);
    let mut job = job_file::load_job(job_path, &config.compiler, None)?;

    // Compiled but never emitted.
    let report = compile(&config, &mut job)?;
    let settings = &job.settings;
    let frames = FrameSet::parse(&settings.frames)?;

    println!("✓ Job file is valid");
    println!("  Name: {}", job.name);
    println!("  Format: {}", settings.format);
    println!("  Frames: {} ({} frames)", frames, frames.len());
    println!("  Chunks: {} of at most {}", report.tasks, settings.chunk_size());
    println!("  Output: {}", report.render_output_path);
    if let Some(task) = job.tasks().first() {
        println!(
            "  Worker placeholders: {}",
            task.command.placeholders().join(", ")
        );
    }
    for warning in &report.warnings {
        println!("  Warning: {}", warning);
    }

    Ok(())
}
