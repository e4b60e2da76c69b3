use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "renderforge")]
#[command(author, version, about = "Render farm job compiler")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a job file into render tasks and print them as JSON
    Compile {
        /// Job file (TOML)
        #[arg(required = true)]
        job: PathBuf,

        /// Job creation time (RFC 3339), defaults to the job file or now
        #[arg(long)]
        created: Option<String>,

        /// Write the compiled job to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show how a frame range is split into render chunks
    Frames {
        /// Frame range, e.g. "1-30" or "3, 5-10, 47-327"
        #[arg(required = true)]
        expr: String,

        /// Maximum number of frames per chunk
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        chunk_size: i64,
    },

    /// Check a job file without compiling it
    Validate {
        /// Job file (TOML)
        #[arg(required = true)]
        job: PathBuf,
    },

    /// Display version information
    Version,
}
