use renderforge_compiler::author::{AuthorOptions, DEFAULT_STARTUP_SCRIPT};
use renderforge_compiler::settings::DEFAULT_CHUNK_SIZE;
use renderforge_compiler::CompilerOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompilerConfig {
    /// Worker capability tag put on every render task
    #[serde(default = "default_worker_type")]
    pub worker_type: String,

    /// Command type put on every render command
    #[serde(default = "default_command_name")]
    pub command_name: String,

    /// Start-up script file name in the staged job directory
    #[serde(default = "default_startup_script")]
    pub startup_script: String,

    /// Chunk size for job files that do not set one
    #[serde(default = "default_chunk_size")]
    pub default_chunk_size: i64,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            worker_type: default_worker_type(),
            command_name: default_command_name(),
            startup_script: default_startup_script(),
            default_chunk_size: default_chunk_size(),
        }
    }
}

impl CompilerConfig {
    pub fn options(&self) -> CompilerOptions {
        CompilerOptions {
            author: AuthorOptions {
                worker_type: self.worker_type.clone(),
                command_name: self.command_name.clone(),
                startup_script: self.startup_script.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Pretty-print emitted JSON
    #[serde(default)]
    pub pretty: bool,
}

fn default_worker_type() -> String {
    AuthorOptions::default().worker_type
}

fn default_command_name() -> String {
    AuthorOptions::default().command_name
}

fn default_startup_script() -> String {
    DEFAULT_STARTUP_SCRIPT.to_string()
}

fn default_chunk_size() -> i64 {
    DEFAULT_CHUNK_SIZE
}
