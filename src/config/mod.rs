mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./renderforge.toml",
        "~/.config/renderforge/config.toml",
        "/etc/renderforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let compiler = &config.compiler;

    for (key, value) in [
        ("worker_type", &compiler.worker_type),
        ("command_name", &compiler.command_name),
        ("startup_script", &compiler.startup_script),
    ] {
        if value.trim().is_empty() {
            anyhow::bail!("compiler.{} cannot be empty", key);
        }
    }

    if compiler.default_chunk_size < 1 {
        anyhow::bail!(
            "compiler.default_chunk_size must be at least 1, got {}",
            compiler.default_chunk_size
        );
    }

    Ok(())
}
