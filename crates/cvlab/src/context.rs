//! Global context for CLI commands

use anyhow::{Context as _, Result};
use cvlab_core::config::Config;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration and working directory shared by every command
pub struct Context {
    pub config: Config,
    pub cwd: PathBuf,
    pub verbose: bool,
}

impl Context {
    /// Load `config_path`, or `cvlab.toml` in the working directory when present
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or is invalid
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let cwd = env::current_dir()?;
        let config = Config::load_or_default(config_path, &cwd)
            .context("Failed to load configuration")?;

        Ok(Self {
            config,
            cwd,
            verbose,
        })
    }

    /// Resolve a configured path against the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
