//! Layered settings loading
//!
//! Defaults, then an optional TOML file, then `PAPI_*` variables. Command line
//! overrides and validation are applied by the binary on top of the result.

use crate::{Result, config::Settings};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default configuration file location: `<config dir>/papi-lite/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("papi-lite").join("config.toml"))
}

/// Settings loader seeded with a set of defaults
#[derive(Debug)]
pub struct ConfigLoader {
    /// Default settings
    defaults: Settings,
}

impl ConfigLoader {
    /// Loader starting from the default settings
    pub fn new() -> Self {
        Self {
            defaults: Settings::default(),
        }
    }

    /// Load configuration with precedence order:
    /// 1. Command line arguments (highest priority, applied by the caller)
    /// 2. Environment variables
    /// 3. Configuration file
    /// 4. Default values (lowest priority)
    ///
    /// Validation is left to the caller so command line overrides can be
    /// applied first.
    pub fn load(&self, config_file: Option<&Path>) -> Result<Settings> {
        self.load_with_lookup(config_file, |name| std::env::var(name).ok())
    }

    /// Same as [`ConfigLoader::load`] with an injectable variable lookup
    pub fn load_with_lookup<F>(&self, config_file: Option<&Path>, lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = self.defaults.clone();

        // A missing file is not an error; the default path rarely exists
        if let Some(path) = config_file {
            if path.exists() {
                info!("Loading configuration from file: {:?}", path);
                settings = Settings::from_file(path)?;
            } else {
                warn!("Configuration file not found: {:?}, using defaults", path);
            }
        }

        debug!("Applying environment variable overrides");
        settings = settings.merge_with_lookup(lookup)?;

        debug!("Loaded configuration: {:?}", settings);
        Ok(settings)
    }

    /// Settings taken from `PAPI_*` variables alone, validated
    pub fn from_env_only(&self) -> Result<Settings> {
        let settings = Settings::from_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults the loader starts from
    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
