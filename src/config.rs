//! Configuration for Showtrack

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::NewShow;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "showtrack.toml";

pub const HOST_ENV: &str = "SHOWTRACK_HOST";
pub const PORT_ENV: &str = "SHOWTRACK_PORT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shows loaded into the store at startup
    #[serde(default)]
    pub seed: Vec<NewShow>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            seed: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from `path`, or from `./showtrack.toml` if present,
    /// then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(&fallback)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a config file. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Override fields from environment variables, looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV) {
            self.host = host;
        }

        if let Some(port) = lookup(PORT_ENV) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{PORT_ENV} is not a valid port: {port:?}")))?;
        }

        Ok(())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Write this config to a new file. Refuses to replace an existing file
    /// unless `force` is set.
    pub fn write_new(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(Error::Config(format!(
                "{} already exists. Use --force to overwrite it.",
                path.display()
            )));
        }
        self.save(path)
    }

    /// `host:port` string for binding the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Default value functions

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}
