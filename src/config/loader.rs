use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names probed for configuration, in order, beside the input file
const DEFAULT_LOCATIONS: [&str; 2] = ["ctrim.toml", ".ctrim.toml"];

/// Configuration for a pruning run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Function names to retain; expanded to their transitive callees
    pub keep: Vec<String>,

    /// Names never to emit, regardless of reachability
    pub blacklist: Vec<String>,

    /// Output destination; stdout when absent
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to parse config file {}", path.display()))?;

        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Probe the default locations under `dir`; fall back to defaults when
    /// no config file exists
    pub fn from_default_locations(dir: &Path) -> Result<Self> {
        for name in DEFAULT_LOCATIONS {
            let candidate = dir.join(name);
            if candidate.exists() {
                return Self::from_file(&candidate);
            }
        }
        Ok(Self::default())
    }
}
