//! Configuration persisted between runs

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::court::{BisectionSolver, ShotClassifier};
use crate::error::{Error, Result};
use crate::roster::DEFAULT_PERIOD;
use crate::store::GameCode;

const APP_DIR: &str = "shot-counter";

/// Configuration for shot-counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one JSON document per game
    pub data_dir: PathBuf,
    /// Game opened when none is given on the command line
    pub game_code: Option<GameCode>,
    /// Period used for new shots when none is given
    pub default_period: u32,
    /// Bisection steps when locating the arc
    pub arc_iterations: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            game_code: None,
            default_period: DEFAULT_PERIOD,
            arc_iterations: BisectionSolver::default().iterations,
        }
    }
}

/// Default game directory, falling back to the working directory when the
/// platform has no data dir
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join(APP_DIR).join("games"))
        .unwrap_or_else(|| PathBuf::from("shot-counter-games"))
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join("config.json"))
    }

    /// Load config from disk, falling back to defaults if not found
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| Error::Config("no config directory on this platform".into()))?;
        self.save_to(&path)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.arc_iterations == 0 {
            return Err(Error::Config("arc_iterations must be at least 1".into()));
        }
        if self.default_period == 0 {
            return Err(Error::Config("default_period must be at least 1".into()));
        }
        Ok(())
    }

    /// Classifier using the configured solver precision
    pub fn classifier(&self) -> ShotClassifier<BisectionSolver> {
        ShotClassifier::with_solver(BisectionSolver::with_iterations(self.arc_iterations.max(1)))
    }
}
