//! Application configuration
//!
//! Loaded from, in increasing priority:
//! - built-in defaults
//! - `~/.config/freq-translator/config.toml` (or an explicit path)
//! - environment variables (`FREQ_TRANSLATOR_DATA_DIR`, `FREQ_TRANSLATOR_BACKEND`)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "freq-translator";
const DATABASE_FILE: &str = "translator.redb";
const PROFILES_FILE: &str = "profiles.bin";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Redb,
    File,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redb" => Ok(StorageBackend::Redb),
            "file" => Ok(StorageBackend::File),
            other => bail!("unknown storage backend {other:?} (expected \"redb\" or \"file\")"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding the database and profile files
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|p| p.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    /// redb file holding the translation cache (and profiles, for the redb backend)
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join(DATABASE_FILE)
    }

    pub fn profiles_file(&self) -> PathBuf {
        self.data_dir().join(PROFILES_FILE)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    /// Upsert the bundled reference profiles at startup
    #[serde(default = "default_true")]
    pub on_startup: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { on_startup: true }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslationConfig {
    /// Target language for any detected language other than English
    #[serde(default = "default_target")]
    pub default_target: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            default_target: default_target(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_target() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub seed: SeedConfig,

    #[serde(default)]
    pub translation: TranslationConfig,
}

impl AppConfig {
    /// Load config with priority env > file > defaults.
    ///
    /// An explicit path must exist and parse; the default user config file is
    /// optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::user_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => AppConfig::default(),
            },
        };

        if let Ok(dir) = std::env::var("FREQ_TRANSLATOR_DATA_DIR") {
            config.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(backend) = std::env::var("FREQ_TRANSLATOR_BACKEND") {
            config.storage.backend = backend
                .parse()
                .context("invalid FREQ_TRANSLATOR_BACKEND")?;
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
    }
}
