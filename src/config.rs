// File: src/config.rs
use crate::core::ranker::KeywordRanker;
use crate::core::types::{TierCounts, TierMap};
use crate::error::{HookError, Result};
use crate::hooks::HookSettings;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File locations. Relative paths resolve against the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub hashtags: PathBuf,
    pub state: PathBuf,
    pub internal_keywords: PathBuf,
    pub stopwords: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            hashtags: PathBuf::from("data/hashtags.csv"),
            state: PathBuf::from("state/rotation.json"),
            internal_keywords: PathBuf::from("data/internal_keywords.csv"),
            stopwords: PathBuf::from("data/stopwords.txt"),
            output_dir: PathBuf::from("outputs"),
        }
    }
}

/// Requested hashtags per tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CountsConfig {
    pub broad: usize,
    pub mid: usize,
    pub niche: usize,
    pub local: usize,
}

impl Default for CountsConfig {
    fn default() -> Self {
        Self {
            broad: 7,
            mid: 7,
            niche: 6,
            local: 5,
        }
    }
}

impl CountsConfig {
    pub fn tier_counts(&self) -> TierCounts {
        TierMap::new(self.broad, self.mid, self.niche, self.local)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub counts: CountsConfig,
    pub ranker: KeywordRanker,
    pub hooks: HookSettings,
    /// Trend sources to query, by name.
    pub sources: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            counts: CountsConfig::default(),
            ranker: KeywordRanker::default(),
            hooks: HookSettings::default(),
            sources: vec!["google_trends".to_string(), "naver_blog".to_string()],
        }
    }
}

impl AppConfig {
    /// Reads a TOML config. Every section and field is optional.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| HookError::io(path, e))?;
        Self::parse(path, &text)
    }

    /// Like [`AppConfig::load`], but a missing file gives the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(path, &text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(HookError::io(path, e)),
        }
    }

    fn parse(path: &Path, text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| HookError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
