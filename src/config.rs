use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::models::RegionId;

/// Environment variable overriding `source.base_url`
pub const BASE_URL_ENV: &str = "CWS_BASE_URL";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub stage: StageConfig,
}

/// Where per-county topology files live and how they are named.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Local directory or http(s) URL the static files are served from
    pub base_url: String,
    pub data_dir: String,
    pub file_prefix: String,
    pub object_prefix: String,
    pub format: String,
}

/// Copy of the bundled data into the public directory
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StageConfig {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "./".to_string(),
            data_dir: "cws".to_string(),
            file_prefix: "county_systems".to_string(),
            object_prefix: "temp".to_string(),
            format: "json".to_string(),
        }
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            from: PathBuf::from("src/data/cws"),
            to: PathBuf::from("public/cws"),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        config.source.validate()?;
        Ok(config)
    }

    /// Apply `CWS_BASE_URL` if it is set and non-empty.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_base_url(std::env::var(BASE_URL_ENV).ok())
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Result<Self> {
        if let Some(base_url) = base_url.filter(|b| !b.trim().is_empty()) {
            self.source.base_url = base_url.trim().to_string();
            self.source.validate()?;
        }
        Ok(self)
    }
}

impl SourceConfig {
    /// Bases containing a scheme must be http(s) URLs.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.contains("://") {
            let url = Url::parse(&self.base_url)
                .with_context(|| format!("Invalid base_url {:?}", self.base_url))?;
            if !matches!(url.scheme(), "http" | "https") {
                bail!("Unsupported base_url scheme: {}", url.scheme());
            }
        }
        if self.format.is_empty() {
            bail!("source.format must not be empty");
        }
        Ok(())
    }

    pub fn is_remote(&self) -> bool {
        is_remote(&self.base_url)
    }

    /// `<base>/<data_dir>/<file_prefix>_<geoid>.<format>`
    pub fn location(&self, id: &RegionId) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        let mut location = base.to_string();
        if !self.data_dir.is_empty() {
            location.push('/');
            location.push_str(&self.data_dir);
        }
        location.push_str(&format!("/{}_{}.{}", self.file_prefix, id, self.format));
        location
    }

    /// Name of the county's object inside its topology
    pub fn object_name(&self, id: &RegionId) -> String {
        format!("{}_{}", self.object_prefix, id)
    }
}

/// True for http:// and https:// locations
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
