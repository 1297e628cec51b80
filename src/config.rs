use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::query::TokenPolicy;
use crate::service::DEFAULT_PAGE_SIZE;
use crate::storage::DEFAULT_POOL_SIZE;

pub const DEFAULT_PORT: u16 = 50051;

/// Contents of `explore.toml`; every key is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ExploreConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
    pub page_size: Option<usize>,
    pub pool_size: Option<usize>,
    pub strict_pagination_tokens: Option<bool>,
}

impl ExploreConfig {
    /// Defaults as written by `explore init`
    pub fn starter() -> Self {
        Self {
            database: Some(default_database_path().display().to_string()),
            port: Some(DEFAULT_PORT),
            page_size: Some(DEFAULT_PAGE_SIZE),
            pool_size: Some(DEFAULT_POOL_SIZE),
            strict_pagination_tokens: Some(false),
        }
    }

    /// Overlay `EXPLORE_DATABASE`, `PORT` and `EXPLORE_PAGE_SIZE`
    pub fn apply_env(&mut self) -> anyhow::Result<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(database) = lookup("EXPLORE_DATABASE").filter(|v| !v.is_empty()) {
            self.database = Some(database);
        }
        if let Some(port) = lookup("PORT").filter(|v| !v.is_empty()) {
            self.port = Some(
                port.parse()
                    .map_err(|e| anyhow::anyhow!("invalid PORT {:?}: {}", port, e))?,
            );
        }
        if let Some(size) = lookup("EXPLORE_PAGE_SIZE").filter(|v| !v.is_empty()) {
            self.page_size = Some(
                size.parse()
                    .map_err(|e| anyhow::anyhow!("invalid EXPLORE_PAGE_SIZE {:?}: {}", size, e))?,
            );
        }
        Ok(())
    }

    /// Fill in defaults for anything left unset
    pub fn resolve(&self) -> Settings {
        Settings {
            database: self
                .database
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(default_database_path),
            port: self.port.unwrap_or(DEFAULT_PORT),
            page_size: self.page_size.filter(|n| *n > 0).unwrap_or(DEFAULT_PAGE_SIZE),
            pool_size: self.pool_size.filter(|n| *n > 0).unwrap_or(DEFAULT_POOL_SIZE),
            token_policy: if self.strict_pagination_tokens.unwrap_or(false) {
                TokenPolicy::Strict
            } else {
                TokenPolicy::Lenient
            },
        }
    }
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database: PathBuf,
    pub port: u16,
    pub page_size: usize,
    pub pool_size: usize,
    pub token_policy: TokenPolicy,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("explore.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from(".explore").join("explore.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ExploreConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ExploreConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &ExploreConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
