use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::history::NavigateMode;

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub history: HistoryConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    pub page_size: u32,
    pub timeout_ms: u64,
    pub cancel_superseded: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sandboxapi.ordercloud.io/v1".to_string(),
            access_token: None,
            page_size: 20,
            timeout_ms: 30_000,
            cancel_superseded: true,
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
    pub mode: NavigateMode,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            mode: NavigateMode::Push,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn,storefront=info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    pub fn sanitized(mut self) -> Self {
        self.catalog.page_size = self.catalog.page_size.max(1);
        self.catalog.timeout_ms = self.catalog.timeout_ms.max(1);
        let trimmed = self.catalog.base_url.trim().trim_end_matches('/');
        self.catalog.base_url = if trimmed.is_empty() {
            CatalogConfig::default().base_url
        } else {
            trimmed.to_string()
        };
        if self
            .catalog
            .access_token
            .as_deref()
            .is_some_and(|token| token.trim().is_empty())
        {
            self.catalog.access_token = None;
        }
        self.history.capacity = self.history.capacity.max(1);
        if self.log.filter.trim().is_empty() {
            self.log.filter = LogConfig::default().filter;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("STOREFRONT_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("storefront").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("storefront")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("storefront").join("config.toml"));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::Config;
    use crate::history::NavigateMode;

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "storefront_config_{suffix}_{}_{}",
            process::id(),
            nanos
        ));
        path
    }

    #[test]
    fn load_from_path_returns_defaults_for_missing_file() {
        let missing = unique_temp_path("missing.toml");
        let config = Config::load_from_path(&missing).expect("missing config should fallback");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_path_applies_partial_overrides_and_sanitizes() {
        let path = unique_temp_path("custom.toml");
        fs::write(
            &path,
            r#"
            [catalog]
            base_url = "https://api.example.test/v1/"
            access_token = "  "
            page_size = 0
            timeout_ms = 0

            [history]
            capacity = 0
            mode = "replace"
            "#,
        )
        .expect("config file should be written");

        let config = Config::load_from_path(&path).expect("config should parse");
        assert_eq!(config.catalog.base_url, "https://api.example.test/v1");
        assert_eq!(config.catalog.access_token, None);
        assert_eq!(config.catalog.page_size, 1);
        assert_eq!(config.catalog.timeout_ms, 1);
        assert!(config.catalog.cancel_superseded);
        assert_eq!(config.history.capacity, 1);
        assert_eq!(config.history.mode, NavigateMode::Replace);
        assert_eq!(config.log.filter, "warn,storefront=info");

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn load_from_path_rejects_malformed_toml() {
        let path = unique_temp_path("broken.toml");
        fs::write(&path, "[catalog\npage_size = 3").expect("config file should be written");

        let err = Config::load_from_path(&path).expect_err("broken config should fail");
        assert!(err.to_string().contains("failed to parse config"));

        fs::remove_file(&path).expect("config file should be removed");
    }
}
