use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Github,
    Fs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_backoff_ms")]
    pub base_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_backoff_ms: default_backoff_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_backend")]
    pub backend: Backend,
    #[serde(default)]
    pub github_repo: String,
    #[serde(default = "default_branch")]
    pub github_branch: String,
    #[serde(default = "default_api_url")]
    pub github_api_url: String,
    #[serde(default = "default_raw_url")]
    pub github_raw_url: String,
    #[serde(default)]
    pub github_token: String,
    #[serde(default)]
    pub store_dir: Option<String>,
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    #[serde(default = "default_ledger_path")]
    pub ledger_path: String,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub access_passphrase: Option<String>,
    #[serde(default = "default_author")]
    pub author: String,
}

fn default_backend() -> Backend {
    Backend::Github
}
fn default_branch() -> String {
    "main".to_string()
}
fn default_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_raw_url() -> String {
    "https://raw.githubusercontent.com".to_string()
}
fn default_snapshot_path() -> String {
    "data/employees.json".to_string()
}
fn default_ledger_path() -> String {
    "data/pending_requests.json".to_string()
}
fn default_cache_ttl() -> u64 {
    30
}
fn default_http_timeout() -> u64 {
    20
}
fn default_max_attempts() -> usize {
    3
}
fn default_backoff_ms() -> u64 {
    150
}
fn default_author() -> String {
    "staffledger".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            github_repo: String::new(),
            github_branch: default_branch(),
            github_api_url: default_api_url(),
            github_raw_url: default_raw_url(),
            github_token: String::new(),
            store_dir: None,
            snapshot_path: default_snapshot_path(),
            ledger_path: default_ledger_path(),
            cache_ttl_secs: default_cache_ttl(),
            http_timeout_secs: default_http_timeout(),
            retry: RetryConfig::default(),
            access_passphrase: None,
            author: default_author(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("staffledger")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".staffledger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("staffledger.conf")
    }

    /// Return the full path of the local audit log
    pub fn audit_file() -> PathBuf {
        Self::config_dir().join("audit.log")
    }

    /// Load configuration from `path` (or the standard location), falling back
    /// to defaults when the file does not exist. `GITHUB_TOKEN` wins over the
    /// token stored in the file.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        let mut cfg = Self::read_file(&path)?;

        if let Ok(token) = env::var(TOKEN_ENV)
            && !token.trim().is_empty()
        {
            cfg.github_token = token.trim().to_string();
        }

        // keep the cache window short enough to notice reconciler updates
        cfg.cache_ttl_secs = cfg.cache_ttl_secs.clamp(10, 60);
        cfg.retry.max_attempts = cfg.retry.max_attempts.max(1);

        Ok(cfg)
    }

    /// Parse the file as is; defaults when it does not exist.
    fn read_file(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
        serde_yaml::from_str::<Config>(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))
    }

    /// YAML rendering with the token redacted, for `config --print`.
    pub fn to_redacted_yaml(&self) -> AppResult<String> {
        let mut shown = self.clone();
        if !shown.github_token.is_empty() {
            shown.github_token = "********".to_string();
        }
        if shown.access_passphrase.is_some() {
            shown.access_passphrase = Some("********".to_string());
        }
        serde_yaml::to_string(&shown).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize the configuration file (and the local store directory when
    /// the filesystem backend is selected). Returns the written config path.
    pub fn init_all(path: Option<&Path>, store_dir: Option<&str>) -> AppResult<PathBuf> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // re-read the file as is, without the environment overrides
        let mut config = Self::read_file(&path)?;

        if let Some(dir) = store_dir {
            config.backend = Backend::Fs;
            config.store_dir = Some(dir.to_string());
            fs::create_dir_all(crate::utils::path::expand_tilde(dir))?;
        }

        let yaml = serde_yaml::to_string(&config).map_err(|e| AppError::Config(e.to_string()))?;
        let mut file = fs::File::create(&path)?;
        file.write_all(yaml.as_bytes())?;

        Ok(path)
    }
}
