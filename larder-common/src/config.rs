//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_ENV_VAR: &str = "LARDER_ROOT";

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "LARDER_CONFIG";

/// Environment variable overriding the upstream recipe API base URL
pub const API_BASE_URL_ENV_VAR: &str = "LARDER_API_BASE_URL";

/// Public recipe API (no key required)
pub const DEFAULT_API_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Number of search matches resolved to full detail
pub const DEFAULT_SEARCH_DETAIL_LIMIT: usize = 10;

const DATABASE_FILE: &str = "larder.db";
const SESSION_FILE: &str = "session";

/// Contents of `config.toml`
///
/// Every field is optional; an absent file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing directive (`RUST_LOG` still takes precedence)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout; unset means requests may wait indefinitely
    pub request_timeout_secs: Option<u64>,
    pub search_detail_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            search_detail_limit: DEFAULT_SEARCH_DETAIL_LIMIT,
        }
    }
}

impl TomlConfig {
    /// Load the config file from its default location.
    ///
    /// A missing file is not an error: a warning is logged and defaults apply.
    pub fn load() -> Result<Self> {
        match config_file_path() {
            Some(path) => load_toml_config(&path),
            None => {
                warn!("Could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Upstream API base URL, `LARDER_API_BASE_URL` taking priority
    pub fn api_base_url(&self) -> String {
        match std::env::var(API_BASE_URL_ENV_VAR) {
            Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => self.api.base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Path of the config file: `LARDER_CONFIG`, else `<config dir>/larder/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("larder").join("config.toml"))
}

/// Parse a TOML config file, falling back to defaults when it does not exist
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!("Config file not found: {} (using defaults)", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Root folder resolution, highest priority first:
/// 1. Command-line argument
/// 2. `LARDER_ROOT` environment variable
/// 3. `root_folder` from the TOML config
/// 4. OS-dependent default
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\larder
        dirs::data_local_dir()
            .map(|d| d.join("larder"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\larder"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/larder
        dirs::data_dir()
            .map(|d| d.join("larder"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/larder"))
    } else {
        // ~/.local/share/larder
        dirs::data_local_dir()
            .map(|d| d.join("larder"))
            .unwrap_or_else(|| PathBuf::from("./larder_data"))
    }
}

/// Files living under the resolved root folder
#[derive(Debug, Clone)]
pub struct RootFolder {
    path: PathBuf,
}

impl RootFolder {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the root folder if it does not exist yet
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.path.exists() {
            std::fs::create_dir_all(&self.path)?;
            info!("Created root folder: {}", self.path.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.path.join(DATABASE_FILE)
    }

    /// File remembering the signed-in user id between CLI invocations
    pub fn session_path(&self) -> PathBuf {
        self.path.join(SESSION_FILE)
    }
}
