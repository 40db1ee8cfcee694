use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "csproj-version.toml";

/// Complete configuration for csproj-version.
///
/// Every value is a default that the matching command-line flag overrides.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub project: ProjectConfig,
}

/// Which implementation performs commits and tags
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// Run the `git` executable
    #[default]
    Command,
    /// Use libgit2 in-process
    Libgit2,
}

fn default_true() -> bool {
    true
}

/// Git integration settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub tag: bool,

    #[serde(default)]
    pub version_prefix: String,

    /// Commit message template; `{version}` and `{tag}` are substituted
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub backend: GitBackend,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            enabled: true,
            tag: true,
            version_prefix: String::new(),
            message: None,
            backend: GitBackend::default(),
        }
    }
}

/// Returns the default project file extensions.
fn default_extensions() -> Vec<String> {
    vec!["csproj".to_string()]
}

/// Project file discovery settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            extensions: default_extensions(),
        }
    }
}

impl GitConfig {
    /// Fill in the message template for a version and its tag.
    pub fn render_message(template: &str, version: &str, tag: &str) -> String {
        template.replace("{version}", version).replace("{tag}", tag)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `csproj-version.toml` in `working_dir`
/// 3. `csproj-version.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If an explicit file is missing, or a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, working_dir: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover(working_dir),
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        Error::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config: Config = toml::from_str(&config_str)
        .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

fn discover(working_dir: &Path) -> Option<PathBuf> {
    let local = working_dir.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}
