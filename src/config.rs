use crate::domain::{Scheme, VersioningPolicy};
use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file names looked up in the working directory.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["repos.json", "repos.toml"];

/// Represents the complete configuration for version-scanner.
///
/// Contains the list of repositories to watch together with their current versions.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub repositories: Vec<Repository>,
}

fn default_repository_type() -> String {
    "git".to_string()
}

/// A watched repository and the version currently deployed from it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,

    #[serde(rename = "type", default = "default_repository_type")]
    pub kind: String,

    pub url: String,

    #[serde(default)]
    pub current_version: String,

    #[serde(default)]
    pub versioning: Versioning,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
}

/// Versioning rules as written in the configuration file.
///
/// The scheme stays a plain string here so that an unknown value surfaces as an
/// error for that repository only.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Versioning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_suffixes: Vec<String>,
}

impl Versioning {
    /// Resolve into a typed policy; an unset scheme means semver.
    pub fn policy(&self) -> Result<VersioningPolicy> {
        let scheme = Scheme::resolve(self.scheme.as_deref())?;
        Ok(VersioningPolicy::new(scheme)
            .with_prefix(self.ignore_prefix.clone().unwrap_or_default())
            .with_suffixes(self.ignore_suffixes.iter().cloned()))
    }
}

/// Credentials for private repositories, read from an environment variable.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Auth {
    /// `token` or `ssh`
    #[serde(rename = "type")]
    pub kind: String,

    pub env_variable: String,
}

impl Config {
    /// Find a repository by its configured name.
    pub fn find_repository(&self, name: &str) -> Option<&Repository> {
        self.repositories.iter().find(|repo| repo.name == name)
    }

    /// Check for problems that make the whole configuration unusable.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (index, repo) in self.repositories.iter().enumerate() {
            if repo.name.trim().is_empty() {
                return Err(ScanError::config(format!(
                    "repository #{} has no name",
                    index + 1
                )));
            }
            if repo.url.trim().is_empty() {
                return Err(ScanError::config(format!(
                    "repository '{}' has no url",
                    repo.name
                )));
            }
            if !seen.insert(repo.name.as_str()) {
                return Err(ScanError::config(format!(
                    "duplicate repository name '{}'",
                    repo.name
                )));
            }
        }
        Ok(())
    }
}

/// Parse configuration text, choosing the format from the file extension.
///
/// `.toml` files are read as TOML; everything else is treated as JSON.
pub fn parse_config(content: &str, path: &Path) -> Result<Config> {
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let config: Config = if is_toml {
        toml::from_str(content)
            .map_err(|e| ScanError::config(format!("{}: {}", path.display(), e)))?
    } else {
        serde_json::from_str(content)
            .map_err(|e| ScanError::config(format!("{}: {}", path.display(), e)))?
    };

    config.validate()?;
    Ok(config)
}

/// Locate the configuration file when none was given explicitly.
///
/// Looks for `repos.json`, then `repos.toml` in the current directory, then
/// `version-scanner/repos.json` in the user config directory.
pub fn find_config_file() -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
        .or_else(|| {
            dirs::config_dir()
                .map(|dir| dir.join("version-scanner").join("repos.json"))
                .filter(|path| path.exists())
        })
}

/// Loads and validates the configuration file.
///
/// # Arguments
/// * `config_path` - Optional explicit path; otherwise [`find_config_file`] is used
///
/// # Returns
/// * `Ok(Config)` - Loaded configuration
/// * `Err` - If no file is found, or it cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => find_config_file().ok_or_else(|| {
            ScanError::config(format!(
                "no configuration file found (looked for {})",
                DEFAULT_CONFIG_FILES.join(", ")
            ))
        })?,
    };

    let content = fs::read_to_string(&path)
        .map_err(|e| ScanError::config(format!("cannot read {}: {}", path.display(), e)))?;

    parse_config(&content, &path)
}
