//! Profile configuration.
//!
//! The config file is JSON, by default at `~/.zephyr/config.json`:
//!
//! ```json
//! {
//!   "currentProfile": "default",
//!   "profiles": {
//!     "default": { "apiToken": "...", "projectKey": "PROJ" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context as _};
use serde::{Deserialize, Serialize};

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV_VAR: &str = "ZEPHYR_CONFIG_PATH";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub current_profile: String,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub api_token: String,
    pub project_key: String,
    /// API root, for the EU region or a mock server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Flag values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub config_path: Option<&'a Path>,
    pub profile: Option<&'a str>,
    pub api_token: Option<&'a str>,
    pub project_key: Option<&'a str>,
}

/// What a command runs with once flags, environment and profile are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_token: String,
    pub project_key: String,
    pub base_url: Option<String>,
}

fn sample_config() -> String {
    let mut profiles = BTreeMap::new();
    profiles.insert(
        "default".to_string(),
        Profile {
            api_token: "your-api-token".to_string(),
            project_key: "YOUR-PROJECT-KEY".to_string(),
            base_url: None,
        },
    );
    let sample = Config {
        current_profile: "default".to_string(),
        profiles,
    };
    serde_json::to_string_pretty(&sample).unwrap_or_default()
}

/// Config file location: `custom` > `$ZEPHYR_CONFIG_PATH` > `~/.zephyr/config.json`.
pub fn resolve_config_path(custom: Option<&Path>) -> anyhow::Result<PathBuf> {
    let from_env = std::env::var(CONFIG_PATH_ENV_VAR).ok();
    config_path_from(custom, from_env.as_deref(), home::home_dir())
}

fn config_path_from(
    custom: Option<&Path>,
    from_env: Option<&str>,
    home: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = custom {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = from_env.filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    home.map(|h| h.join(".zephyr").join("config.json"))
        .ok_or_else(|| anyhow!("Could not determine home directory; pass --config <PATH>"))
}

impl Config {
    /// Read and validate the config file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        tracing::debug!("Loading configuration from {}", path.display());
        if !path.exists() {
            bail!(
                "Configuration file not found at {}\n\nPlease create a configuration file with the following structure:\n\n{}",
                path.display(),
                sample_config()
            );
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            anyhow!(
                "Failed to parse configuration file {}: {}",
                path.display(),
                e
            )
        })?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid configuration file {}: {}", path.display(), e))?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.current_profile.trim().is_empty() {
            bail!("configuration must have a 'currentProfile' field");
        }
        if self.profiles.is_empty() {
            bail!("configuration must have at least one profile");
        }
        for (name, profile) in &self.profiles {
            if profile.api_token.trim().is_empty() {
                bail!("profile '{}' must have an 'apiToken' field", name);
            }
            if profile.project_key.trim().is_empty() {
                bail!("profile '{}' must have a 'projectKey' field", name);
            }
        }
        Ok(())
    }

    /// The named profile, or `currentProfile` when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> anyhow::Result<&Profile> {
        let name = name.unwrap_or(&self.current_profile);
        tracing::debug!("Using profile: {}", name);
        self.profiles.get(name).ok_or_else(|| {
            let available: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
            anyhow!(
                "Profile '{}' not found in configuration\n\nAvailable profiles: {}",
                name,
                available.join(", ")
            )
        })
    }
}

/// Merge flags, environment and the selected profile.
///
/// Token precedence is `--api-token` > `$ZEPHYR_API_TOKEN` > profile; the
/// project key comes from `--project-key` or the profile. When both values
/// are supplied without the file and no profile was asked for, a missing
/// config file is not an error.
pub fn resolve(overrides: &Overrides<'_>) -> anyhow::Result<Settings> {
    let path = resolve_config_path(overrides.config_path)?;
    let env_token = zephyr_sdk::auth::token_from_env().ok();
    resolve_from(overrides, &path, env_token)
}

fn resolve_from(
    overrides: &Overrides<'_>,
    path: &Path,
    env_token: Option<String>,
) -> anyhow::Result<Settings> {
    let token = overrides
        .api_token
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .or(env_token);
    let project_key = overrides
        .project_key
        .filter(|k| !k.trim().is_empty())
        .map(str::to_string);

    if let (Some(api_token), Some(project_key)) = (&token, &project_key) {
        if overrides.profile.is_none() && !path.exists() {
            tracing::debug!("No configuration file; using token and project key from flags");
            return Ok(Settings {
                api_token: api_token.clone(),
                project_key: project_key.clone(),
                base_url: None,
            });
        }
    }

    let config = Config::load(path)?;
    let profile = config.profile(overrides.profile)?;
    Ok(Settings {
        api_token: token.unwrap_or_else(|| profile.api_token.clone()),
        project_key: project_key.unwrap_or_else(|| profile.project_key.clone()),
        base_url: profile.base_url.clone(),
    })
}
