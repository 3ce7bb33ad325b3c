//! Settings resolution for credentials and cache parameters
//!
//! Values are merged from three sources with increasing precedence: the
//! settings file, environment variables, then explicit command-line
//! arguments. The merged result is assembled once; whether credentials are
//! actually present is an explicit check on the assembled struct, performed
//! before any network call.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::Cli;

/// Environment variable holding the API client id
pub const ENV_CLIENT_ID: &str = "DIGITALOCEAN_CLIENT_ID";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "DIGITALOCEAN_API_KEY";

/// Default settings file, looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "digitalocean.toml";

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read
    #[error("failed to read settings file {}: {source}", .path.display())]
    ReadFailed {
        /// Path of the settings file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML
    #[error("failed to parse settings file {}: {source}", .path.display())]
    ParseFailed {
        /// Path of the settings file
        path: PathBuf,
        /// The underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// Neither source supplied both credential halves
    #[error(
        "could not find DigitalOcean values for client_id and api_key; \
         set them in digitalocean.toml, via the DIGITALOCEAN_CLIENT_ID and \
         DIGITALOCEAN_API_KEY environment variables, or with --client-id and --api-key"
    )]
    MissingCredentials,
}

/// Settings file schema
///
/// Every field is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSettings {
    /// DigitalOcean client id
    pub client_id: Option<String>,
    /// DigitalOcean API key
    pub api_key: Option<String>,
    /// Directory holding the cache artifacts
    pub cache_path: Option<PathBuf>,
    /// Maximum cache age in seconds
    pub cache_max_age: Option<u64>,
}

impl FileSettings {
    /// Loads the settings file, treating a missing file as empty settings.
    ///
    /// A file that exists but cannot be read or parsed is an error; silently
    /// ignoring it would mask a misconfigured credential source.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(ConfigError::ReadFailed {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Credential values read from the environment
///
/// Captured once so the rest of the program, and the tests, never consult
/// the process environment directly.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    /// Value of `DIGITALOCEAN_CLIENT_ID`, if set and non-empty
    pub client_id: Option<String>,
    /// Value of `DIGITALOCEAN_API_KEY`, if set and non-empty
    pub api_key: Option<String>,
}

impl EnvSettings {
    /// Captures the recognized environment variables
    pub fn capture() -> Self {
        Self {
            client_id: std::env::var(ENV_CLIENT_ID)
                .ok()
                .filter(|value| !value.is_empty()),
            api_key: std::env::var(ENV_API_KEY)
                .ok()
                .filter(|value| !value.is_empty()),
        }
    }
}

/// API credentials passed as request parameters on every call
#[derive(Debug, Clone)]
pub struct Credentials {
    /// DigitalOcean client id
    pub client_id: String,
    /// DigitalOcean API key
    pub api_key: String,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    /// Resolved client id, if any source supplied one
    pub client_id: Option<String>,
    /// Resolved API key, if any source supplied one
    pub api_key: Option<String>,
    /// Resolved cache directory, if any source supplied one
    pub cache_path: Option<PathBuf>,
    /// Resolved maximum cache age in seconds; 0 means always stale
    pub cache_max_age: u64,
}

impl Settings {
    /// Merges the three sources; later sources override earlier ones per
    /// field: settings file < environment < arguments.
    pub fn resolve(file: FileSettings, env: EnvSettings, cli: &Cli) -> Self {
        Self {
            client_id: cli.client_id.clone().or(env.client_id).or(file.client_id),
            api_key: cli.api_key.clone().or(env.api_key).or(file.api_key),
            cache_path: cli.cache_path.clone().or(file.cache_path),
            cache_max_age: cli.cache_max_age.or(file.cache_max_age).unwrap_or(0),
        }
    }

    /// Returns the credentials, failing when either half is missing
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        match (&self.client_id, &self.api_key) {
            (Some(client_id), Some(api_key)) => Ok(Credentials {
                client_id: client_id.clone(),
                api_key: api_key.clone(),
            }),
            _ => Err(ConfigError::MissingCredentials),
        }
    }
}
