// ABOUTME: Resolves the control-plane host and bearer token for a command
// ABOUTME: Precedence is flag/env, then ~/.yb/config.json, then the built-in default

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use yb_grpc::{static_token, TokenSupplier};

/// Control plane used when nothing else is configured.
pub const DEFAULT_CONTROLLER: &str = "controller.yottab.io:443";

/// Config directory name under the home directory.
pub const CONFIG_DIR: &str = ".yb";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_NAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk config written by `yb login` and friends. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct YbConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl YbConfig {
    /// Default config location (`~/.yb/config.json`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_NAME))
    }

    /// Load a config file. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Connection settings handed to the log-tail core.
pub struct Settings {
    pub host: String,
    pub tokens: TokenSupplier,
}

impl Settings {
    /// Resolve settings from command-line values and the config file.
    ///
    /// `host` and `token` already carry clap's flag-over-env precedence.
    pub fn resolve(host: Option<String>, token: Option<String>, config: Option<PathBuf>) -> Self {
        let path = config.or_else(YbConfig::default_path);
        let file = path.as_deref().and_then(load_or_warn).unwrap_or_default();

        let host = non_blank(host)
            .or_else(|| non_blank(file.host))
            .unwrap_or_else(|| DEFAULT_CONTROLLER.to_string());

        let tokens = match (non_blank(token), path) {
            (Some(token), _) => static_token(token),
            (None, Some(path)) => file_token_supplier(path),
            (None, None) => static_token(""),
        };

        tracing::debug!(%host, "resolved control-plane settings");
        Settings { host, tokens }
    }
}

/// Supplier that re-reads the token from `path` on every call, so a token
/// refreshed by another process is used by the next RPC.
pub fn file_token_supplier(path: PathBuf) -> TokenSupplier {
    Arc::new(move || {
        load_or_warn(&path)
            .and_then(|c| c.token)
            .unwrap_or_default()
    })
}

fn load_or_warn(path: &Path) -> Option<YbConfig> {
    match YbConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config file");
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
