use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config as HierarchicalConfig, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Name of the managed configuration directory
pub const CONFIG_DIR_NAME: &str = "plugin-info";
pub const CONFIG_DIR_VAR: &str = "PLUGIN_INFO_CONFIG_DIR";
pub const CONFIG_FILE: &str = "plugin-info.toml";
/// Prefix of environment variables overriding config keys,
/// e.g. `PLUGIN_INFO_SERVER_URL`.
const ENV_PREFIX: &str = "PLUGIN_INFO";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8153";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the GoCD server
    pub server_url: Url,

    /// Token sent as bearer authorization with every request
    pub token: Option<String>,

    /// User agent to send instead of the default
    pub user_agent: Option<String>,

    /// Additional headers to include in requests
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,
}

impl Config {
    /// Read the configuration from `/etc`, the user's configuration
    /// directory and the environment, in increasing precedence.
    pub fn parse() -> Result<Config> {
        let system_file = PathBuf::from("/etc").join(CONFIG_FILE);
        Self::read(&system_file, user_config_dir().as_deref())
    }

    fn read(system_file: &Path, config_dir: Option<&Path>) -> Result<Config> {
        let mut builder = HierarchicalConfig::builder()
            .set_default("server_url", DEFAULT_SERVER_URL)?
            .add_source(
                File::from(system_file.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            );

        match config_dir {
            Some(config_dir) => {
                let user_file = config_dir.join(CONFIG_FILE);
                debug!(path = %user_file.display(), "reading user config");
                builder = builder.add_source(
                    File::from(user_file)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            },
            None => debug!("no user config directory found"),
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("could not read configuration")?
            .try_deserialize::<Config>()
            .context("invalid configuration")?;

        Ok(config)
    }
}

/// `$PLUGIN_INFO_CONFIG_DIR` if set, the platform configuration directory otherwise
fn user_config_dir() -> Option<PathBuf> {
    match env::var(CONFIG_DIR_VAR) {
        Ok(dir) => {
            debug!("`${CONFIG_DIR_VAR}` set: {dir}");
            Some(dir.into())
        },
        Err(_) => dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME)),
    }
}
