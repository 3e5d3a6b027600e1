use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use plugin_catalog::{MOCK_DATA_VAR, MockClient, PluginCatalogConfig, PluginInfoClient};
use tracing::debug;

use crate::config::Config;

/// Initialize the plugin info client
///
/// - Initialize a mock client if `$_PLUGIN_INFO_USE_MOCK` points to a file of mock responses
/// - Initialize an HTTP client for the configured server otherwise
pub fn init_client(config: &Config) -> Result<PluginInfoClient> {
    if let Ok(path_str) = std::env::var(MOCK_DATA_VAR) {
        let path = PathBuf::from(path_str);
        if !path.exists() {
            bail!("path to mock data file doesn't exist: {}", path.display());
        }

        debug!(mock_data_path = %path.display(), "using mock plugin info client");
        let mock = MockClient::new(Some(&path)).context("could not load mock responses")?;
        return Ok(PluginInfoClient::with_transport(
            config.server_url.clone(),
            mock,
        ));
    }

    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(|| format!("plugin-info/{}", env!("CARGO_PKG_VERSION")));

    let client_config = PluginCatalogConfig {
        server_url: config.server_url.clone(),
        token: config.token.clone(),
        extra_headers: config.extra_headers.clone(),
        user_agent: Some(user_agent),
    };

    debug!(server_url = %client_config.server_url, "using plugin info client");
    PluginInfoClient::new(client_config).context("could not create plugin info client")
}
