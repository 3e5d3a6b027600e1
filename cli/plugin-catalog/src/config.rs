//! Configuration types for plugin catalog client construction.

use std::collections::BTreeMap;

use url::Url;

/// Configuration for [`crate::PluginInfoClient`] construction.
#[derive(Debug, Clone)]
pub struct PluginCatalogConfig {
    /// Base URL of the server, e.g. `https://ci.example.com:8154`.
    pub server_url: Url,
    /// Optional bearer token sent with every request.
    pub token: Option<String>,
    /// Additional headers to include in requests.
    pub extra_headers: BTreeMap<String, String>,
    /// Overrides the default `reqwest` user agent.
    pub user_agent: Option<String>,
}

impl PluginCatalogConfig {
    pub fn new(server_url: Url) -> Self {
        Self {
            server_url,
            token: None,
            extra_headers: BTreeMap::new(),
            user_agent: None,
        }
    }
}
