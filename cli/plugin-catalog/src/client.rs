//! Client for the plugin info listing.

use std::fmt::Debug;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::PluginCatalogConfig;
use crate::error::{PluginInfoError, TransportError};
use crate::query::{PluginInfoQuery, plugin_info_url};
use crate::transport::{ApiVersion, Client, HttpClient, Transport};
use crate::types::{Links, PluginInfo};

/// API version of the plugin info listing.
const API_VERSION: ApiVersion = ApiVersion::V4;

/// Response body of the listing endpoint.
///
/// Items stay untyped until they are mapped one by one,
/// so that a malformed record can be reported by position.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "_links", default)]
    links: Links,
    #[serde(rename = "_embedded")]
    embedded: Embedded,
}

#[derive(Debug, Deserialize)]
struct Embedded {
    plugin_info: Vec<Value>,
}

/// A client for the plugin info listing of a server.
///
/// Calls are independent of each other; the client holds no state
/// between them apart from its transport.
pub struct PluginInfoClient {
    server_url: Url,
    transport: Client,
}

impl Debug for PluginInfoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginInfoClient")
            .field("server_url", &self.server_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PluginInfoClient {
    /// Create a client talking HTTP to the configured server.
    pub fn new(config: PluginCatalogConfig) -> Result<Self, TransportError> {
        let transport = HttpClient::new(&config)?;
        Ok(Self::with_transport(config.server_url, transport))
    }

    /// Create a client sending its requests through `transport`.
    pub fn with_transport(server_url: Url, transport: impl Into<Client>) -> Self {
        Self {
            server_url,
            transport: transport.into(),
        }
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// List the plugins matching `query`, in the order the server returns them.
    ///
    /// Makes exactly one request. Transport failures are returned unchanged
    /// as [`PluginInfoError::Transport`].
    #[instrument(skip(self), fields(server_url = %self.server_url))]
    pub async fn list(&self, query: &PluginInfoQuery) -> Result<Vec<PluginInfo>, PluginInfoError> {
        let url = plugin_info_url(&self.server_url, query).map_err(PluginInfoError::InvalidUrl)?;

        let body = self.transport.get(&url, API_VERSION).await?;

        let envelope: Envelope =
            serde_json::from_str(&body).map_err(PluginInfoError::MalformedEnvelope)?;
        let links = envelope.links;

        let plugins = envelope
            .embedded
            .plugin_info
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                PluginInfo::from_json(item, &links)
                    .map_err(|source| PluginInfoError::MalformedRecord { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(n_plugins = plugins.len(), "received plugin infos");

        Ok(plugins)
    }
}
