//! HTTP client for the plugin info listing of a GoCD-style server.
//!
//! This crate provides:
//! - Query building for the `plugin_info` listing endpoint
//! - A transport abstraction with an HTTP implementation and a mock
//!   implementation serving canned responses
//! - Typed plugin records validated at the parse boundary
//!
//! ## Usage
//!
//! ```ignore
//! use plugin_catalog::{PluginCatalogConfig, PluginInfoClient, PluginInfoQuery};
//!
//! let config = PluginCatalogConfig::new(Url::parse("https://ci.example.com")?);
//! let client = PluginInfoClient::new(config)?;
//! let plugins = client
//!     .list(&PluginInfoQuery {
//!         include_bad: Some(true),
//!         extension_type: Some(ExtensionType::Authorization),
//!     })
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod mock;
mod query;
mod transport;
mod types;

pub use client::PluginInfoClient;
pub use config::PluginCatalogConfig;
pub use error::{PluginInfoError, TransportError};
pub use mock::{MOCK_DATA_VAR, MockClient, MockDataError, MockRequest, MockResponse};
pub use query::{PLUGIN_INFO_PATH, PluginInfoQuery, plugin_info_url};
pub use transport::{ApiVersion, Client, HttpClient, Transport};
pub use types::{
    About,
    Extension,
    ExtensionType,
    Link,
    Links,
    PluginInfo,
    PluginState,
    PluginStatus,
    Vendor,
};
