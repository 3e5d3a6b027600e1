//! Transports performing the HTTP requests of [`crate::PluginInfoClient`].

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use enum_dispatch::enum_dispatch;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, trace};
use url::Url;

use crate::config::PluginCatalogConfig;
use crate::error::TransportError;
use crate::mock::MockClient;

/// Version of the server's API contract a request is made against.
///
/// The server selects the response format from the `Accept` media type,
/// e.g. `application/vnd.go.cd.v4+json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApiVersion(u8);

impl ApiVersion {
    pub const V4: ApiVersion = ApiVersion(4);

    pub fn accept_header(&self) -> String {
        format!("application/vnd.go.cd.{self}+json")
    }
}

impl Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Performs a GET request and returns the body of a successful response.
#[enum_dispatch]
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// GET `url`, asking for the response format of `version`.
    ///
    /// Responses with a non-success status are errors.
    async fn get(&self, url: &Url, version: ApiVersion) -> Result<String, TransportError>;
}

/// Either a transport talking to an actual server,
/// or a mock transport for testing.
#[derive(Debug)]
#[enum_dispatch(Transport)]
pub enum Client {
    Http(HttpClient),
    Mock(MockClient),
}

/// A [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &PluginCatalogConfig) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl Transport for HttpClient {
    async fn get(&self, url: &Url, version: ApiVersion) -> Result<String, TransportError> {
        debug!(%url, %version, "sending GET request");

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, version.accept_header())
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.clone(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        trace!(%status, len = body.len(), "received response");
        Ok(body)
    }
}

// ---------------------------------------------------------------------------
// HTTP client builder
// ---------------------------------------------------------------------------

/// Build the HTTP client with bearer token auth and extra default headers.
fn build_http_client(config: &PluginCatalogConfig) -> Result<reqwest::Client, TransportError> {
    let mut headers = HeaderMap::new();

    if let Some(token) = &config.token {
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("bearer {token}")).map_err(|source| {
                TransportError::InvalidHeaderValue {
                    name: header::AUTHORIZATION.to_string(),
                    source,
                }
            })?,
        );
    }

    for (key, value) in &config.extra_headers {
        headers.insert(
            HeaderName::from_str(key).map_err(|source| TransportError::InvalidHeaderName {
                name: key.clone(),
                source,
            })?,
            HeaderValue::from_str(value).map_err(|source| TransportError::InvalidHeaderValue {
                name: key.clone(),
                source,
            })?,
        );
    }

    debug!(
        server_url = %config.server_url,
        has_token = config.token.is_some(),
        extra_headers = config.extra_headers.len(),
        "building plugin catalog HTTP client"
    );

    let client_builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(15))
        .timeout(Duration::from_secs(60));

    let client_builder = if let Some(ref user_agent) = config.user_agent {
        client_builder.user_agent(user_agent)
    } else {
        client_builder
    };

    client_builder.build().map_err(TransportError::Build)
}
