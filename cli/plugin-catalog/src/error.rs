//! Error handling for plugin catalog operations.

use reqwest::StatusCode;
use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;
use url::Url;

/// Failures of the transport performing the actual request.
///
/// These are surfaced unchanged through [`PluginInfoError::Transport`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid header name '{name}'")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: InvalidHeaderName,
    },
    #[error("invalid value for header '{name}'")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: InvalidHeaderValue,
    },
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
    #[error("request to '{url}' failed")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("'{url}' responded with {status}")]
    Status { url: Url, status: StatusCode },
    #[error("no mock response left for request to '{url}'")]
    MockExhausted { url: Url },
}

impl TransportError {
    /// The HTTP status of an unsuccessful response, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Error type of [`crate::PluginInfoClient::list`].
#[derive(Debug, Error)]
pub enum PluginInfoError {
    #[error("could not build plugin info URL")]
    InvalidUrl(#[source] url::ParseError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("response is not a plugin info listing")]
    MalformedEnvelope(#[source] serde_json::Error),
    #[error("plugin info at position {index} is malformed")]
    MalformedRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}
