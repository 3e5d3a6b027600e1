//! A [`Transport`] serving canned responses.
//!
//! Responses are queued in memory or read from a JSON file of the form
//!
//! ```json
//! [
//!   { "status": 200, "body": { "_embedded": { "plugin_info": [] }, "_links": {} } },
//!   { "status": 200, "body": "a body that is sent verbatim" }
//! ]
//! ```
//!
//! A string `body` is served as is, any other JSON value is serialized.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::error::TransportError;
use crate::transport::{ApiVersion, Transport};

/// Environment variable pointing the CLI at a mock data file.
pub const MOCK_DATA_VAR: &str = "_PLUGIN_INFO_USE_MOCK";

// Arc allows pushing responses and inspecting requests from outside the client
// Mutex allows sharing across threads (necessary because of tokio)
type MockField<T> = Arc<Mutex<T>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockResponse {
    pub status: u16,
    pub body: Value,
}

impl MockResponse {
    fn body_text(&self) -> String {
        match &self.body {
            Value::String(raw) => raw.clone(),
            other => other.to_string(),
        }
    }
}

/// A request received by a [`MockClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    pub url: Url,
    pub version: ApiVersion,
}

#[derive(Debug, Error)]
pub enum MockDataError {
    /// Failed to read the mock data file
    #[error("failed to read mock response file")]
    ReadMockFile(#[source] std::io::Error),
    /// Failed to parse the contents of the mock data file as JSON
    #[error("failed to parse mock data as JSON")]
    ParseJson(#[source] serde_json::Error),
    /// The data was parsed as JSON but it wasn't semantically valid
    #[error("invalid mocked data: {0}")]
    InvalidData(String),
}

/// Reads a list of mock responses from disk.
fn read_mock_responses(path: impl AsRef<Path>) -> Result<VecDeque<MockResponse>, MockDataError> {
    let contents = std::fs::read_to_string(path).map_err(MockDataError::ReadMockFile)?;
    let responses: Vec<MockResponse> =
        serde_json::from_str(&contents).map_err(MockDataError::ParseJson)?;

    if let Some(invalid) = responses
        .iter()
        .find(|resp| StatusCode::from_u16(resp.status).is_err())
    {
        return Err(MockDataError::InvalidData(format!(
            "invalid status code {}",
            invalid.status
        )));
    }

    Ok(responses.into())
}

/// A transport that can be seeded with mock responses.
///
/// Clones share the same response queue and request log.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    responses: MockField<VecDeque<MockResponse>>,
    requests: MockField<Vec<MockRequest>>,
}

impl MockClient {
    /// Create a new mock client, potentially reading mock responses from disk
    pub fn new(mock_data_path: Option<impl AsRef<Path>>) -> Result<Self, MockDataError> {
        let responses = match mock_data_path {
            Some(path) => read_mock_responses(path)?,
            None => VecDeque::new(),
        };
        Ok(Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Default::default(),
        })
    }

    /// Queue a successful response with a JSON body.
    pub fn push_json_response(&self, body: Value) {
        self.push_response(MockResponse { status: 200, body });
    }

    /// Queue a response whose body is sent verbatim.
    pub fn push_raw_response(&self, status: u16, body: impl Into<String>) {
        self.push_response(MockResponse {
            status,
            body: Value::String(body.into()),
        });
    }

    pub fn push_response(&self, response: MockResponse) {
        self.responses
            .lock()
            .expect("couldn't acquire mock lock")
            .push_back(response);
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests
            .lock()
            .expect("couldn't acquire mock lock")
            .clone()
    }
}

impl Transport for MockClient {
    async fn get(&self, url: &Url, version: ApiVersion) -> Result<String, TransportError> {
        self.requests
            .lock()
            .expect("couldn't acquire mock lock")
            .push(MockRequest {
                url: url.clone(),
                version,
            });

        let response = self
            .responses
            .lock()
            .expect("couldn't acquire mock lock")
            .pop_front()
            .ok_or_else(|| TransportError::MockExhausted { url: url.clone() })?;

        debug!(%url, status = response.status, "serving mock response");

        let status =
            StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.clone(),
                status,
            });
        }

        Ok(response.body_text())
    }
}
