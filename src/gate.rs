//! # Gate API Client
//!
//! The submitter and poller talk to Gate through the [`TaskApi`] trait, which
//! exposes the two calls the protocol needs:
//!
//! - `POST {endpoint}/tasks` to submit a job request
//! - `GET {endpoint}/tasks/{id}` to read a task record
//!
//! Both return the HTTP status together with the decoded JSON body, leaving
//! the decision about what a status means to the caller. [`GateClient`] is the
//! blocking `reqwest` implementation used by the binary; tests substitute an
//! in-memory fake.

use std::time::Duration;

use log::debug;
use serde_json::Value as JsonValue;
use url::Url;

use crate::config::BasicAuthConfig;
use crate::defaults::REQUEST_TIMEOUT;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::task::JobRequest;

/// Status code and decoded body of a Gate response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `None` when the body was empty or JSON `null`.
    pub body: Option<Document>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Option<Document>) -> Self {
        Self { status, body }
    }

    /// True for status codes in 200-299.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// The task endpoints of the orchestration API.
pub trait TaskApi {
    /// Submit a job request. Never retried by callers.
    fn create_task(&self, request: &JobRequest) -> Result<ApiResponse>;

    /// Read the current record of a task.
    fn get_task(&self, id: &str) -> Result<ApiResponse>;
}

/// Connection settings for [`GateClient`].
#[derive(Debug, Clone)]
pub struct GateOptions {
    pub endpoint: String,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    pub basic_auth: Option<BasicAuthConfig>,
    pub timeout: Duration,
}

impl GateOptions {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            insecure: false,
            basic_auth: None,
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn with_basic_auth(mut self, basic_auth: Option<BasicAuthConfig>) -> Self {
        self.basic_auth = basic_auth;
        self
    }
}

/// Blocking HTTP client for a Gate server.
pub struct GateClient {
    base_url: Url,
    client: reqwest::blocking::Client,
    basic_auth: Option<BasicAuthConfig>,
}

impl GateClient {
    pub fn new(options: GateOptions) -> Result<Self> {
        let base_url = Url::parse(&options.endpoint).map_err(|e| Error::Config {
            message: format!("invalid Gate endpoint '{}': {}", options.endpoint, e),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("Gate endpoint must be http or https, got '{}'", options.endpoint),
            });
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.insecure)
            .user_agent(concat!("spin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config {
                message: format!("could not build HTTP client: {}", e),
            })?;

        Ok(Self {
            base_url,
            client,
            basic_auth: options.basic_auth,
        })
    }

    /// `{endpoint}/tasks` followed by `segments`, each percent-encoded as a
    /// single path segment.
    fn tasks_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config {
                message: format!("Gate endpoint '{}' cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .push("tasks")
            .extend(segments);
        Ok(url)
    }

    fn authorize(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.basic_auth {
            Some(basic) => request.basic_auth(&basic.username, Some(&basic.password)),
            None => request,
        }
    }

    fn send(
        &self,
        operation: &str,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<ApiResponse> {
        let response = self
            .authorize(request)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| transport_error(operation, e))?;

        let status = response.status().as_u16();
        let text = response.text().map_err(|e| transport_error(operation, e))?;
        debug!("{} returned status {}", operation, status);

        let body = if (200..=299).contains(&status) {
            decode_body(operation, &text)?
        } else {
            decode_body(operation, &text).ok().flatten()
        };
        Ok(ApiResponse::new(status, body))
    }
}

impl TaskApi for GateClient {
    fn create_task(&self, request: &JobRequest) -> Result<ApiResponse> {
        let url = self.tasks_url(&[])?;
        debug!("POST {}", url);
        self.send("task submission", self.client.post(url).json(request))
    }

    fn get_task(&self, id: &str) -> Result<ApiResponse> {
        let url = self.tasks_url(&[id])?;
        debug!("GET {}", url);
        self.send("task status check", self.client.get(url))
    }
}

fn transport_error(operation: &str, err: reqwest::Error) -> Error {
    Error::Transport {
        operation: operation.to_string(),
        status: err.status().map(|s| s.as_u16()),
        message: err.to_string(),
    }
}

fn decode_body(operation: &str, text: &str) -> Result<Option<Document>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let json: JsonValue = serde_json::from_str(text).map_err(|e| Error::Protocol {
        message: format!("could not decode {} response: {}", operation, e),
    })?;
    if json.is_null() {
        return Ok(None);
    }
    Document::try_from(json).map(Some).map_err(|_| Error::Protocol {
        message: format!("{} response was not a JSON object", operation),
    })
}
