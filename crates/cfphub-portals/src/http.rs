//! HTTP backend abstraction for portal APIs.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest; it never retries, a failed call surfaces immediately.

use std::fmt::Write as _;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::PortalClientConfig;
use crate::error::{PortalHttpError, PortalHttpResult};
use crate::parsing::decode_json;

/// Header carrying the portal name on every request.
pub const CORRELATION_HEADER: &str = "X-Correlation-ID";

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can fetch JSON from URLs.
///
/// Implementations must run the body through
/// [`decode_json`](crate::parsing::decode_json) so blank strings are `null`
/// before typed deserialization.
///
/// This is an implementation detail - external code should use the
/// `PortalClientPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> PortalHttpResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// One backend is built per portal; the portal name is sent as
/// [`CORRELATION_HEADER`] on every request.
pub struct ReqwestBackend {
    client: reqwest::Client,
    portal_name: String,
    log_requests: bool,
    log_responses: bool,
}

impl ReqwestBackend {
    /// Create a backend for `portal_name`.
    pub fn new(portal_name: &str, config: &PortalClientConfig) -> PortalHttpResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PortalHttpError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            portal_name: portal_name.to_string(),
            log_requests: config.log_requests,
            log_responses: config.log_responses,
        })
    }

    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        self.client
            .get(url.as_str())
            .header(CORRELATION_HEADER, &self.portal_name)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    // Logging must never fail a request: anything that cannot be rendered is
    // replaced by a placeholder.
    fn log_request(&self, request: &reqwest::Request) {
        if !self.log_requests {
            return;
        }
        let mut headers = String::new();
        for (name, value) in request.headers() {
            let _ = write!(
                headers,
                "{}: {}; ",
                name,
                value.to_str().unwrap_or("<non-ascii>")
            );
        }
        debug!(
            target: "cfphub.http",
            portal = %self.portal_name,
            method = %request.method(),
            url = %request.url(),
            headers = %headers.trim_end_matches("; "),
            "Portal request"
        );
    }

    fn log_response(&self, url: &Url, status: u16, body: &str) {
        if !self.log_responses {
            return;
        }
        debug!(
            target: "cfphub.http",
            portal = %self.portal_name,
            url = %url,
            status,
            body,
            "Portal response"
        );
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> PortalHttpResult<T> {
        let request = self.build_request(url).build()?;
        self.log_request(&request);

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        self.log_response(url, status.as_u16(), &body);

        if !status.is_success() {
            return Err(PortalHttpError::ApiRequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        decode_json(&body)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Canned response for the fake backend.
    #[derive(Clone)]
    pub enum CannedResponse {
        Json(serde_json::Value),
        Status(u16),
    }

    /// A fake HTTP backend that returns canned responses and records every
    /// requested URL.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: Vec<(String, CannedResponse)>,
        requested: Arc<Mutex<Vec<String>>>,
        hits: Arc<Mutex<HashMap<String, usize>>>,
    }

    impl FakeBackend {
        /// Create a new fake backend.
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a canned response for URLs ending with `url_suffix`.
        ///
        /// Suffixes are checked in insertion order; the first match wins.
        pub fn with_response(mut self, url_suffix: &str, response: CannedResponse) -> Self {
            self.responses.push((url_suffix.to_string(), response));
            self
        }

        /// Shorthand for a JSON response.
        pub fn with_json(self, url_suffix: &str, json: serde_json::Value) -> Self {
            self.with_response(url_suffix, CannedResponse::Json(json))
        }

        /// Every URL requested so far, in order.
        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }

        /// How many times `url_suffix` was served.
        pub fn hits(&self, url_suffix: &str) -> usize {
            self.hits
                .lock()
                .unwrap()
                .get(url_suffix)
                .copied()
                .unwrap_or(0)
        }

        fn find_response(&self, url: &str) -> Option<(String, CannedResponse)> {
            self.responses
                .iter()
                .find(|(suffix, _)| url.ends_with(suffix.as_str()))
                .cloned()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> PortalHttpResult<T> {
            self.requested.lock().unwrap().push(url.to_string());
            let (suffix, response) =
                self.find_response(url.as_str())
                    .ok_or_else(|| PortalHttpError::ApiRequestFailed {
                        status: 404,
                        url: url.to_string(),
                    })?;
            *self.hits.lock().unwrap().entry(suffix).or_default() += 1;

            match response {
                CannedResponse::Json(json) => decode_json(&json.to_string()),
                CannedResponse::Status(status) => Err(PortalHttpError::ApiRequestFailed {
                    status,
                    url: url.to_string(),
                }),
            }
        }
    }
}
