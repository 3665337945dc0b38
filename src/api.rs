//! API module for talking to the analysis service
//!
//! This module provides the HTTP seam (`HttpTransport`) and the typed
//! client built on top of it. The controller only ever sees
//! `AnalysisClient`, so tests can swap the transport for a fake.

use crate::error::ServiceError;
use crate::types::{DocumentStats, HealthStatus, QueryRequest, ReportModel, TemplateSchema, TemplateType};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

const USER_AGENT: &str = concat!("corep-assistant/", env!("CARGO_PKG_VERSION"));

/// Minimal JSON-over-HTTP capability needed by the client
pub trait HttpTransport {
    /// POST `body` as JSON and return the decoded JSON response
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, ServiceError>;

    /// GET `url` and return the decoded JSON response
    fn get_json(&self, url: &str) -> Result<Value, ServiceError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, ServiceError> {
        (**self).post_json(url, body)
    }

    fn get_json(&self, url: &str) -> Result<Value, ServiceError> {
        (**self).get_json(url)
    }
}

/// Blocking transport backed by a `ureq::Agent`
///
/// No timeout and no retries are configured: a request runs until the
/// service answers or the connection fails.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new().user_agent(USER_AGENT).build();
        Self { agent }
    }

    fn read_response(result: Result<ureq::Response, ureq::Error>) -> Result<Value, ServiceError> {
        match result {
            Ok(resp) => {
                let body = resp.into_string().map_err(|e| ServiceError::Transport(e.to_string()))?;
                serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
            }
            Err(ureq::Error::Status(status, resp)) => {
                // An unreadable error body is treated like one without `detail`
                let body = resp.into_string().unwrap_or_default();
                debug!("service returned HTTP {} with {} byte body", status, body.len());
                Err(ServiceError::Status { status, detail: extract_detail(&body) })
            }
            Err(ureq::Error::Transport(transport)) => Err(ServiceError::Transport(transport.to_string())),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, ServiceError> {
        debug!("POST {}", url);
        let payload = serde_json::to_string(body).map_err(|e| ServiceError::Decode(e.to_string()))?;
        let result = self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .send_string(&payload);
        Self::read_response(result)
    }

    fn get_json(&self, url: &str) -> Result<Value, ServiceError> {
        debug!("GET {}", url);
        let result = self.agent.get(url).set("Accept", "application/json").call();
        Self::read_response(result)
    }
}

/// Pull the `detail` string out of an error body, if there is one
///
/// Bodies that are not JSON objects, or whose `detail` is not a string
/// (e.g. a list of validation problems), yield `None`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

/// Typed client for the analysis service
pub struct AnalysisClient<T> {
    transport: T,
    base_url: String,
}

impl<T: HttpTransport> AnalysisClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self { transport, base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Join `path` onto the base URL, tolerating a trailing slash on either side
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Submit a question and decode the full report
    pub fn query(&self, request: &QueryRequest) -> Result<ReportModel, ServiceError> {
        let body = serde_json::to_value(request).map_err(|e| ServiceError::Decode(e.to_string()))?;
        let response = self.transport.post_json(&self.endpoint("api/query"), &body)?;
        decode(response)
    }

    /// Service liveness and per-component readiness
    pub fn health(&self) -> Result<HealthStatus, ServiceError> {
        decode(self.transport.get_json(&self.endpoint("health"))?)
    }

    /// Size of the regulatory document collection behind the service
    pub fn document_stats(&self) -> Result<DocumentStats, ServiceError> {
        decode(self.transport.get_json(&self.endpoint("api/documents/stats"))?)
    }

    /// Field layout of one COREP template
    pub fn template_schema(&self, template_type: TemplateType) -> Result<TemplateSchema, ServiceError> {
        let path = format!("api/templates/{}", template_type.as_str());
        decode(self.transport.get_json(&self.endpoint(&path))?)
    }
}

fn decode<D: DeserializeOwned>(value: Value) -> Result<D, ServiceError> {
    serde_json::from_value(value).map_err(|e| ServiceError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
