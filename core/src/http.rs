//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! builds `HttpRequest` values and parses `HttpResponse` values without ever
//! touching the network; the host is responsible for executing the actual
//! I/O. All fields use owned types so values can cross the FFI boundary
//! without lifetime concerns.

use crate::error::TransportError;

/// HTTP method for a request. The ApiCEP CDN is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `CepClient::build_lookup`. The caller executes it and hands the
/// corresponding `HttpResponse` back to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Response with the given status and body and no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Something that can execute an `HttpRequest` synchronously.
///
/// Hosts that own their own event loop (mobile UIs over FFI) skip this and
/// call `AddressLookup::begin_fetch` / `finish_fetch` directly.
pub trait HttpExecutor {
    /// Execute `request`. Non-2xx statuses are returned as responses, not
    /// as errors; `Err` is reserved for transport failures.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<E: HttpExecutor + ?Sized> HttpExecutor for &E {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}
