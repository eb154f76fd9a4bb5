//! Error types for the CEP lookup core.
//!
//! # Design
//! `ApiError` is what `CepClient::parse_lookup` returns and keeps enough
//! detail for logs. `LookupFailure` is what the user sees: the form only ever
//! shows one of two fixed messages, so every `ApiError` and every transport
//! failure collapses into one of its two variants.

use thiserror::Error;

/// Errors returned by `CepClient::parse_lookup`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The upstream answered, but its body says the CEP does not resolve
    /// (`status != 200` or `ok` falsy).
    #[error("CEP not found (upstream status {status:?})")]
    NotFound { status: Option<f64> },

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body is not a JSON object.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

/// I/O failure reported by the host that executed an `HttpRequest`
/// (DNS, connection refused, timeout, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// User-visible failure category of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    /// The upstream does not know the CEP.
    NotFound,
    /// The request itself failed.
    FetchFailed,
}

impl LookupFailure {
    pub const NOT_FOUND_MESSAGE: &'static str = "CEP não encontrado.";
    pub const FETCH_FAILED_MESSAGE: &'static str = "Erro ao buscar o endereço.";

    /// The message rendered in the form's error line.
    pub fn message(&self) -> &'static str {
        match self {
            LookupFailure::NotFound => Self::NOT_FOUND_MESSAGE,
            LookupFailure::FetchFailed => Self::FETCH_FAILED_MESSAGE,
        }
    }
}

impl std::fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<&ApiError> for LookupFailure {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::NotFound { .. } => LookupFailure::NotFound,
            ApiError::HttpError { .. } | ApiError::Deserialization(_) => LookupFailure::FetchFailed,
        }
    }
}

impl From<&TransportError> for LookupFailure {
    fn from(_: &TransportError) -> Self {
        LookupFailure::FetchFailed
    }
}
