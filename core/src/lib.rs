//! Address lookup core for Brazilian postal codes (CEP).
//!
//! # Overview
//! Models the "search address by CEP" form: the input field, the request to
//! the ApiCEP CDN, and the loading / error / result state shown to the user.
//! The core builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). The caller executes
//! the actual HTTP round-trip, so every transition is deterministic and
//! testable.
//!
//! # Design
//! - `CepClient` is stateless: it holds only `base_url`.
//! - `LookupState` owns the four pieces of form state and exposes explicit
//!   transitions (`start_lookup`, `apply_success`, `apply_failure`).
//! - Every lookup gets a `RequestTicket`; only the latest ticket may commit,
//!   so overlapping requests resolve as latest-wins.
//! - `AddressLookup` glues the two together and is what hosts (CLI, FFI)
//!   drive.

pub mod client;
pub mod error;
pub mod http;
pub mod input;
pub mod lookup;
pub mod state;
pub mod types;

pub use client::{CepClient, DEFAULT_BASE_URL};
pub use error::{ApiError, LookupFailure, TransportError};
pub use http::{HttpExecutor, HttpMethod, HttpRequest, HttpResponse};
pub use input::CepInput;
pub use lookup::AddressLookup;
pub use state::{Commit, LookupState, LookupView, RequestTicket, ViewBody};
pub use types::Address;
