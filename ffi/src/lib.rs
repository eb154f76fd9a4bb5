//! C-ABI wrapper around `cep-core`.
//!
//! # Overview
//! Lets a mobile UI (Swift, Kotlin/Native, or anything with a C FFI) drive
//! the address lookup form: feed keystrokes, start a lookup, execute the
//! returned request with the platform's own HTTP stack, report the outcome,
//! and render the resulting view.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `cep_lookup_begin` returns the request together with its ticket; the
//!   host echoes the ticket back, so overlapping lookups resolve as
//!   latest-wins inside the core.
//! - The host owns all returned pointers and must call the matching
//!   `cep_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use cep_core::{AddressLookup, CepClient, HttpResponse, RequestTicket, TransportError};

use types::*;

/// Borrow a C string as `&str`, treating invalid UTF-8 as empty.
///
/// # Safety
/// `s` must be non-null and point to a NUL-terminated string.
unsafe fn str_arg<'a>(s: *const c_char) -> &'a str {
    CStr::from_ptr(s).to_str().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Create a new lookup form bound to `base_url`, or to the public ApiCEP
/// CDN when `base_url` is null.
///
/// Returns null if an internal panic occurs.
/// The caller must free the returned pointer with `cep_lookup_free`.
#[unsafe(no_mangle)]
pub extern "C" fn cep_lookup_new(base_url: *const c_char) -> *mut FfiAddressLookup {
    catch_unwind(|| {
        let client = if base_url.is_null() {
            CepClient::default()
        } else {
            CepClient::new(unsafe { str_arg(base_url) })
        };
        Box::into_raw(Box::new(FfiAddressLookup {
            inner: AddressLookup::new(client),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a lookup form created by `cep_lookup_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn cep_lookup_free(lookup: *mut FfiAddressLookup) {
    if !lookup.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(lookup) });
        });
    }
}

// ---------------------------------------------------------------------------
// Input field
// ---------------------------------------------------------------------------

/// Replace the CEP field's text. Anything past 8 characters is dropped.
///
/// Returns false, leaving the field unchanged, if either argument is null
/// or `text` is not valid UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn cep_lookup_set_input(lookup: *mut FfiAddressLookup, text: *const c_char) -> bool {
    catch_unwind(|| {
        if lookup.is_null() || text.is_null() {
            return false;
        }
        let Ok(text) = unsafe { CStr::from_ptr(text) }.to_str() else {
            return false;
        };
        let lookup = unsafe { &mut *lookup };
        lookup.inner.input_mut().set_text(text);
        true
    })
    .unwrap_or(false)
}

/// Current text of the CEP field, to echo back into the text control.
///
/// Returns null if `lookup` is null. Free with `cep_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn cep_lookup_input(lookup: *const FfiAddressLookup) -> *mut c_char {
    catch_unwind(|| {
        if lookup.is_null() {
            return std::ptr::null_mut();
        }
        let lookup = unsafe { &*lookup };
        to_c_string(lookup.inner.input().as_str())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Lookup cycle
// ---------------------------------------------------------------------------

/// Start a lookup for the current input ("Buscar" pressed).
///
/// The form enters the loading state immediately. Returns the request to
/// execute, or null if `lookup` is null. Free with `cep_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn cep_lookup_begin(lookup: *mut FfiAddressLookup) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if lookup.is_null() {
            return std::ptr::null_mut();
        }
        let lookup = unsafe { &mut *lookup };
        let (ticket, req) = lookup.inner.begin_fetch();
        FfiHttpRequest::from_core(ticket, req)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Report the HTTP response received for `ticket`.
///
/// A null `body` is read as an empty body.
#[unsafe(no_mangle)]
pub extern "C" fn cep_lookup_complete(
    lookup: *mut FfiAddressLookup,
    ticket: u64,
    response: *const FfiHttpResponse,
) -> FfiCommit {
    catch_unwind(|| {
        if lookup.is_null() || response.is_null() {
            return FfiCommit::NullArg;
        }
        let lookup = unsafe { &mut *lookup };
        let resp = unsafe { &*response };
        let body = if resp.body.is_null() {
            String::new()
        } else {
            unsafe { str_arg(resp.body) }.to_string()
        };
        let outcome = Ok(HttpResponse::new(resp.status, body));
        lookup.inner.finish_fetch(RequestTicket(ticket), outcome).into()
    })
    .unwrap_or(FfiCommit::Panic)
}

/// Report that the request for `ticket` failed before a response arrived
/// (DNS, connection, timeout). `message` is optional and only logged.
#[unsafe(no_mangle)]
pub extern "C" fn cep_lookup_fail(
    lookup: *mut FfiAddressLookup,
    ticket: u64,
    message: *const c_char,
) -> FfiCommit {
    catch_unwind(|| {
        if lookup.is_null() {
            return FfiCommit::NullArg;
        }
        let lookup = unsafe { &mut *lookup };
        let msg = if message.is_null() {
            "unspecified transport failure"
        } else {
            unsafe { str_arg(message) }
        };
        let outcome = Err(TransportError::new(msg));
        lookup.inner.finish_fetch(RequestTicket(ticket), outcome).into()
    })
    .unwrap_or(FfiCommit::Panic)
}

/// Snapshot of what the form should render now.
///
/// Returns null if `lookup` is null. Free with `cep_free_view`.
#[unsafe(no_mangle)]
pub extern "C" fn cep_lookup_view(lookup: *const FfiAddressLookup) -> *mut FfiLookupView {
    catch_unwind(|| {
        if lookup.is_null() {
            return std::ptr::null_mut();
        }
        let lookup = unsafe { &*lookup };
        FfiLookupView::from_core(lookup.inner.view())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `cep_lookup_begin`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn cep_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiLookupView` returned by `cep_lookup_view`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn cep_free_view(view: *mut FfiLookupView) {
    if view.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let view = unsafe { Box::from_raw(view) };
        if !view.error_message.is_null() {
            drop(unsafe { CString::from_raw(view.error_message) });
        }
        if !view.address.is_null() {
            let address = unsafe { Box::from_raw(view.address) };
            address.free_fields();
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn cep_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
