//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use cep_core::{Address, AddressLookup, Commit, HttpMethod, HttpRequest, LookupView, RequestTicket, ViewBody};

/// Opaque handle to an `AddressLookup`. C callers receive a pointer to this
/// and pass it back into every FFI function. Not thread-safe: use it from
/// the UI thread only.
pub struct FfiAddressLookup {
    pub(crate) inner: AddressLookup,
}

/// Copy `s` into a heap C string. Interior NULs are dropped rather than
/// failing the whole conversion.
pub(crate) fn to_c_string(s: &str) -> *mut c_char {
    let cleaned: String = s.chars().filter(|c| *c != '\0').collect();
    CString::new(cleaned).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A lookup request described as C-compatible plain data.
///
/// Returned by `cep_lookup_begin`. The host executes it and reports back
/// through `cep_lookup_complete` or `cep_lookup_fail`, passing `ticket`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub ticket: u64,
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(ticket: RequestTicket, req: HttpRequest) -> *mut Self {
        let path = to_c_string(&req.path);
        let body = match req.body {
            Some(b) => to_c_string(&b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            ticket: ticket.0,
            method: req.method.into(),
            path,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host builds this on the stack after executing a request and passes a
/// pointer to `cep_lookup_complete`. The FFI layer reads but does not free
/// these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Commit / view types
// ---------------------------------------------------------------------------

/// Outcome of reporting a request's completion.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiCommit {
    /// The completion updated the form.
    Applied = 0,
    /// A newer lookup was started since; nothing changed.
    Stale = 1,
    NullArg = 2,
    Panic = 3,
}

impl From<Commit> for FfiCommit {
    fn from(c: Commit) -> Self {
        match c {
            Commit::Applied => FfiCommit::Applied,
            Commit::Stale => FfiCommit::Stale,
        }
    }
}

/// Tag that tells the host which part of `FfiLookupView` to render.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiViewKind {
    Empty = 0,
    Error = 1,
    Result = 2,
}

/// A resolved address exposed to C.
#[repr(C)]
pub struct FfiAddress {
    pub code: *mut c_char,
    pub address: *mut c_char,
    pub district: *mut c_char,
    pub city: *mut c_char,
    pub state: *mut c_char,
}

impl FfiAddress {
    fn from_core(addr: &Address) -> Self {
        FfiAddress {
            code: to_c_string(&addr.code),
            address: to_c_string(&addr.address),
            district: to_c_string(&addr.district),
            city: to_c_string(&addr.city),
            state: to_c_string(&addr.state),
        }
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        for field in [self.code, self.address, self.district, self.city, self.state] {
            if !field.is_null() {
                drop(unsafe { CString::from_raw(field) });
            }
        }
    }
}

/// Snapshot of what the form should render.
///
/// `error_message` is non-null only for `kind = Error`; `address` is
/// non-null only for `kind = Result`. `loading` is independent of `kind`.
#[repr(C)]
pub struct FfiLookupView {
    pub loading: bool,
    pub kind: FfiViewKind,
    pub error_message: *mut c_char,
    pub address: *mut FfiAddress,
}

impl FfiLookupView {
    pub(crate) fn from_core(view: LookupView<'_>) -> *mut Self {
        let (kind, error_message, address) = match view.body {
            ViewBody::Empty => (FfiViewKind::Empty, std::ptr::null_mut(), std::ptr::null_mut()),
            ViewBody::Error(msg) => (FfiViewKind::Error, to_c_string(msg), std::ptr::null_mut()),
            ViewBody::Result(addr) => (
                FfiViewKind::Result,
                std::ptr::null_mut(),
                Box::into_raw(Box::new(FfiAddress::from_core(addr))),
            ),
        };
        Box::into_raw(Box::new(FfiLookupView {
            loading: view.loading,
            kind,
            error_message,
            address,
        }))
    }
}
