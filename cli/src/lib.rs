//! cep-lookup
//! ==========
//!
//! Terminal host for the `cep-core` address lookup form. It executes the
//! requests the core builds with a blocking `ureq` agent and prints the
//! resulting view.
//!
//! ```text
//! cep-lookup 01001000
//! cep-lookup --json 01001000
//! CEP_BASE_URL=http://127.0.0.1:3000/file/apicep cep-lookup
//! ```

use std::io::{BufRead, Write};
use std::time::Duration;

use serde_json::json;
use tracing::debug;

use cep_core::{
    AddressLookup, HttpExecutor, HttpRequest, HttpResponse, LookupView, TransportError, ViewBody,
};

pub const TITLE: &str = "Buscar Endereço por CEP";
pub const PROMPT: &str = "Digite o CEP: ";
pub const LOADING: &str = "Buscando...";

/// Executes lookup requests with a blocking ureq agent.
///
/// HTTP error statuses come back as responses so the core decides what they
/// mean; only I/O failures become `TransportError`.
pub struct UreqExecutor {
    agent: ureq::Agent,
}

impl UreqExecutor {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl HttpExecutor for UreqExecutor {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut call = self.agent.get(&req.path);
        for (key, value) in &req.headers {
            call = call.header(key.as_str(), value.as_str());
        }
        let mut response = call.call().map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(e.to_string()))?;
        debug!(status, bytes = body.len(), "response received");
        Ok(HttpResponse::new(status, body))
    }
}

/// Print `view` as the form would show it below the input.
pub fn render<W: Write>(view: &LookupView<'_>, json: bool, out: &mut W) -> std::io::Result<()> {
    if json {
        let value = match &view.body {
            ViewBody::Empty => json!({ "loading": view.loading }),
            ViewBody::Error(msg) => json!({ "loading": view.loading, "error": msg }),
            ViewBody::Result(addr) => json!({ "loading": view.loading, "result": addr }),
        };
        return writeln!(out, "{value}");
    }

    if view.loading {
        writeln!(out, "{LOADING}")?;
    }
    match &view.body {
        ViewBody::Empty => {}
        ViewBody::Error(msg) => writeln!(out, "{msg}")?,
        ViewBody::Result(addr) => {
            for (label, value) in addr.lines() {
                writeln!(out, "{label}: {value}")?;
            }
        }
    }
    Ok(())
}

/// Run one lookup for `cep` and print the settled view.
pub fn run_once<E: HttpExecutor, W: Write>(
    lookup: &mut AddressLookup,
    executor: &E,
    cep: &str,
    json: bool,
    out: &mut W,
) -> std::io::Result<()> {
    lookup.input_mut().set_text(cep);
    lookup.fetch_address(executor);
    render(&lookup.view(), json, out)
}

/// Prompt for CEPs on `input` until EOF, printing each outcome to `out`.
///
/// The progress line is printed while the request is in flight, just as the
/// form shows its spinner.
pub fn run_interactive<E: HttpExecutor, R: BufRead, W: Write>(
    lookup: &mut AddressLookup,
    executor: &E,
    input: R,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "{TITLE}")?;
    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        lookup.input_mut().set_text(&line);

        let (ticket, request) = lookup.begin_fetch();
        writeln!(out, "{LOADING}")?;
        out.flush()?;
        let outcome = executor.execute(&request);
        lookup.finish_fetch(ticket, outcome);
        render(&lookup.view(), false, out)?;

        writeln!(out)?;
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}
