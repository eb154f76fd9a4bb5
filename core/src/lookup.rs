//! The address lookup form component.

use crate::client::CepClient;
use crate::error::{LookupFailure, TransportError};
use crate::http::{HttpExecutor, HttpRequest, HttpResponse};
use crate::input::CepInput;
use crate::state::{Commit, LookupState, LookupView, RequestTicket};

/// The "search address by CEP" form: a `CepClient` plus the form state.
///
/// Hosts with their own event loop call [`begin_fetch`](Self::begin_fetch),
/// run the request however they like, and hand the outcome back through
/// [`finish_fetch`](Self::finish_fetch). Several fetches may be in flight at
/// once; only the latest one reaches the display.
#[derive(Debug, Clone, Default)]
pub struct AddressLookup {
    client: CepClient,
    state: LookupState,
}

impl AddressLookup {
    pub fn new(client: CepClient) -> Self {
        Self {
            client,
            state: LookupState::new(),
        }
    }

    pub fn client(&self) -> &CepClient {
        &self.client
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn input(&self) -> &CepInput {
        self.state.input()
    }

    pub fn input_mut(&mut self) -> &mut CepInput {
        self.state.input_mut()
    }

    pub fn view(&self) -> LookupView<'_> {
        self.state.view()
    }

    /// Start a lookup for the current input and return the request to run.
    pub fn begin_fetch(&mut self) -> (RequestTicket, HttpRequest) {
        let ticket = self.state.start_lookup();
        let request = self.client.build_lookup(self.state.input().as_str());
        (ticket, request)
    }

    /// Commit the outcome of the request issued for `ticket`.
    pub fn finish_fetch(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Commit {
        match outcome {
            Ok(response) => {
                let parsed = self.client.parse_lookup(response);
                self.state.apply(ticket, parsed)
            }
            Err(err) => {
                tracing::debug!(ticket = ticket.0, error = %err, "transport failure");
                self.state.apply_failure(ticket, LookupFailure::from(&err))
            }
        }
    }

    /// Run one complete lookup through `executor`.
    pub fn fetch_address<E: HttpExecutor>(&mut self, executor: &E) -> Commit {
        let (ticket, request) = self.begin_fetch();
        let outcome = executor.execute(&request);
        self.finish_fetch(ticket, outcome)
    }
}
