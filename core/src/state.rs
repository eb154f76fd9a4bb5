//! Form state of the address lookup and its transitions.
//!
//! # Design
//! One owned struct holds the input text, the loading flag, the error and
//! the result. Every lookup starts with `start_lookup`, which hands out a
//! fresh `RequestTicket`. A completion commits only if it carries the latest
//! ticket; anything older is discarded, so when two lookups overlap the
//! display always reflects the most recently issued one.

use tracing::{debug, info, warn};

use crate::error::{ApiError, LookupFailure};
use crate::input::CepInput;
use crate::types::Address;

/// Sequence number identifying one lookup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(pub u64);

/// Whether a completion changed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    /// The ticket was superseded or already settled; state is untouched.
    Stale,
}

/// What the form should render right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupView<'a> {
    /// Show the progress indicator next to the form.
    pub loading: bool,
    pub body: ViewBody<'a>,
}

/// The block below the form. An error takes priority over a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody<'a> {
    Empty,
    Error(&'static str),
    Result(&'a Address),
}

#[derive(Debug, Clone, Default)]
pub struct LookupState {
    input: CepInput,
    loading: bool,
    error: Option<LookupFailure>,
    result: Option<Address>,
    last_issued: u64,
    /// Ticket still awaiting completion, if the latest lookup is in flight.
    pending: Option<RequestTicket>,
}

impl LookupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &CepInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut CepInput {
        &mut self.input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<LookupFailure> {
        self.error
    }

    pub fn result(&self) -> Option<&Address> {
        self.result.as_ref()
    }

    /// The most recently issued ticket, if any lookup was started.
    pub fn latest_ticket(&self) -> Option<RequestTicket> {
        (self.last_issued > 0).then_some(RequestTicket(self.last_issued))
    }

    /// Begin a lookup: loading on, error and result cleared.
    pub fn start_lookup(&mut self) -> RequestTicket {
        self.last_issued += 1;
        let ticket = RequestTicket(self.last_issued);
        if let Some(previous) = self.pending.replace(ticket) {
            debug!(superseded = previous.0, ticket = ticket.0, "lookup superseded");
        }
        self.loading = true;
        self.error = None;
        self.result = None;
        debug!(ticket = ticket.0, cep = %self.input, "lookup started");
        ticket
    }

    pub fn apply_success(&mut self, ticket: RequestTicket, address: Address) -> Commit {
        if !self.settle(ticket) {
            return Commit::Stale;
        }
        info!(ticket = ticket.0, code = %address.code, "address found");
        self.error = None;
        self.result = Some(address);
        Commit::Applied
    }

    pub fn apply_failure(&mut self, ticket: RequestTicket, failure: LookupFailure) -> Commit {
        if !self.settle(ticket) {
            return Commit::Stale;
        }
        warn!(ticket = ticket.0, %failure, "lookup failed");
        self.result = None;
        self.error = Some(failure);
        Commit::Applied
    }

    /// Commit a parsed response. `NotFound` becomes the not-found message;
    /// every other error is reported as a failed fetch.
    pub fn apply(&mut self, ticket: RequestTicket, outcome: Result<Address, ApiError>) -> Commit {
        match outcome {
            Ok(address) => self.apply_success(ticket, address),
            Err(err) => {
                debug!(ticket = ticket.0, error = %err, "lookup response rejected");
                self.apply_failure(ticket, LookupFailure::from(&err))
            }
        }
    }

    pub fn view(&self) -> LookupView<'_> {
        let body = match (&self.error, &self.result) {
            (Some(failure), _) => ViewBody::Error(failure.message()),
            (None, Some(address)) => ViewBody::Result(address),
            (None, None) => ViewBody::Empty,
        };
        LookupView {
            loading: self.loading,
            body,
        }
    }

    /// Clear the pending ticket if `ticket` is it. Loading ends with it.
    fn settle(&mut self, ticket: RequestTicket) -> bool {
        if self.pending != Some(ticket) {
            debug!(
                ticket = ticket.0,
                latest = self.last_issued,
                "discarding stale lookup completion"
            );
            return false;
        }
        self.pending = None;
        self.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn se() -> Address {
        Address {
            code: "01001000".into(),
            address: "Praça da Sé".into(),
            district: "Sé".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
        }
    }

    #[test]
    fn fresh_state_renders_nothing() {
        let state = LookupState::new();
        let view = state.view();
        assert!(!view.loading);
        assert_eq!(view.body, ViewBody::Empty);
        assert_eq!(state.latest_ticket(), None);
    }

    #[test]
    fn start_lookup_sets_loading_and_clears_previous_outcome() {
        let mut state = LookupState::new();
        let t1 = state.start_lookup();
        state.apply_failure(t1, LookupFailure::NotFound);
        assert!(state.error().is_some());

        let t2 = state.start_lookup();
        assert!(t2 > t1);
        assert!(state.is_loading());
        assert!(state.error().is_none());
        assert!(state.result().is_none());
        assert_eq!(state.view().body, ViewBody::Empty);
    }

    #[test]
    fn success_sets_result_and_clears_loading() {
        let mut state = LookupState::new();
        let ticket = state.start_lookup();
        assert_eq!(state.apply_success(ticket, se()), Commit::Applied);
        assert!(!state.is_loading());
        assert_eq!(state.result(), Some(&se()));
        assert!(state.error().is_none());
        assert_eq!(state.view().body, ViewBody::Result(&se()));
    }

    #[test]
    fn failure_sets_message_and_clears_loading() {
        let mut state = LookupState::new();
        let ticket = state.start_lookup();
        state.apply_failure(ticket, LookupFailure::FetchFailed);
        assert!(!state.is_loading());
        assert!(state.result().is_none());
        assert_eq!(state.view().body, ViewBody::Error("Erro ao buscar o endereço."));
    }

    #[test]
    fn apply_maps_api_errors_to_user_messages() {
        let mut state = LookupState::new();
        let t = state.start_lookup();
        state.apply(t, Err(ApiError::NotFound { status: Some(404.0) }));
        assert_eq!(state.error(), Some(LookupFailure::NotFound));

        let t = state.start_lookup();
        state.apply(
            t,
            Err(ApiError::HttpError {
                status: 503,
                body: String::new(),
            }),
        );
        assert_eq!(state.error(), Some(LookupFailure::FetchFailed));

        let t = state.start_lookup();
        state.apply(t, Err(ApiError::Deserialization("eof".into())));
        assert_eq!(state.error(), Some(LookupFailure::FetchFailed));
    }

    #[test]
    fn latest_request_wins_when_responses_arrive_out_of_order() {
        let mut state = LookupState::new();
        let first = state.start_lookup();
        let second = state.start_lookup();

        assert_eq!(state.apply_success(second, se()), Commit::Applied);
        assert_eq!(
            state.apply_failure(first, LookupFailure::FetchFailed),
            Commit::Stale
        );
        assert!(!state.is_loading());
        assert_eq!(state.result(), Some(&se()));
        assert!(state.error().is_none());
    }

    #[test]
    fn stale_completion_keeps_loading_until_latest_settles() {
        let mut state = LookupState::new();
        let first = state.start_lookup();
        let second = state.start_lookup();

        assert_eq!(state.apply_success(first, se()), Commit::Stale);
        assert!(state.is_loading());
        assert!(state.result().is_none());

        state.apply_failure(second, LookupFailure::NotFound);
        assert!(!state.is_loading());
        assert_eq!(state.view().body, ViewBody::Error("CEP não encontrado."));
    }

    #[test]
    fn settling_the_same_ticket_twice_is_stale() {
        let mut state = LookupState::new();
        let ticket = state.start_lookup();
        assert_eq!(state.apply_success(ticket, se()), Commit::Applied);
        assert_eq!(
            state.apply_failure(ticket, LookupFailure::FetchFailed),
            Commit::Stale
        );
        assert_eq!(state.result(), Some(&se()));
    }

    #[test]
    fn input_is_independent_of_lookup_cycle() {
        let mut state = LookupState::new();
        state.input_mut().set_text("01001000");
        let ticket = state.start_lookup();
        state.apply_success(ticket, se());
        assert_eq!(state.input().as_str(), "01001000");
    }

    #[test]
    #[traced_test]
    fn stale_completion_is_logged() {
        let mut state = LookupState::new();
        let first = state.start_lookup();
        let _second = state.start_lookup();
        state.apply_success(first, se());
        assert!(logs_contain("discarding stale lookup completion"));
    }
}
