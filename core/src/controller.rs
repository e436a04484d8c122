//! View controller: the lookup widget's state and its transitions.
//!
//! # Design
//! All state lives in `LookupState`, mutated only by
//! `LookupController::update`. A submission does not perform I/O; it hands
//! back a `Dispatch` carrying the request, and the host reports the outcome
//! later as `LookupMessage::Completed`. Overlapping dispatches are not
//! guarded: whichever completion arrives last is what the view shows.

use tracing::{debug, warn};

use crate::client::EnsClient;
use crate::error::{ApiError, LookupError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::Domain;

/// Everything the view renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupState {
    pub search_input: String,
    pub record: Option<Domain>,
    pub loading: bool,
    pub error: Option<LookupError>,
}

/// Phase of the current (or last) search attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStatus {
    Idle,
    Loading,
    Success,
    Empty,
    Failed,
}

/// Input to `LookupController::update`.
#[derive(Debug)]
pub enum LookupMessage {
    /// The text field changed.
    InputChanged(String),
    /// Search button pressed, or the field's confirm action.
    Submit,
    /// A dispatched request resolved.
    Completed {
        ticket: u64,
        outcome: Result<Option<Domain>, ApiError>,
    },
}

/// A request the host must execute, then answer with `Completed` carrying
/// the same ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub ticket: u64,
    pub name: String,
    pub request: HttpRequest,
}

#[derive(Debug, Clone)]
pub struct LookupController {
    client: EnsClient,
    state: LookupState,
    next_ticket: u64,
}

impl LookupController {
    pub fn new(client: EnsClient) -> Self {
        Self {
            client,
            state: LookupState::default(),
            next_ticket: 1,
        }
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn client(&self) -> &EnsClient {
        &self.client
    }

    pub fn status(&self) -> LookupStatus {
        let state = &self.state;
        if state.loading {
            LookupStatus::Loading
        } else if state.record.is_some() {
            LookupStatus::Success
        } else {
            match state.error {
                Some(LookupError::NotFound) => LookupStatus::Empty,
                Some(LookupError::FetchFailed) => LookupStatus::Failed,
                Some(LookupError::InvalidName) | None => LookupStatus::Idle,
            }
        }
    }

    /// Apply one message. Returns the request to execute when the message
    /// starts a fetch.
    pub fn update(&mut self, msg: LookupMessage) -> Option<Dispatch> {
        match msg {
            LookupMessage::InputChanged(text) => {
                self.state.search_input = text;
                None
            }
            LookupMessage::Submit => self.submit(),
            LookupMessage::Completed { ticket, outcome } => {
                self.complete(ticket, outcome);
                None
            }
        }
    }

    /// Turn a raw host response into a `Completed` message and apply it.
    pub fn receive(&mut self, ticket: u64, response: Result<HttpResponse, ApiError>) {
        let outcome = response.and_then(|resp| self.client.parse_lookup(resp));
        self.complete(ticket, outcome);
    }

    fn submit(&mut self) -> Option<Dispatch> {
        if self.state.search_input.trim().is_empty() {
            self.state.record = None;
            self.state.error = Some(LookupError::InvalidName);
            return None;
        }

        let name = self.state.search_input.clone();
        let request = match self.client.build_lookup(&name) {
            Ok(request) => request,
            Err(e) => {
                warn!(name = %name, error = %e, "could not build lookup request");
                self.state.record = None;
                self.state.error = Some(LookupError::FetchFailed);
                return None;
            }
        };

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.state.error = None;
        self.state.loading = true;
        debug!(ticket, name = %name, "dispatching lookup");
        Some(Dispatch {
            ticket,
            name,
            request,
        })
    }

    fn complete(&mut self, ticket: u64, outcome: Result<Option<Domain>, ApiError>) {
        self.state.loading = false;
        match outcome {
            Ok(Some(record)) => {
                debug!(ticket, name = %record.name, "lookup found record");
                self.state.record = Some(record);
                self.state.error = None;
            }
            Ok(None) => {
                debug!(ticket, "lookup matched nothing");
                self.state.record = None;
                self.state.error = Some(LookupError::NotFound);
            }
            Err(e) => {
                warn!(ticket, error = %e, "lookup failed");
                self.state.record = None;
                self.state.error = Some(LookupError::FetchFailed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Account, Registration};

    fn controller() -> LookupController {
        LookupController::new(EnsClient::new("http://localhost:8000/ens"))
    }

    fn record(name: &str) -> Domain {
        Domain {
            id: "0x01".to_string(),
            name: name.to_string(),
            registration: Some(Registration {
                registration_date: 1_497_775_154,
                expiry_date: 2_306_097_254,
                registrant: Account { id: "0xreg".to_string() },
                cost: Some("0".to_string()),
            }),
            owner: Account { id: "0xowner".to_string() },
            resolved_address: None,
        }
    }

    fn submit(c: &mut LookupController, input: &str) -> Option<Dispatch> {
        c.update(LookupMessage::InputChanged(input.to_string()));
        c.update(LookupMessage::Submit)
    }

    #[test]
    fn starts_idle() {
        let c = controller();
        assert_eq!(c.status(), LookupStatus::Idle);
        assert_eq!(c.state(), &LookupState::default());
    }

    #[test]
    fn input_change_only_stores_text() {
        let mut c = controller();
        assert!(c.update(LookupMessage::InputChanged("nick.eth".to_string())).is_none());
        assert_eq!(c.state().search_input, "nick.eth");
        assert!(!c.state().loading);
        assert!(c.state().error.is_none());
    }

    #[test]
    fn empty_input_is_rejected_without_request() {
        for input in ["", "   ", "\t\n"] {
            let mut c = controller();
            assert!(submit(&mut c, input).is_none(), "{input:?} dispatched");
            assert_eq!(c.state().error, Some(LookupError::InvalidName));
            assert!(!c.state().loading);
            assert_eq!(c.status(), LookupStatus::Idle);
        }
    }

    #[test]
    fn empty_input_clears_previous_record() {
        let mut c = controller();
        let d = submit(&mut c, "vitalik.eth").unwrap();
        c.update(LookupMessage::Completed {
            ticket: d.ticket,
            outcome: Ok(Some(record("vitalik.eth"))),
        });
        submit(&mut c, "");
        assert!(c.state().record.is_none());
        assert_eq!(c.state().error, Some(LookupError::InvalidName));
    }

    #[test]
    fn submit_dispatches_one_request_for_exact_name() {
        let mut c = controller();
        let d = submit(&mut c, "vitalik.eth").unwrap();
        assert_eq!(d.name, "vitalik.eth");
        assert_eq!(d.request, c.client().build_lookup("vitalik.eth").unwrap());
        assert!(c.state().loading);
        assert!(c.state().error.is_none());
        assert_eq!(c.status(), LookupStatus::Loading);
    }

    #[test]
    fn submit_clears_stale_error() {
        let mut c = controller();
        submit(&mut c, "");
        assert!(c.state().error.is_some());
        submit(&mut c, "vitalik.eth").unwrap();
        assert!(c.state().error.is_none());
    }

    #[test]
    fn found_record_is_stored() {
        let mut c = controller();
        let d = submit(&mut c, "vitalik.eth").unwrap();
        c.update(LookupMessage::Completed {
            ticket: d.ticket,
            outcome: Ok(Some(record("vitalik.eth"))),
        });
        assert_eq!(c.state().record.as_ref().map(|r| r.name.as_str()), Some("vitalik.eth"));
        assert!(c.state().error.is_none());
        assert!(!c.state().loading);
        assert_eq!(c.status(), LookupStatus::Success);
    }

    #[test]
    fn no_match_replaces_record_with_not_found() {
        let mut c = controller();
        let d = submit(&mut c, "vitalik.eth").unwrap();
        c.update(LookupMessage::Completed {
            ticket: d.ticket,
            outcome: Ok(Some(record("vitalik.eth"))),
        });
        let d = submit(&mut c, "missing.eth").unwrap();
        c.update(LookupMessage::Completed {
            ticket: d.ticket,
            outcome: Ok(None),
        });
        assert!(c.state().record.is_none());
        assert_eq!(c.state().error, Some(LookupError::NotFound));
        assert_eq!(c.status(), LookupStatus::Empty);
    }

    #[test]
    fn failure_clears_record_and_hides_cause() {
        let mut c = controller();
        let d = submit(&mut c, "vitalik.eth").unwrap();
        c.update(LookupMessage::Completed {
            ticket: d.ticket,
            outcome: Ok(Some(record("vitalik.eth"))),
        });
        let d = submit(&mut c, "vitalik.eth").unwrap();
        c.update(LookupMessage::Completed {
            ticket: d.ticket,
            outcome: Err(ApiError::Transport("connection refused".to_string())),
        });
        assert!(c.state().record.is_none());
        assert_eq!(c.state().error, Some(LookupError::FetchFailed));
        assert!(!c.state().loading);
        assert_eq!(c.status(), LookupStatus::Failed);
    }

    #[test]
    fn receive_parses_host_response() {
        let mut c = controller();
        let d = submit(&mut c, "nobody.eth").unwrap();
        c.receive(d.ticket, Ok(HttpResponse::new(200, r#"{"data":{"domains":[]}}"#)));
        assert_eq!(c.state().error, Some(LookupError::NotFound));

        let d = submit(&mut c, "nobody.eth").unwrap();
        c.receive(d.ticket, Ok(HttpResponse::new(500, "boom")));
        assert_eq!(c.state().error, Some(LookupError::FetchFailed));
    }

    #[test]
    fn tickets_increase_per_dispatch() {
        let mut c = controller();
        let first = submit(&mut c, "a.eth").unwrap();
        let second = submit(&mut c, "b.eth").unwrap();
        assert!(second.ticket > first.ticket);
    }

    #[test]
    fn overlapping_searches_last_completion_wins() {
        let mut c = controller();
        let first = submit(&mut c, "a.eth").unwrap();
        let second = submit(&mut c, "b.eth").unwrap();

        c.update(LookupMessage::Completed {
            ticket: second.ticket,
            outcome: Ok(Some(record("b.eth"))),
        });
        c.update(LookupMessage::Completed {
            ticket: first.ticket,
            outcome: Ok(Some(record("a.eth"))),
        });
        assert_eq!(c.state().record.as_ref().map(|r| r.name.as_str()), Some("a.eth"));
        assert!(!c.state().loading);
    }
}
