//! Client core for the ENS lookup widget.
//!
//! # Overview
//! Given a name, builds one GraphQL `domains` query against the ENS
//! subgraph, parses the response into a single record, and renders the
//! record (or an error banner) for display. Requests and responses are
//! plain data; the host performs the HTTP round trip (host-does-IO).
//!
//! # Design
//! - `EnsClient` is stateless and holds only the endpoint URL.
//! - `LookupController` owns the UI state and is the only thing that
//!   mutates it. Submissions return a `Dispatch` for the host to execute.
//! - `view::Panel` is derived from the state on every render.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod query;
pub mod types;
pub mod view;

pub use client::{EnsClient, DEFAULT_ENDPOINT};
pub use controller::{Dispatch, LookupController, LookupMessage, LookupState, LookupStatus};
pub use error::{ApiError, LookupError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Account, Domain, Registration};
pub use view::{DateStyle, DetailCard, Panel};
