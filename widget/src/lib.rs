//! Terminal front-end for the ENS lookup widget.
//!
//! Hosts `ens_core::LookupController`: reads names, executes the requests
//! it dispatches with ureq, and prints the rendered panel to stdout.

pub mod app;
pub mod config;
pub mod transport;

pub use app::App;
pub use config::Config;
pub use transport::{Transport, UreqTransport};
