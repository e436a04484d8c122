//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;
use ens_core::{DateStyle, DEFAULT_ENDPOINT};

#[derive(Debug, Parser)]
#[command(name = "ens-lookup", version, about = "Look up ENS names on the ENS subgraph")]
pub struct Config {
    /// Names to look up once each. Reads one name per line from stdin when
    /// none are given.
    pub names: Vec<String>,

    /// GraphQL endpoint of the ENS subgraph.
    #[arg(long, env = "ENS_SUBGRAPH_URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Give up on a lookup after this many seconds.
    #[arg(long, env = "ENS_LOOKUP_TIMEOUT_SECS", default_value_t = 15)]
    pub timeout_secs: u64,

    /// Render dates in UTC instead of the local time zone.
    #[arg(long)]
    pub utc: bool,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn date_style(&self) -> DateStyle {
        if self.utc {
            DateStyle::Utc
        } else {
            DateStyle::Local
        }
    }
}
