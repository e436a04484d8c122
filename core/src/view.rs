//! Presentation of `LookupState` as an error banner or a labeled detail card.

use std::fmt;

use chrono::{DateTime, Local, Utc};

use crate::controller::LookupState;
use crate::types::Domain;

/// Placeholder for values the record does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

pub const OWNER: &str = "Owner";
pub const REGISTRANT: &str = "Registrant";
pub const REGISTRATION_DATE: &str = "Registration Date";
pub const EXPIRY_DATE: &str = "Expiry Date";
pub const RESOLVED_ADDRESS: &str = "Resolved Address";
pub const COST: &str = "Cost";

/// Time zone used to turn epoch timestamps into calendar dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    #[default]
    Local,
    Utc,
}

/// Format epoch seconds as a `M/D/YYYY` calendar date.
pub fn format_epoch_date(seconds: i64, style: DateStyle) -> String {
    let Some(utc) = seconds
        .checked_mul(1000)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
    else {
        return "Invalid Date".to_string();
    };
    match style {
        DateStyle::Local => utc.with_timezone(&Local).format("%-m/%-d/%Y").to_string(),
        DateStyle::Utc => utc.format("%-m/%-d/%Y").to_string(),
    }
}

/// The record's fields, labeled and formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCard {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
}

impl DetailCard {
    pub fn from_domain(domain: &Domain, style: DateStyle) -> Self {
        let registration = domain.registration.as_ref();
        let or_na = |value: Option<String>| value.unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let fields = vec![
            (OWNER, domain.owner.id.clone()),
            (REGISTRANT, or_na(registration.map(|r| r.registrant.id.clone()))),
            (
                REGISTRATION_DATE,
                or_na(registration.map(|r| format_epoch_date(r.registration_date, style))),
            ),
            (
                EXPIRY_DATE,
                or_na(registration.map(|r| format_epoch_date(r.expiry_date, style))),
            ),
            (
                RESOLVED_ADDRESS,
                or_na(domain.resolved_address.as_ref().map(|a| a.id.clone())),
            ),
            (COST, or_na(registration.and_then(|r| r.cost.clone()))),
        ];

        Self {
            title: domain.name.clone(),
            fields,
        }
    }

    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, value)| value.as_str())
    }
}

/// The result panel: busy indicator plus either a banner or a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub loading: bool,
    pub banner: Option<String>,
    pub card: Option<DetailCard>,
}

impl Panel {
    pub fn from_state(state: &LookupState, style: DateStyle) -> Self {
        Self {
            loading: state.loading,
            banner: state.error.map(|e| e.to_string()),
            card: state
                .record
                .as_ref()
                .map(|domain| DetailCard::from_domain(domain, style)),
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.loading {
            writeln!(f, "Searching...")?;
        }
        if let Some(banner) = &self.banner {
            writeln!(f, "! {banner}")?;
        }
        if let Some(card) = &self.card {
            writeln!(f, "{}", card.title)?;
            writeln!(f, "{}", "-".repeat(card.title.chars().count().max(3)))?;
            for (label, value) in &card.fields {
                writeln!(f, "{label}: {value}")?;
            }
        }
        Ok(())
    }
}
