//! GraphQL document and wire envelopes for the `domains` query.

use serde::{Deserialize, Serialize};

use crate::types::Domain;

/// Operation name sent alongside the document.
pub const DOMAINS_OPERATION: &str = "domains";

/// The single query this client issues.
pub const DOMAINS_QUERY: &str = r#"query domains($skip: Int, $first: Int, $where: Domain_filter) {
  domains(skip: $skip, first: $first, where: $where) {
    id
    name
    registration {
      registrationDate
      expiryDate
      registrant {
        id
      }
      cost
    }
    owner {
      id
    }
    resolvedAddress {
      id
    }
  }
}"#;

/// POST body of a GraphQL-over-HTTP request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub operation_name: &'a str,
    pub variables: V,
}

/// Variables for `DOMAINS_QUERY`. `skip` is declared by the document but
/// never sent.
#[derive(Debug, Serialize)]
pub struct DomainsVariables<'a> {
    pub first: u32,
    #[serde(rename = "where")]
    pub filter: DomainFilter<'a>,
}

/// Exact-match filter on the `name` field.
#[derive(Debug, Serialize)]
pub struct DomainFilter<'a> {
    pub name: &'a str,
}

/// Response envelope. A server may return `data`, `errors`, or both.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` payload of the `domains` query.
#[derive(Debug, Deserialize)]
pub struct DomainsData {
    pub domains: Vec<Domain>,
}
