//! Stateless GraphQL request builder and response parser for the ENS
//! subgraph.
//!
//! # Design
//! `EnsClient` holds only the endpoint URL. A lookup is split into
//! `build_lookup`, which produces an `HttpRequest`, and `parse_lookup`,
//! which consumes the `HttpResponse`. The caller executes the round trip
//! in between, keeping this crate free of I/O.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{
    DomainFilter, DomainsData, DomainsVariables, GraphQlRequest, GraphQlResponse, DOMAINS_OPERATION,
    DOMAINS_QUERY,
};
use crate::types::Domain;

/// Public ENS subgraph endpoint used when the host does not configure one.
pub const DEFAULT_ENDPOINT: &str = "https://api.thegraph.com/subgraphs/name/ensdomains/ens";

/// Page size of every lookup: the filter is an exact name match.
const PAGE_SIZE: u32 = 1;

/// Synchronous, stateless client for the ENS subgraph.
#[derive(Debug, Clone)]
pub struct EnsClient {
    endpoint: String,
}

impl Default for EnsClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl EnsClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the `domains` query for exactly `name`, limited to one record.
    pub fn build_lookup(&self, name: &str) -> Result<HttpRequest, ApiError> {
        let payload = GraphQlRequest {
            query: DOMAINS_QUERY,
            operation_name: DOMAINS_OPERATION,
            variables: DomainsVariables {
                first: PAGE_SIZE,
                filter: DomainFilter { name },
            },
        };
        let body =
            serde_json::to_string(&payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint.clone(),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("accept".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    /// Parse a `domains` response. `Ok(None)` means the query matched nothing.
    pub fn parse_lookup(&self, response: HttpResponse) -> Result<Option<Domain>, ApiError> {
        check_status(&response)?;
        let envelope: GraphQlResponse<DomainsData> = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        if !envelope.errors.is_empty() {
            return Err(ApiError::GraphQl(
                envelope.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        let data = envelope.data.ok_or(ApiError::MissingData)?;
        Ok(data.domains.into_iter().next())
    }
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
