//! In-process stand-in for the ENS subgraph.
//!
//! Answers the `domains` GraphQL query from an in-memory fixture set. Only
//! the parts of the query language the lookup client uses are understood:
//! `first`, `skip`, and an exact `where: { name }` filter.

use std::sync::Arc;

use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Path the subgraph is served under, mirroring the hosted service.
pub const GRAPHQL_PATH: &str = "/subgraphs/name/ensdomains/ens";

/// Page size the subgraph applies when `first` is omitted.
const DEFAULT_FIRST: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
}

/// Registrar data. `BigInt` fields are strings, as the subgraph sends them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub registration_date: String,
    pub expiry_date: String,
    pub registrant: Account,
    pub cost: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub registration: Option<Registration>,
    pub owner: Account,
    pub resolved_address: Option<Account>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default)]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub variables: DomainsVariables,
}

#[derive(Default, Deserialize)]
pub struct DomainsVariables {
    pub first: Option<usize>,
    pub skip: Option<usize>,
    #[serde(rename = "where")]
    pub filter: Option<DomainFilter>,
}

#[derive(Default, Deserialize)]
pub struct DomainFilter {
    pub name: Option<String>,
}

pub type Db = Arc<Vec<Domain>>;

/// Names served by `app()`.
pub fn fixtures() -> Vec<Domain> {
    let vitalik = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";
    let nick = "0xb8c2c29ee19d8307cb7255e1cd9cbde883a267d5";
    vec![
        Domain {
            id: "0xee6c4522aab0003e8d14cd40a6af439055fd2577951148c14b6cea9a53475835".to_string(),
            name: "vitalik.eth".to_string(),
            registration: Some(Registration {
                registration_date: "1497775154".to_string(),
                expiry_date: "2306097254".to_string(),
                registrant: Account { id: vitalik.to_string() },
                cost: Some("0".to_string()),
            }),
            owner: Account { id: vitalik.to_string() },
            resolved_address: None,
        },
        Domain {
            id: "0x05a67c0ee82964c4f7394cdd47fee7f4d9503a23c09c38341779ea012afe6e00".to_string(),
            name: "nick.eth".to_string(),
            registration: Some(Registration {
                registration_date: "1580803395".to_string(),
                expiry_date: "1896455555".to_string(),
                registrant: Account { id: nick.to_string() },
                cost: Some("3170979198376458".to_string()),
            }),
            owner: Account { id: nick.to_string() },
            resolved_address: Some(Account { id: nick.to_string() }),
        },
        Domain {
            id: "0x7a5ac4b5e1c3c77a01b0e3e1d1c2c11f1b1c5c1c2a0b0e3e1d1c2c11f1b1c5c1".to_string(),
            name: "pay.vitalik.eth".to_string(),
            registration: None,
            owner: Account { id: vitalik.to_string() },
            resolved_address: Some(Account { id: vitalik.to_string() }),
        },
    ]
}

pub fn app() -> Router {
    app_with(fixtures())
}

/// Router serving exactly `domains`.
pub fn app_with(domains: Vec<Domain>) -> Router {
    let db: Db = Arc::new(domains);
    Router::new()
        .route(GRAPHQL_PATH, post(graphql))
        .route("/health", get(health))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health() -> &'static str {
    "ok"
}

async fn graphql(State(db): State<Db>, Json(request): Json<GraphQlRequest>) -> Json<Value> {
    tracing::debug!(operation = ?request.operation_name, "graphql request");

    if !request.query.contains("domains(") {
        return Json(json!({
            "errors": [{ "message": "mock subgraph only serves the `domains` query" }]
        }));
    }

    let vars = request.variables;
    let name = vars.filter.and_then(|f| f.name);
    let domains: Vec<&Domain> = db
        .iter()
        .filter(|d| name.as_deref().is_none_or(|n| d.name == n))
        .skip(vars.skip.unwrap_or(0))
        .take(vars.first.unwrap_or(DEFAULT_FIRST))
        .collect();

    Json(json!({ "data": { "domains": domains } }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_serializes_subgraph_field_names() {
        let domain = &fixtures()[0];
        let json = serde_json::to_value(domain).unwrap();
        assert_eq!(json["name"], "vitalik.eth");
        assert_eq!(json["registration"]["registrationDate"], "1497775154");
        assert_eq!(json["registration"]["registrant"]["id"], domain.owner.id);
        assert!(json["resolvedAddress"].is_null());
    }

    #[test]
    fn request_variables_are_optional() {
        let req: GraphQlRequest = serde_json::from_str(r#"{"query":"{ domains(first: 1) { id } }"}"#).unwrap();
        assert!(req.operation_name.is_none());
        assert!(req.variables.first.is_none());
        assert!(req.variables.filter.is_none());
    }

    #[test]
    fn request_reads_where_filter() {
        let req: GraphQlRequest = serde_json::from_str(
            r#"{"query":"q","operationName":"domains","variables":{"first":1,"where":{"name":"nick.eth"}}}"#,
        )
        .unwrap();
        assert_eq!(req.variables.first, Some(1));
        assert_eq!(req.variables.filter.unwrap().name.as_deref(), Some("nick.eth"));
    }

    #[test]
    fn fixture_names_are_unique() {
        let fixtures = fixtures();
        for (i, d) in fixtures.iter().enumerate() {
            assert!(fixtures[i + 1..].iter().all(|other| other.name != d.name));
        }
    }
}
