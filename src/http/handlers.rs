//! Axum HTTP handlers for the web server
//!
//! Provides the JSON-RPC endpoint, the discovery manifest, the plain REST
//! views of the three tools and a health probe.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::domain::manifest::Manifest;
use crate::errors::AppError;
use crate::mcp::dispatcher::Reply;
use crate::registry::{SearchResult, TimeReportEntry};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn manifest(State(state): State<AppState>) -> Json<Manifest> {
    Json(state.manifest.as_ref().clone())
}

pub async fn rpc_endpoint(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let reply = match body {
        Ok(body) => state.dispatcher.handle(&body),
        Err(rejection) => state.dispatcher.unreadable_body(rejection.body_text()),
    };

    let status = reply.status();
    match reply {
        Reply::Message(response) => (status, Json(response)).into_response(),
        Reply::Acknowledged => status.into_response(),
    }
}

pub async fn time_report(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<TimeReportEntry>> {
    let today = Utc::now().date_naive();
    let year = parse_or(query.get("year"), today.year());
    let month = parse_or(query.get("month"), today.month() as i32);

    Json(state.capabilities.time_report(year, month))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<SearchResponse> {
    let text = query.get("query").map(String::as_str).unwrap_or_default();

    Json(SearchResponse {
        results: state.capabilities.search(text),
    })
}

pub async fn fetch(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<SearchResult>, AppError> {
    let id = query.get("id").map(String::as_str).unwrap_or_default();

    state
        .capabilities
        .fetch(id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("content_not_found", format!("no content with id {id:?}")))
}

fn parse_or(value: Option<&String>, default: i32) -> i32 {
    value
        .and_then(|value| value.trim().parse::<i32>().ok())
        .unwrap_or(default)
}
