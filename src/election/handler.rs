//! HTTP handlers for the election API.
//!
//! Each handler runs at most one validation pass and one SQL statement, then
//! maps the outcome onto the envelope the original consumers expect:
//! `{message, data}` on reads and creates, `{message, data, changes}` on
//! updates, `{message, changes, id}` on deletes and `{error}` on failures.
//! Two quirks of that contract are preserved deliberately: "not found" on
//! updates and deletes is a 200 with a distinguishing message rather than an
//! error status, and persistence faults answer 500 on the unfiltered list
//! reads but 400 on every parameterized statement.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{Candidate, CreateCandidate, Election, Party, UpdateCandidateParty};
use crate::handler::AppState;
use crate::validate;

// ============================================================================
// Response Envelopes
// ============================================================================

#[derive(Debug, Serialize)]
struct RowsResponse<T> {
    message: &'static str,
    data: T,
}

#[derive(Debug, Serialize)]
struct UpdatedResponse {
    message: &'static str,
    data: JsonValue,
    changes: u64,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    message: &'static str,
    changes: u64,
    id: i64,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse<T> {
    error: T,
}

fn success<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(RowsResponse { message: "success", data })).into_response()
}

fn ok_message(message: &'static str) -> Response {
    (StatusCode::OK, Json(MessageResponse { message })).into_response()
}

fn bad_request<T: Serialize>(error: T) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

fn server_error<T: Serialize>(error: T) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error })).into_response()
}

// ============================================================================
// Candidate Handlers
// ============================================================================

pub async fn list_candidates(State(state): State<AppState>) -> Response {
    let store = Election::new(state.db.connection());

    match store.list_candidates().await {
        Ok(candidates) => success(candidates),
        Err(e) => {
            tracing::error!("Failed to list candidates: {}", e);
            server_error(e.to_string())
        }
    }
}

pub async fn get_candidate(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = Election::new(state.db.connection());

    match store.get_candidate(id).await {
        Ok(Some(candidate)) => success(vec![candidate]),
        Ok(None) => success(Vec::<Candidate>::new()),
        Err(e) => {
            tracing::error!("Failed to get candidate {}: {}", id, e);
            bad_request(e.to_string())
        }
    }
}

pub async fn create_candidate(
    State(state): State<AppState>,
    Json(body): Json<JsonValue>,
) -> Response {
    let errors =
        validate::required_fields(&body, &["first_name", "last_name", "industry_connected"]);
    if !errors.is_empty() {
        return bad_request(errors);
    }

    let input: CreateCandidate = match serde_json::from_value(body.clone()) {
        Ok(input) => input,
        Err(e) => return bad_request(e.to_string()),
    };

    let store = Election::new(state.db.connection());
    match store.create_candidate(input).await {
        // The generated id is not read back; the submitted body is the payload.
        Ok(()) => success(body),
        Err(e) => {
            tracing::error!("Failed to create candidate: {}", e);
            bad_request(e.to_string())
        }
    }
}

pub async fn update_candidate_party(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<JsonValue>,
) -> Response {
    let errors = validate::required_fields(&body, &["party_id"]);
    if !errors.is_empty() {
        return bad_request(errors);
    }

    let input: UpdateCandidateParty = match serde_json::from_value(body.clone()) {
        Ok(input) => input,
        Err(e) => return bad_request(e.to_string()),
    };

    let store = Election::new(state.db.connection());
    match store.set_candidate_party(id, input.party_id).await {
        Ok(0) => ok_message("Candidate not found"),
        Ok(changes) => (
            StatusCode::OK,
            Json(UpdatedResponse {
                message: "success",
                data: body,
                changes,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update candidate {}: {}", id, e);
            bad_request(e.to_string())
        }
    }
}

pub async fn delete_candidate(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = Election::new(state.db.connection());

    match store.delete_candidate(id).await {
        Ok(0) => ok_message("Candidate not found"),
        Ok(changes) => (
            StatusCode::OK,
            Json(DeletedResponse {
                message: "deleted",
                changes,
                id,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to delete candidate {}: {}", id, e);
            bad_request(e.to_string())
        }
    }
}

// ============================================================================
// Party Handlers
// ============================================================================

pub async fn list_parties(State(state): State<AppState>) -> Response {
    let store = Election::new(state.db.connection());

    match store.list_parties().await {
        Ok(parties) => success(parties),
        Err(e) => {
            tracing::error!("Failed to list parties: {}", e);
            server_error(e.to_string())
        }
    }
}

pub async fn get_party(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = Election::new(state.db.connection());

    match store.get_party(id).await {
        Ok(Some(party)) => success(vec![party]),
        Ok(None) => success(Vec::<Party>::new()),
        Err(e) => {
            tracing::error!("Failed to get party {}: {}", id, e);
            bad_request(e.to_string())
        }
    }
}

pub async fn delete_party(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = Election::new(state.db.connection());

    match store.delete_party(id).await {
        Ok(0) => ok_message("Party not found"),
        Ok(changes) => (
            StatusCode::OK,
            Json(DeletedResponse {
                message: "deleted",
                changes,
                id,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to delete party {}: {}", id, e);
            bad_request(e.to_string())
        }
    }
}
