use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/candidates", get(handler::list_candidates))
        .route("/candidate", post(handler::create_candidate))
        .route("/candidate/:id", get(handler::get_candidate))
        .route("/candidate/:id", put(handler::update_candidate_party))
        .route("/candidate/:id", delete(handler::delete_candidate))
        .route("/parties", get(handler::list_parties))
        .route("/party/:id", get(handler::get_party))
        .route("/party/:id", delete(handler::delete_party))
}
