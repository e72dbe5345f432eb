use crate::error::InputError;
use axum::{
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

use super::{AppState, TweetsQuery};

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn input_error_response(error: &InputError) -> Response {
    error_response(StatusCode::BAD_REQUEST, &error.to_string())
}

/// GET /health
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "store": state.store_backend.as_str(),
    }))
}

/// POST /generate-tweet
pub(super) async fn handle_generate_tweet(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!(reason = %rejection.body_text(), "rejected generate-tweet body");
            return input_error_response(&InputError::InvalidProgress);
        }
    };

    match state.generator.generate_from_json(&body).await {
        Ok(generated) => (StatusCode::OK, Json(generated)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "invalid generate-tweet request");
            input_error_response(&e)
        }
    }
}

/// GET /tweets?userId=
pub(super) async fn handle_list_tweets(
    State(state): State<AppState>,
    Query(query): Query<TweetsQuery>,
) -> Response {
    let Some(user_id) = query.user_id.filter(|id| !id.is_empty()) else {
        return input_error_response(&InputError::MissingUserId);
    };

    match state.history.list_for_user(&user_id).await {
        Ok(tweets) => (StatusCode::OK, Json(tweets)).into_response(),
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "failed to load tweets");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load tweets")
        }
    }
}
