use {
    axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Json, Response},
    },
    tracing::{debug, info, warn},
};

use forgecord_channels::PushEvent;

use crate::server::AppState;

/// `POST /webhooks/github`.
///
/// The event kind comes from the `X-GitHub-Event` header; payloads that
/// carry an `event` field instead (original wire format) fall back to
/// it. Only `push` is handled; everything else is acknowledged and
/// ignored.
pub async fn github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let kind = headers
        .get("x-github-event")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| {
            payload
                .get("event")
                .and_then(|v| v.as_str())
                .map(str::to_owned)
        });

    let Some(kind) = kind else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "missing event kind" })),
        )
            .into_response();
    };

    if kind != "push" {
        debug!(kind, "ignoring non-push event");
        return Json(serde_json::json!({ "ignored": kind })).into_response();
    }

    let event: PushEvent = match serde_json::from_value(payload) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "malformed push payload");
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": format!("malformed push payload: {e}") })),
            )
                .into_response();
        },
    };

    let destinations = state.registry.snapshot();
    let delivered = state
        .router
        .route(&event, state.outbound.as_ref(), &destinations)
        .await;
    info!(
        repo = %event.repository.name,
        branch = event.branch(),
        delivered,
        "routed push event"
    );
    Json(serde_json::json!({ "delivered": delivered })).into_response()
}
