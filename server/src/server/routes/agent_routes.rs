//! Startup pipeline endpoint
//!
//! `POST /api/agent/startup` with `{ "goal": "..." }` runs the full pipeline
//! and answers with the investigation output, or a 500 carrying the fields
//! computed before the failure.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use super::{ApiError, INVALID_GOAL_ERROR};
use crate::pipeline::{InvestigationOutput, FALLBACK_ERROR};
use crate::server::ServerAppState;

/// Pull the goal out of the request body, as sent.
///
/// A goal that is blank once trimmed counts as missing.
pub fn extract_goal(body: &Value) -> Option<String> {
    body.get("goal")
        .and_then(Value::as_str)
        .filter(|goal| !goal.trim().is_empty())
        .map(str::to_string)
}

/// Run the startup pipeline for the goal in the request body.
///
/// The run is spawned onto its own task: if the client goes away the run
/// still completes (progress keeps flowing to WebSocket listeners) and the
/// result is dropped.
pub async fn startup_handler(
    State(state): State<ServerAppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<InvestigationOutput>, ApiError> {
    let goal = match body {
        Ok(Json(value)) => extract_goal(&value),
        Err(rejection) => {
            log::debug!("Rejected startup request body: {}", rejection);
            None
        }
    }
    .ok_or_else(|| ApiError::bad_request(INVALID_GOAL_ERROR))?;

    let permit = state
        .run_limiter
        .clone()
        .acquire_owned()
        .await
        .map_err(|e| {
            log::error!("Run limiter closed: {}", e);
            ApiError::internal(FALLBACK_ERROR)
        })?;

    log::debug!(
        "Starting pipeline run ({} of {} slots in use)",
        state.runs_in_flight(),
        state.max_concurrent_runs
    );

    let pipeline = state.pipeline.clone();
    let run = tokio::spawn(async move {
        let _permit = permit;
        pipeline.run_investigation(&goal).await
    });

    match run.await {
        Ok(Ok(output)) => Ok(Json(output)),
        Ok(Err(failure)) => {
            log::warn!("Startup pipeline failed: {}", failure);
            Err(failure.into())
        }
        Err(e) => {
            log::error!("Startup pipeline task aborted: {}", e);
            Err(ApiError::internal(FALLBACK_ERROR))
        }
    }
}
