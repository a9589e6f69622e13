use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
    Json,
};
use log::{error, info, warn};
use serde::Serialize;

use super::page::{render, Outcome};
use super::state::SharedState;
use crate::advisor::AdvisorError;

/// Shown when something other than the submitted values went wrong.
const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong while making the prediction. Please try again.";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET / - The empty input form
pub async fn index() -> Html<String> {
    Html(render(Outcome::Empty, &HashMap::new()))
}

/// POST /predict - Recommend a crop for the submitted measurements
pub async fn predict(
    State(state): State<SharedState>,
    Form(fields): Form<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let advisor = Arc::clone(&state.advisor);
    let submitted = fields.clone();
    let result = tokio::task::spawn_blocking(move || advisor.predict_fields(&submitted)).await;

    match result {
        Ok(Ok(recommendation)) => {
            info!("Recommended {:?} (label {})", recommendation.crop, recommendation.label);
            (StatusCode::OK, Html(render(Outcome::Recommendation(&recommendation), &fields)))
        }
        Ok(Err(AdvisorError::ValidationError(e))) => {
            warn!("Rejected form submission: {}", e);
            let message = e.to_string();
            (StatusCode::UNPROCESSABLE_ENTITY, Html(render(Outcome::Error(&message), &fields)))
        }
        Ok(Err(e)) => {
            error!("Prediction failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render(Outcome::Error(INTERNAL_ERROR_MESSAGE), &fields)),
            )
        }
        Err(e) => {
            error!("Prediction task panicked: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render(Outcome::Error(INTERNAL_ERROR_MESSAGE), &fields)),
            )
        }
    }
}

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
