use crate::api::AppState;
use axum::extract::State;
use axum::Json;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Readiness plus the salary lines this instance validates against.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let cap = &state.rules.cap;
    Json(serde_json::json!({
        "status": "ready",
        "capLine": cap.cap_line,
        "taxLine": cap.tax_line,
        "firstApronLine": cap.first_apron_line,
        "secondApronLine": cap.second_apron_line,
    }))
}
