use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::cors::AppState;

pub async fn list_squirels(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "squirels": ["Yoshi", "Rex"], "greeting": state.greeting }))
}

pub async fn create_squirel() -> impl IntoResponse {
    Json(json!({ "created": true }))
}

pub async fn update_squirel() -> impl IntoResponse {
    Json(json!({ "updated": true }))
}

pub async fn spotted() -> impl IntoResponse {
    Json(json!({ "spotted": 3 }))
}
