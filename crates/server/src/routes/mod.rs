use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use shared::{AnalyzeRequest, AnalyzeResponse, GenerateRequest, GenerateResponse, ServiceInfo};

use crate::ai;
use crate::error::ServiceError;
use crate::AppState;

const SERVICE_MESSAGE: &str = "Kitchen 3D AI - Iterative";

/// Информация о сервисе
pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: SERVICE_MESSAGE.to_string(),
        model: state.settings.model.clone(),
    })
}

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Текст → планировка кухни
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ServiceError> {
    let response = ai::process_generate(&state, &request).await?;
    Ok(Json(response))
}

/// Снимок + планировка → анализ
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ServiceError> {
    let response = ai::process_analyze(&state, &request).await?;
    Ok(Json(response))
}
