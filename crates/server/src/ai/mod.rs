use std::time::Instant;

use serde_json::{Map, Value};
use shared::{
    extract_json_text_with, normalize_critique, normalize_layout, parse_object, AnalyzeRequest,
    AnalyzeResponse, ExtractionMode, GenerateRequest, GenerateResponse, STATUS_SUCCESS,
};

use crate::error::ServiceError;
use crate::AppState;

pub mod client;
pub mod image;
pub mod prompt;

use client::ModelRequest;
use image::ImagePayload;

/// Сгенерировать или доработать планировку кухни
pub async fn process_generate(
    state: &AppState,
    request: &GenerateRequest,
) -> Result<GenerateResponse, ServiceError> {
    let vocabulary = state.settings.language.vocabulary();
    let mode = if request.revision().is_some() {
        "revision"
    } else {
        "fresh"
    };
    tracing::info!(iteration = request.iteration, mode, "Generating kitchen layout");

    let prompt = prompt::generate_prompt(request, vocabulary);
    let text = call_model(state, ModelRequest::text(prompt)).await?;

    let data = parse_model_text(&text, state.settings.extraction)?;
    let layout = normalize_layout(data, request.iteration, vocabulary)?;
    tracing::debug!(
        cabinets = layout.cabinets().len(),
        appliances = layout.appliances().len(),
        "Layout normalized"
    );

    Ok(GenerateResponse {
        status: STATUS_SUCCESS.to_string(),
        data: layout.into_value(),
        model: state.settings.model.clone(),
        iteration: request.iteration,
    })
}

/// Проанализировать снимок 3D-модели вместе с текущей планировкой
pub async fn process_analyze(
    state: &AppState,
    request: &AnalyzeRequest,
) -> Result<AnalyzeResponse, ServiceError> {
    let vocabulary = state.settings.language.vocabulary();
    let image = ImagePayload::from_data_uri(&request.image_base64)?;
    tracing::info!(
        mime_type = image.mime_type,
        bytes = image.bytes.len(),
        "Analyzing kitchen snapshot"
    );

    let prompt = prompt::analyze_prompt(&request.current_data, vocabulary);
    let text = call_model(state, ModelRequest::with_image(prompt, image)).await?;

    let data = parse_model_text(&text, state.settings.extraction)?;
    let analysis = normalize_critique(data, vocabulary);
    tracing::debug!(
        feasible = ?analysis.feasible(),
        problems = analysis.problems().len(),
        "Snapshot analyzed"
    );

    Ok(AnalyzeResponse {
        status: STATUS_SUCCESS.to_string(),
        analysis: analysis.into_value(),
        model: state.settings.model.clone(),
    })
}

/// Один вызов модели, ограниченный таймаутом. Повторов нет.
async fn call_model(state: &AppState, request: ModelRequest) -> Result<String, ServiceError> {
    let timeout = state.settings.timeout;
    let started = Instant::now();

    let text = tokio::time::timeout(timeout, state.client.generate(request))
        .await
        .map_err(|_| ServiceError::UpstreamTimeout(timeout))??;

    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        chars = text.len(),
        "Model answered"
    );
    Ok(text)
}

fn parse_model_text(text: &str, mode: ExtractionMode) -> Result<Map<String, Value>, ServiceError> {
    let json_text = extract_json_text_with(text, mode);
    tracing::debug!(raw_len = text.len(), extracted_len = json_text.len(), %mode, "Extracted JSON text");
    Ok(parse_object(json_text)?)
}
