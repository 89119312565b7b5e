use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod critique;
pub mod error;
pub mod extract;
pub mod layout;
pub mod vocabulary;

pub use critique::{normalize_critique, AnalysisResult};
pub use error::ShapeError;
pub use extract::{extract_json_text, extract_json_text_with, parse_object, ExtractionMode};
pub use layout::{normalize_layout, KitchenLayout};
pub use vocabulary::{Language, Vocabulary};

/// Значение поля `status` в успешных ответах
pub const STATUS_SUCCESS: &str = "success";

/// Запрос на генерацию (или доработку) планировки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub description: String,
    #[serde(default)]
    pub iteration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl GenerateRequest {
    /// Доработка возможна, только если есть и непустой отзыв, и непустая
    /// предыдущая версия. Иначе планировка строится заново по описанию.
    pub fn revision(&self) -> Option<(&Map<String, Value>, &str)> {
        let feedback = self.feedback.as_deref().filter(|f| !f.is_empty())?;
        let previous = self.previous_data.as_ref().filter(|p| !p.is_empty())?;
        Some((previous, feedback))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub status: String,
    pub data: Value,
    pub model: String,
    pub iteration: u32,
}

/// Запрос на анализ снимка модели
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// data URI: `data:image/png;base64,....`
    pub image_base64: String,
    pub current_data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    pub analysis: Value,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub model: String,
}

/// Тело ответа с ошибкой
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}
