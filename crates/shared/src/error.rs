use thiserror::Error;

/// Ошибки разбора и нормализации ответа модели
#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("model response is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("model response is a JSON {found}, expected an object")]
    NotAnObject { found: &'static str },

    #[error("field '{field}' must be a list, got {found}")]
    NotAList {
        field: &'static str,
        found: &'static str,
    },

    #[error("item {index} of '{field}' must be an object, got {found}")]
    ItemNotAnObject {
        field: &'static str,
        index: usize,
        found: &'static str,
    },

    #[error("item {index} of '{field}' has a non-numeric '{width_field}'")]
    InvalidWidth {
        field: &'static str,
        index: usize,
        width_field: &'static str,
    },

    #[error("items of '{field}' up to index {index} are too wide to place")]
    CursorOverflow { field: &'static str, index: usize },
}

/// Название JSON-типа для сообщений об ошибках
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
