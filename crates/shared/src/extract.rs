//! Выделение JSON-объекта из свободного текста ответа модели.
//!
//! Порядок правил: блок ```json, затем любой блок ```, затем диапазон от
//! первой `{` до последней `}`. Если ничего не найдено, текст возвращается
//! без изменений и ошибка проявится при разборе.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{json_type_name, ShapeError};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Как искать объект, если в тексте нет блоков кода
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// От первой `{` до последней `}`, вложенность не проверяется
    #[default]
    Lenient,
    /// Первый сбалансированный объект верхнего уровня
    Strict,
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::Lenient => f.write_str("lenient"),
            ExtractionMode::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(ExtractionMode::Lenient),
            "strict" => Ok(ExtractionMode::Strict),
            other => Err(format!(
                "unknown extraction mode '{}' (expected 'lenient' or 'strict')",
                other
            )),
        }
    }
}

/// Выделить JSON из текста в режиме по умолчанию
pub fn extract_json_text(raw: &str) -> &str {
    extract_json_text_with(raw, ExtractionMode::Lenient)
}

pub fn extract_json_text_with(raw: &str, mode: ExtractionMode) -> &str {
    if let Some(block) = fenced_block(raw, JSON_FENCE) {
        return block;
    }
    if let Some(block) = fenced_block(raw, FENCE) {
        return block;
    }

    let span = match mode {
        ExtractionMode::Lenient => outer_brace_span(raw),
        ExtractionMode::Strict => first_balanced_object(raw).or_else(|| outer_brace_span(raw)),
    };
    span.unwrap_or(raw)
}

/// Разобрать выделенный текст и убедиться, что это объект
pub fn parse_object(text: &str) -> Result<Map<String, Value>, ShapeError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(ShapeError::NotAnObject {
            found: json_type_name(&other),
        }),
    }
}

/// Текст между открывающим маркером и следующим ```; без закрытия — до конца
fn fenced_block<'a>(raw: &'a str, opening: &str) -> Option<&'a str> {
    let start = raw.find(opening)? + opening.len();
    let rest = &raw[start..];
    let end = rest.find(FENCE).unwrap_or(rest.len());
    Some(rest[..end].trim())
}

fn outer_brace_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn first_balanced_object(raw: &str) -> Option<&str> {
    raw.match_indices('{')
        .find_map(|(start, _)| balanced_end(&raw[start..]).map(|len| &raw[start..start + len]))
}

/// Длина сбалансированного объекта в начале `s` (s начинается с `{`).
/// Скобки внутри строковых литералов не считаются.
fn balanced_end(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_json_is_unchanged() {
        let text = r#"{"a":1,"b":{"c":[1,2,3]}}"#;
        assert_eq!(extract_json_text(text), text);
    }

    #[test]
    fn test_json_fence() {
        let text = "Tässä suunnitelma:\n```json\n{\"nimi\": \"X\"}\n```\nKiitos!";
        assert_eq!(extract_json_text(text), r#"{"nimi": "X"}"#);
    }

    #[test]
    fn test_json_fence_takes_precedence_over_generic_fence() {
        let text = "```\n{\"generic\": true}\n```\nand\n```json\n{\"tagged\": true}\n```";
        assert_eq!(extract_json_text(text), r#"{"tagged": true}"#);
    }

    #[test]
    fn test_generic_fence() {
        let text = "Result:\n```\n  {\"a\": 1}  \n```\n";
        assert_eq!(extract_json_text(text), r#"{"a": 1}"#);
    }

    #[test]
    fn test_unclosed_fence_takes_rest() {
        let text = "```json\n{\"a\": 1}\n";
        assert_eq!(extract_json_text(text), r#"{"a": 1}"#);
    }

    #[test]
    fn test_brace_fallback() {
        assert_eq!(extract_json_text(r#"blah {"a":1} blah"#), r#"{"a":1}"#);
    }

    #[test]
    fn test_brace_fallback_spans_first_to_last() {
        let text = r#"first {"a":1} then {"b":2} done"#;
        assert_eq!(extract_json_text(text), r#"{"a":1} then {"b":2}"#);
        assert!(parse_object(extract_json_text(text)).is_err());
    }

    #[test]
    fn test_nested_objects_are_included() {
        let text = r#"see {"a":{"b":{"c":1}}} ok"#;
        assert_eq!(extract_json_text(text), r#"{"a":{"b":{"c":1}}}"#);
    }

    #[test]
    fn test_no_fence_no_braces_passthrough() {
        let text = "I cannot help with that.";
        assert_eq!(extract_json_text(text), text);
    }

    #[test]
    fn test_closing_before_opening_passthrough() {
        let text = "} nothing here {";
        assert_eq!(extract_json_text(text), text);
    }

    #[test]
    fn test_fence_with_invalid_json_fails_at_parse() {
        let text = "```json\nnot json at all\n```";
        let extracted = extract_json_text(text);
        assert_eq!(extracted, "not json at all");
        assert!(matches!(
            parse_object(extracted),
            Err(ShapeError::MalformedJson(_))
        ));
    }

    #[test]
    fn test_parse_object_rejects_non_objects() {
        let err = parse_object("[1, 2]").unwrap_err();
        assert!(matches!(err, ShapeError::NotAnObject { found: "array" }));
    }

    #[test]
    fn test_strict_takes_first_balanced_object() {
        let text = r#"first {"a":1} then {"b":2} done"#;
        assert_eq!(
            extract_json_text_with(text, ExtractionMode::Strict),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn test_strict_ignores_braces_in_strings() {
        let text = r#"note {"text":"use } and { freely","n":1} trailing }"#;
        assert_eq!(
            extract_json_text_with(text, ExtractionMode::Strict),
            r#"{"text":"use } and { freely","n":1}"#
        );
    }

    #[test]
    fn test_strict_falls_back_when_unbalanced() {
        let text = r#"{"a":1"#;
        assert_eq!(extract_json_text_with(text, ExtractionMode::Strict), text);
        let text = r#"{ broken { "a": 1 "#;
        assert_eq!(extract_json_text_with(text, ExtractionMode::Strict), text);
    }

    #[test]
    fn test_strict_still_prefers_fences() {
        let text = "{\"outside\":1}\n```json\n{\"inside\":1}\n```";
        assert_eq!(
            extract_json_text_with(text, ExtractionMode::Strict),
            r#"{"inside":1}"#
        );
    }

    #[test]
    fn test_extraction_mode_from_str() {
        assert_eq!("Strict".parse::<ExtractionMode>(), Ok(ExtractionMode::Strict));
        assert_eq!("lenient".parse::<ExtractionMode>(), Ok(ExtractionMode::Lenient));
        assert!("fuzzy".parse::<ExtractionMode>().is_err());
    }
}
