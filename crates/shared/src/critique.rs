use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::vocabulary::{AnalysisKeys, Vocabulary};

/// Результат анализа снимка 3D-модели.
///
/// Поля не дополняются: неполный анализ тоже полезен клиенту.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    doc: Map<String, Value>,
    keys: &'static AnalysisKeys,
}

impl AnalysisResult {
    pub fn feasible(&self) -> Option<bool> {
        self.doc.get(self.keys.feasible).and_then(Value::as_bool)
    }

    pub fn problems(&self) -> Vec<&str> {
        self.doc
            .get(self.keys.problems)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.doc)
    }
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.doc.serialize(serializer)
    }
}

pub fn normalize_critique(data: Map<String, Value>, vocabulary: &'static Vocabulary) -> AnalysisResult {
    AnalysisResult {
        doc: data,
        keys: &vocabulary.analysis,
    }
}
