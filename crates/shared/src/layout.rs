//! Нормализация планировки кухни, полученной от модели.
//!
//! Документ остаётся открытым JSON-объектом: известные поля дополняются
//! значениями по умолчанию, остальные ключи проходят без изменений.

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::{json_type_name, ShapeError};
use crate::vocabulary::{LayoutKeys, Vocabulary};

/// Ширина элемента, если модель её не указала
pub const DEFAULT_ITEM_WIDTH_MM: f64 = 600.0;
pub const DEFAULT_ROOM_WIDTH_MM: f64 = 4000.0;
pub const DEFAULT_ROOM_DEPTH_MM: f64 = 3000.0;
/// Ряд шкафов стоит на z = 0, ряд техники смещён к задней стене
pub const CABINET_ROW_Z: f64 = 0.0;
pub const APPLIANCE_ROW_Z: f64 = 600.0;

const X: &str = "x";
const Y: &str = "y";
const Z: &str = "z";
const ROTATION: &str = "rotation";

/// Нормализованная планировка. Сериализуется как исходный JSON-объект.
#[derive(Debug, Clone, PartialEq)]
pub struct KitchenLayout {
    doc: Map<String, Value>,
    keys: &'static LayoutKeys,
}

impl KitchenLayout {
    pub fn cabinets(&self) -> &[Value] {
        self.items(self.keys.cabinets)
    }

    pub fn appliances(&self) -> &[Value] {
        self.items(self.keys.appliances)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.doc)
    }

    fn items(&self, field: &str) -> &[Value] {
        self.doc
            .get(field)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Serialize for KitchenLayout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.doc.serialize(serializer)
    }
}

/// Дополнить обязательные поля и расставить элементы без координат.
///
/// `iteration` — номер итерации из запроса; текст `improvements` по
/// умолчанию ссылается на следующую (`iteration + 1`).
pub fn normalize_layout(
    mut data: Map<String, Value>,
    iteration: u32,
    vocabulary: &'static Vocabulary,
) -> Result<KitchenLayout, ShapeError> {
    let keys = &vocabulary.layout;

    data.entry(keys.cabinets)
        .or_insert_with(|| Value::Array(Vec::new()));
    data.entry(keys.appliances)
        .or_insert_with(|| Value::Array(Vec::new()));
    data.entry(keys.dimensions)
        .or_insert_with(|| default_dimensions(keys));
    data.entry(keys.improvements).or_insert_with(|| {
        Value::String(format!(
            "{} {}",
            keys.iteration_label,
            u64::from(iteration) + 1
        ))
    });

    place_row(&mut data, keys.cabinets, keys.item_width, CABINET_ROW_Z)?;
    place_row(&mut data, keys.appliances, keys.item_width, APPLIANCE_ROW_Z)?;

    Ok(KitchenLayout { doc: data, keys })
}

fn default_dimensions(keys: &LayoutKeys) -> Value {
    let mut dims = Map::new();
    dims.insert(keys.dimension_width.into(), coordinate(DEFAULT_ROOM_WIDTH_MM));
    dims.insert(keys.dimension_depth.into(), coordinate(DEFAULT_ROOM_DEPTH_MM));
    Value::Object(dims)
}

/// Расставить элементы ряда вдоль оси X.
///
/// Курсор сдвигается на ширину каждого элемента, даже если элемент уже
/// имел `x` и не менялся. Наличие `x` — единственный признак размещённого
/// элемента: `y`, `z`, `rotation` у него не проверяются.
fn place_row(
    data: &mut Map<String, Value>,
    field: &'static str,
    width_key: &'static str,
    row_z: f64,
) -> Result<(), ShapeError> {
    let items = match data.get_mut(field) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ShapeError::NotAList {
                field,
                found: json_type_name(other),
            })
        }
        None => return Ok(()),
    };

    let mut cursor = 0.0_f64;
    for (index, item) in items.iter_mut().enumerate() {
        let item = match item {
            Value::Object(item) => item,
            other => {
                return Err(ShapeError::ItemNotAnObject {
                    field,
                    index,
                    found: json_type_name(other),
                })
            }
        };

        if !item.contains_key(X) {
            item.insert(X.into(), coordinate(cursor));
            item.insert(Z.into(), coordinate(row_z));
            item.insert(ROTATION.into(), Value::from(0));
            item.entry(Y).or_insert_with(|| Value::from(0));
        }

        cursor += item_width(item, field, index, width_key)?;
        if !cursor.is_finite() {
            return Err(ShapeError::CursorOverflow { field, index });
        }
    }
    Ok(())
}

/// Ширина элемента: число из поля ширины или значение по умолчанию
fn item_width(
    item: &Map<String, Value>,
    field: &'static str,
    index: usize,
    width_key: &'static str,
) -> Result<f64, ShapeError> {
    let invalid = || ShapeError::InvalidWidth {
        field,
        index,
        width_field: width_key,
    };
    match item.get(width_key) {
        None => Ok(DEFAULT_ITEM_WIDTH_MM),
        Some(Value::Number(width)) => width.as_f64().ok_or_else(invalid),
        Some(_) => Err(invalid()),
    }
}

/// Целые значения пишутся как целые числа JSON
fn coordinate(value: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() < MAX_EXACT {
        Value::from(value as i64)
    } else {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}
