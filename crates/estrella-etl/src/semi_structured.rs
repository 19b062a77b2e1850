//! Parsing for the JSON-like cells of the export (`estrellas_calificacion`,
//! `mejores_comentarios`, `comentarios_clientes`).
//!
//! Cells are usually JSON, sometimes Python-repr style with single quotes.
//! [`parse_semi_structured`] returns a tagged result so callers can count
//! malformed input instead of silently discarding it.

use serde_json::{Map, Value};

use crate::scalar::is_missing;

/// Outcome of parsing one semi-structured cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SemiStructured {
    /// Empty cell or a null marker such as `NaN`.
    Missing,
    Parsed(Value),
    /// Neither strict JSON nor JSON after quote substitution. Holds the
    /// strict parser's error message.
    Malformed(String),
}

/// Parse a cell as JSON, retrying with single quotes swapped for double
/// quotes when the strict parse fails.
#[must_use]
pub fn parse_semi_structured(raw: &str) -> SemiStructured {
    let trimmed = raw.trim();
    if is_missing(trimmed) {
        return SemiStructured::Missing;
    }
    match parse_lenient(trimmed) {
        Ok(value) => SemiStructured::Parsed(value),
        Err(err) => SemiStructured::Malformed(err.to_string()),
    }
}

fn parse_lenient(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str::<Value>(text).or_else(|strict| {
        serde_json::from_str::<Value>(&text.replace('\'', "\"")).map_err(|_| strict)
    })
}

impl SemiStructured {
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, SemiStructured::Malformed(_))
    }

    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            SemiStructured::Parsed(value) => Some(value),
            SemiStructured::Missing | SemiStructured::Malformed(_) => None,
        }
    }

    /// Mapping view of the cell.
    ///
    /// An object is returned as is. A list contributes its first element when
    /// that element is an object, or a string that itself parses to an
    /// object. Anything else, `[]` included, is an empty mapping.
    #[must_use]
    pub fn as_mapping(&self) -> Map<String, Value> {
        let Some(value) = self.value() else {
            return Map::new();
        };
        match value {
            Value::Object(map) => map.clone(),
            Value::Array(items) => match items.first() {
                Some(Value::Object(map)) => map.clone(),
                Some(Value::String(inner)) => match parse_lenient(inner.trim()) {
                    Ok(Value::Object(map)) => map,
                    _ => Map::new(),
                },
                _ => Map::new(),
            },
            _ => Map::new(),
        }
    }

    /// Object elements of a list-valued cell. Non-list cells have none.
    #[must_use]
    pub fn records(&self) -> Vec<&Map<String, Value>> {
        match self.value() {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
            _ => Vec::new(),
        }
    }
}
