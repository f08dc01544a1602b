//! Parameter-bag values.
//!
//! Bag entries arrive in every shape the console has ever written: bare
//! scalars, `{type, value}` wrappers, `{type, value, options}` selects,
//! and `{type, start, end}` date ranges. [`ParamValue::classify`] sorts an
//! entry into exactly one of those shapes; anything else lands in the
//! explicit [`ParamValue::Unsupported`] arm and is skipped by
//! substitution instead of failing it.

use serde_json::{Map, Number, Value};

use crate::compile::sql_string_literal;

pub(crate) type JsonMap = Map<String, Value>;

// =============================================================================
// Scalars
// =============================================================================

/// Scalar payload of a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Number(Number),
    Text(String),
    Bool(bool),
}

impl ScalarValue {
    fn classify(value: &Value) -> Option<ScalarValue> {
        match value {
            Value::Number(n) => Some(ScalarValue::Number(n.clone())),
            Value::String(s) => Some(ScalarValue::Text(s.clone())),
            Value::Bool(b) => Some(ScalarValue::Bool(*b)),
            _ => None,
        }
    }

    /// SQL literal form: numbers bare, everything else quoted.
    pub fn literal(&self) -> String {
        match self {
            ScalarValue::Number(n) => n.to_string(),
            ScalarValue::Text(s) => sql_string_literal(s),
            ScalarValue::Bool(b) => sql_string_literal(if *b { "true" } else { "false" }),
        }
    }
}

// =============================================================================
// Typed wrappers
// =============================================================================

/// Kind tag carried by wrapper objects. Unknown tags read as `Text`; the
/// tag only matters to parameter editors, not to substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamKind {
    #[default]
    Text,
    Number,
    Date,
    Select,
    DateRange,
}

impl ParamKind {
    fn from_tag(tag: Option<&Value>) -> ParamKind {
        match tag.and_then(Value::as_str) {
            Some("number") => ParamKind::Number,
            Some("date") => ParamKind::Date,
            Some("select") => ParamKind::Select,
            Some("daterange") => ParamKind::DateRange,
            _ => ParamKind::Text,
        }
    }
}

/// One parameter-bag entry, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Bare scalar: `7`, `"beijing"`.
    Scalar(ScalarValue),
    /// Wrapper object carrying a `value` payload.
    Wrapped { kind: ParamKind, value: ScalarValue },
    /// Wrapper carrying both bounds of a date range. Substitution binds
    /// only the start bound; the end bound is kept for editing but is
    /// deliberately never filled into the SQL text.
    Range { start: ScalarValue, end: ScalarValue },
    /// Any other shape. Skipped by substitution.
    Unsupported,
}

impl ParamValue {
    /// Classify a raw bag entry. A wrapper's `value` wins over its
    /// `start`/`end` pair when both are present.
    pub fn classify(value: &Value) -> ParamValue {
        match value {
            Value::Object(map) => {
                let kind = ParamKind::from_tag(map.get("type"));
                if let Some(payload) = map.get("value") {
                    match ScalarValue::classify(payload) {
                        Some(value) => ParamValue::Wrapped { kind, value },
                        None => ParamValue::Unsupported,
                    }
                } else if let (Some(start), Some(end)) = (map.get("start"), map.get("end")) {
                    match (ScalarValue::classify(start), ScalarValue::classify(end)) {
                        (Some(start), Some(end)) => ParamValue::Range { start, end },
                        _ => ParamValue::Unsupported,
                    }
                } else {
                    ParamValue::Unsupported
                }
            }
            scalar => match ScalarValue::classify(scalar) {
                Some(value) => ParamValue::Scalar(value),
                None => ParamValue::Unsupported,
            },
        }
    }

    /// The literal substituted for this parameter, if it has one.
    pub fn literal(&self) -> Option<String> {
        match self {
            ParamValue::Scalar(value) | ParamValue::Wrapped { value, .. } => {
                Some(value.literal())
            }
            ParamValue::Range { start, .. } => Some(start.literal()),
            ParamValue::Unsupported => None,
        }
    }
}

// =============================================================================
// Alias lookup
// =============================================================================

/// Look a key up under several aliases; each candidate is tried exactly,
/// then lower-cased, then upper-cased, before moving to the next.
pub(crate) fn pick<'a>(bag: &'a JsonMap, candidates: &[&str]) -> Option<&'a Value> {
    for key in candidates {
        if let Some(value) = bag.get(*key) {
            return Some(value);
        }
        if let Some(value) = bag.get(&key.to_lowercase()) {
            return Some(value);
        }
        if let Some(value) = bag.get(&key.to_uppercase()) {
            return Some(value);
        }
    }
    None
}

// =============================================================================
// Tests
// =============================================================================
