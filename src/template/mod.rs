//! Query templates and the parameter binder.
//!
//! A [`Template`] is a persisted `{natural language, SQL, parameters}`
//! record. Its parameter bag is an arbitrary JSON object that has
//! accumulated several historical shapes: bare scalars, typed wrapper
//! objects, single strings where arrays were meant, and key aliases in
//! mixed case. The binder works in both directions over that bag:
//!
//! - [`substitute_template`] — forward: fill `{{ name }}` placeholders in
//!   the template's SQL with literal values.
//! - [`hydrate_selection_from_template`] — reverse: rebuild a
//!   [`crate::selection::Selection`] from the stored bag.
//!
//! Both directions are total. Hydration is advisory convenience, not a
//! correctness-critical path; a malformed bag must never block the user
//! from continuing to edit, so every unresolvable field degrades to
//! "unchanged" and every unresolvable key is skipped.

mod hydrate;
mod params;
mod substitute;

pub use hydrate::hydrate_selection_from_template;
pub use params::{ParamKind, ParamValue, ScalarValue};
pub use substitute::{substitute_template, unresolved_placeholders};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A persisted query template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub natural_language_template: String,
    #[serde(default)]
    pub sql_template: String,
    /// Free-form parameter bag; `null` in stored records reads as empty.
    #[serde(default, deserialize_with = "null_as_empty_map")]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub is_public: bool,
}

fn null_as_empty_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Map<String, Value>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Distinct template categories, in first-seen order.
pub fn categories(templates: &[Template]) -> Vec<String> {
    let mut seen = Vec::new();
    for template in templates {
        if let Some(category) = &template.category {
            if !category.is_empty() && !seen.contains(category) {
                seen.push(category.clone());
            }
        }
    }
    seen
}
