//! Forward substitution: template SQL + parameter bag → SQL text.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use super::params::{JsonMap, ParamValue};

/// Matches any `{{ name }}` placeholder, arbitrary inner whitespace.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*(.+?)\s*\}\}").expect("placeholder pattern"));

/// Substitute every placeholder that has a bag entry with a usable value.
///
/// For each bag key, all occurrences of `{{ key }}` are replaced with the
/// key's literal (see [`ParamValue::literal`]); keys whose entries have no
/// usable value are skipped, and placeholders with no bag entry are left
/// verbatim. The function is total: at worst it returns the template
/// unchanged. An empty bag is the identity.
pub fn substitute_template(sql_template: &str, parameters: &JsonMap) -> String {
    if parameters.is_empty() || !PLACEHOLDER.is_match(sql_template) {
        return sql_template.to_string();
    }

    let mut sql = sql_template.to_string();
    for (key, raw) in parameters {
        let literal = match ParamValue::classify(raw).literal() {
            Some(literal) => literal,
            None => continue,
        };
        // The key is escaped, so bag keys holding regex metacharacters
        // still match their placeholder textually.
        let pattern = format!(r"\{{\{{\s*{}\s*\}}\}}", regex::escape(key));
        let matcher = match Regex::new(&pattern) {
            Ok(matcher) => matcher,
            Err(_) => continue,
        };
        sql = matcher.replace_all(&sql, NoExpand(&literal)).into_owned();
    }
    sql
}

/// Placeholder names still present in a SQL text, in order of appearance.
///
/// Useful after substitution to warn about parameters the bag did not
/// cover.
pub fn unresolved_placeholders(sql: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(sql)
        .map(|captures| captures[1].to_string())
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: serde_json::Value) -> JsonMap {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_bag_is_identity() {
        let sql = "SELECT * FROM orders WHERE dt >= {{start}}";
        assert_eq!(substitute_template(sql, &JsonMap::new()), sql);
    }

    #[test]
    fn test_number_wrapper() {
        let sql = "WHERE d >= {{start_days}}";
        let parameters = bag(json!({"start_days": {"type": "number", "value": 7}}));
        assert_eq!(substitute_template(sql, &parameters), "WHERE d >= 7");
    }

    #[test]
    fn test_bare_scalars_and_whitespace_tolerance() {
        let sql = "SELECT * FROM t WHERE a = {{a}} AND b = {{  b  }} AND a2 = {{ a }}";
        let parameters = bag(json!({"a": 1, "b": "x"}));
        assert_eq!(
            substitute_template(sql, &parameters),
            "SELECT * FROM t WHERE a = 1 AND b = 'x' AND a2 = 1"
        );
    }

    #[test]
    fn test_string_values_are_quoted_and_escaped() {
        let sql = "WHERE name = {{who}}";
        let parameters = bag(json!({"who": "O'Brien"}));
        assert_eq!(substitute_template(sql, &parameters), "WHERE name = 'O''Brien'");
    }

    #[test]
    fn test_daterange_fills_start_only() {
        let sql = "WHERE dt BETWEEN {{range}} AND {{range_end}}";
        let parameters = bag(json!({
            "range": {"type": "daterange", "start": "2024-01-01", "end": "2024-06-30"}
        }));
        assert_eq!(
            substitute_template(sql, &parameters),
            "WHERE dt BETWEEN '2024-01-01' AND {{range_end}}"
        );
    }

    #[test]
    fn test_unmatched_placeholders_left_verbatim() {
        let sql = "WHERE a = {{a}} AND b = {{b}}";
        let parameters = bag(json!({"a": 1}));
        assert_eq!(
            substitute_template(sql, &parameters),
            "WHERE a = 1 AND b = {{b}}"
        );
    }

    #[test]
    fn test_unsupported_entries_are_skipped() {
        let sql = "WHERE a = {{a}} AND b = {{b}}";
        let parameters = bag(json!({"a": null, "b": 2}));
        assert_eq!(
            substitute_template(sql, &parameters),
            "WHERE a = {{a}} AND b = 2"
        );
    }

    #[test]
    fn test_replacement_is_not_dollar_expanded() {
        let sql = "WHERE label = {{label}}";
        let parameters = bag(json!({"label": "$1 off"}));
        assert_eq!(
            substitute_template(sql, &parameters),
            "WHERE label = '$1 off'"
        );
    }

    #[test]
    fn test_metacharacter_key_matches_textually() {
        let sql = "WHERE v = {{a.b}}";
        let parameters = bag(json!({"a.b": 3}));
        assert_eq!(substitute_template(sql, &parameters), "WHERE v = 3");
    }

    #[test]
    fn test_unresolved_placeholders() {
        let sql = "WHERE a = {{ a }} AND b = {{b}} AND a2 = {{ a }}";
        assert_eq!(unresolved_placeholders(sql), vec!["a", "b", "a"]);
        assert!(unresolved_placeholders("SELECT 1").is_empty());
    }
}
