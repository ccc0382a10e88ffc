// Total accessors over loosely-typed upstream JSON. A path that is
// missing, null, or of the wrong type reads as `None` (or empty), never
// as an error.

use serde_json::Value;

/// Walk nested object keys.
pub fn field<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Trimmed string, `None` when blank.
pub fn text_at(value: &Value, path: &[&str]) -> Option<String> {
    field(value, path)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn text_or(value: &Value, path: &[&str], fallback: &str) -> String {
    text_at(value, path).unwrap_or_else(|| fallback.to_string())
}

pub fn number_at(value: &Value, path: &[&str]) -> Option<f64> {
    field(value, path)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

pub fn bool_at(value: &Value, path: &[&str]) -> Option<bool> {
    field(value, path).and_then(Value::as_bool)
}

/// Array entries rendered as trimmed strings; nulls, nested values and
/// blanks are dropped. Anything that is not an array reads as empty.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn string_list_at(value: &Value, path: &[&str]) -> Vec<String> {
    string_list(field(value, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_lookup_tolerates_wrong_types() {
        let doc = json!({"a": {"b": "  hi  "}, "n": "12", "x": null});
        assert_eq!(text_at(&doc, &["a", "b"]), Some("hi".to_string()));
        assert_eq!(text_at(&doc, &["a", "b", "c"]), None);
        assert_eq!(number_at(&doc, &["n"]), None);
        assert_eq!(text_at(&doc, &["x"]), None);
        assert_eq!(text_or(&doc, &["missing"], "-"), "-");
    }

    #[test]
    fn non_object_root_is_empty() {
        let doc = json!([1, 2, 3]);
        assert_eq!(field(&doc, &["a"]), None);
        assert_eq!(bool_at(&doc, &["a"]), None);
    }

    #[test]
    fn string_lists_are_trimmed_and_filtered() {
        let doc = json!({"risks": ["  low liquidity ", "", 42, null, {"k": 1}, true]});
        assert_eq!(
            string_list_at(&doc, &["risks"]),
            vec!["low liquidity", "42", "true"]
        );
        assert!(string_list_at(&json!({"risks": "nope"}), &["risks"]).is_empty());
    }
}
