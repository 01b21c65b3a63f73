//! Response envelope normalization.
//!
//! The backend is inconsistent about how it wraps payloads. Depending on the
//! endpoint a list may arrive as a bare array, as `{data: [...]}`, as a Spring
//! page `{data: {content: [...]}}`, or (for the calendar) as `{tasks: [...]}`.
//! Everything in this module is total: malformed input yields an empty value,
//! never a panic or an error.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Keys under which a list payload may be nested, checked in order.
const LIST_KEYS: [&str; 2] = ["content", "tasks"];

/// Keys that may carry a bearer token in an auth response.
const TOKEN_KEYS: [&str; 3] = ["accessToken", "token", "access_token"];

/// Parse a response body without ever failing.
///
/// An empty body becomes `{}`; a body that is not JSON becomes
/// `{"raw": "<text>"}`.
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Map::new());
    }
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => {
            let mut raw = Map::new();
            raw.insert("raw".to_string(), Value::String(text.to_string()));
            Value::Object(raw)
        }
    }
}

/// Return `body.data` when present and non-null, otherwise `body` itself.
pub fn unwrap_data(body: &Value) -> &Value {
    match body.get("data") {
        Some(data) if !data.is_null() => data,
        _ => body,
    }
}

/// Normalize any list-shaped response into an ordered sequence.
pub fn normalize_list(body: &Value) -> Vec<Value> {
    if let Some(items) = find_list(body) {
        return items.clone();
    }
    if let Some(data) = body.get("data") {
        if let Some(items) = find_list(data) {
            return items.clone();
        }
    }
    Vec::new()
}

fn find_list(value: &Value) -> Option<&Vec<Value>> {
    if let Value::Array(items) = value {
        return Some(items);
    }
    LIST_KEYS
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_array))
}

/// Deserialize every element of a list response, skipping entries that do not fit.
pub fn normalize_typed_list<T>(body: &Value) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
{
    normalize_list(body)
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Skipping malformed list entry: {}", e);
                None
            }
        })
        .collect()
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Pick the human-readable failure message for a non-2xx response.
pub fn error_message(body: &Value, status_text: &str, fallback: &str) -> String {
    non_empty_str(body, "message")
        .or_else(|| non_empty_str(body, "error"))
        .or_else(|| Some(status_text).filter(|s| !s.trim().is_empty()))
        .unwrap_or(fallback)
        .to_string()
}

/// Optional success message carried by the backend's `ApiResponse` wrapper.
pub fn success_message(body: &Value) -> Option<String> {
    non_empty_str(body, "message").map(str::to_string)
}

/// Extract an access token from a login/register response.
pub fn extract_token(body: &Value) -> Option<String> {
    TOKEN_KEYS
        .iter()
        .find_map(|key| non_empty_str(body, key))
        .or_else(|| {
            body.get("data")
                .and_then(|data| non_empty_str(data, "accessToken"))
        })
        .map(str::to_string)
}

/// Extract the user payload from a login/register response (`user`, else `data`).
pub fn extract_user(body: &Value) -> Option<&Value> {
    ["user", "data"]
        .iter()
        .find_map(|key| body.get(*key).filter(|v| v.is_object()))
}

/// Read a numeric or numeric-string id.
pub fn value_as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Pagination metadata from a Spring page object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub number: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl PageInfo {
    pub fn from_payload(payload: &Value) -> Self {
        let read = |key: &str| payload.get(key).and_then(Value::as_u64).unwrap_or(0);
        // Out-of-range page numbers clamp instead of wrapping
        let clamp = |key: &str| u32::try_from(read(key)).unwrap_or(u32::MAX);
        Self {
            number: clamp("number"),
            total_pages: clamp("totalPages"),
            total_elements: read("totalElements"),
        }
    }

    /// Whether a following page exists.
    pub fn has_more(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_variants() {
        assert_eq!(parse_body(""), json!({}));
        assert_eq!(parse_body("   "), json!({}));
        assert_eq!(parse_body(r#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(parse_body("Bad Gateway"), json!({"raw": "Bad Gateway"}));
    }

    #[test]
    fn test_normalize_list_shapes() {
        let expected = vec![json!({"id": 1}), json!({"id": 2})];

        assert_eq!(normalize_list(&json!([{"id": 1}, {"id": 2}])), expected);
        assert_eq!(normalize_list(&json!({"data": [{"id": 1}, {"id": 2}]})), expected);
        assert_eq!(
            normalize_list(&json!({"data": {"content": [{"id": 1}, {"id": 2}], "totalElements": 2}})),
            expected
        );
        assert_eq!(normalize_list(&json!({"content": [{"id": 1}, {"id": 2}]})), expected);
        assert_eq!(normalize_list(&json!({"tasks": [{"id": 1}, {"id": 2}]})), expected);
        assert_eq!(normalize_list(&json!({"data": {"tasks": [{"id": 1}, {"id": 2}]}})), expected);
    }

    #[test]
    fn test_normalize_list_malformed_is_empty() {
        for body in [
            json!({}),
            json!(null),
            json!("text"),
            json!(42),
            json!({"data": null}),
            json!({"data": {"content": "nope"}}),
            json!({"data": {"id": 7}}),
            parse_body("<html>oops</html>"),
            parse_body(""),
        ] {
            assert!(normalize_list(&body).is_empty(), "expected empty for {body}");
        }
    }

    #[test]
    fn test_normalize_list_preserves_order() {
        let body = json!({"data": {"content": [{"id": 3}, {"id": 1}, {"id": 2}]}});
        let ids: Vec<i64> = normalize_list(&body)
            .iter()
            .filter_map(|v| v.get("id").and_then(value_as_id))
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_extract_token_field_variants() {
        assert_eq!(extract_token(&json!({"accessToken": "a"})), Some("a".into()));
        assert_eq!(extract_token(&json!({"token": "b"})), Some("b".into()));
        assert_eq!(extract_token(&json!({"access_token": "c"})), Some("c".into()));
        assert_eq!(
            extract_token(&json!({"data": {"accessToken": "d", "tokenType": "Bearer"}})),
            Some("d".into())
        );
        assert_eq!(extract_token(&json!({"accessToken": ""})), None);
        assert_eq!(extract_token(&json!({})), None);
    }

    #[test]
    fn test_extract_user_prefers_user_key() {
        let body = json!({"user": {"id": 1}, "data": {"id": 2}});
        assert_eq!(extract_user(&body), Some(&json!({"id": 1})));
        let body = json!({"data": {"id": 2}});
        assert_eq!(extract_user(&body), Some(&json!({"id": 2})));
        assert_eq!(extract_user(&json!({"data": "str"})), None);
    }

    #[test]
    fn test_unwrap_data() {
        assert_eq!(unwrap_data(&json!({"data": {"id": 1}})), &json!({"id": 1}));
        assert_eq!(unwrap_data(&json!({"data": null, "id": 2})), &json!({"data": null, "id": 2}));
        assert_eq!(unwrap_data(&json!({"id": 3})), &json!({"id": 3}));
    }

    #[test]
    fn test_page_info() {
        let page = PageInfo::from_payload(&json!({"number": 0, "totalPages": 3, "totalElements": 41}));
        assert_eq!(page.total_elements, 41);
        assert!(page.has_more());
        let last = PageInfo::from_payload(&json!({"number": 2, "totalPages": 3}));
        assert!(!last.has_more());
        assert!(!PageInfo::default().has_more());
    }

    #[test]
    fn test_page_info_huge_numbers_clamp() {
        let page = PageInfo::from_payload(&json!({"number": 4294967295u64, "totalPages": 4294967296u64}));
        assert_eq!(page.number, u32::MAX);
        assert_eq!(page.total_pages, u32::MAX);
        assert!(!page.has_more());

        let page = PageInfo::from_payload(&json!({"number": 3, "totalPages": 99999999999u64}));
        assert_eq!(page.total_pages, u32::MAX);
        assert!(page.has_more());

        let page = PageInfo::from_payload(&json!({"number": -1, "totalPages": "7"}));
        assert_eq!(page, PageInfo::default());
    }
}
