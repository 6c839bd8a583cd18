//! Response envelopes. The upstream wraps collections and records under
//! different keys depending on the endpoint, so bodies are decoded through
//! `serde_json::Value` first.

use crate::UserRecord;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys that may hold a collection, in lookup priority.
pub const LIST_KEYS: [&str; 5] = ["data", "items", "content", "safeUsers", "users"];

/// Extract a collection from any of the conventional envelopes. A body with
/// none of them is an empty collection.
pub fn parse_list<T: DeserializeOwned>(
    body: Value,
) -> Result<Vec<T>, serde_json::Error> {
    let list = match body {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => LIST_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(v @ Value::Array(_)) => Some(v),
                _ => None,
            })
            .unwrap_or(Value::Array(Vec::new())),
        _ => Value::Array(Vec::new()),
    };
    serde_json::from_value(list)
}

/// Extract a single record, looking under each of `keys` and then at the body
/// itself. Returns `None` when nothing in the body looks like the record.
pub fn parse_record<T: DeserializeOwned>(
    body: Value,
    keys: &[&str],
) -> Option<T> {
    if let Value::Object(map) = &body {
        for key in keys {
            if let Some(inner @ Value::Object(_)) = map.get(*key)
                && let Ok(record) = serde_json::from_value(inner.clone())
            {
                return Some(record);
            }
        }
    }
    serde_json::from_value(body).ok()
}

/// Human readable message from an error body. NestJS-style validation errors
/// carry `message` as an array of strings.
pub fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };
    match value.get("message") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

/// Successful login body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserRecord,
    #[serde(default, alias = "token")]
    pub access_token: Option<String>,
}

impl LoginResponse {
    /// The bearer credential, wherever the upstream put it.
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .or(self.user.access_token.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompanyRecord, ManagedUserRecord, UserId};
    use serde_json::json;

    #[test]
    fn list_keys_are_checked_in_priority_order() {
        let body = json!({
            "users": [{"id": 2, "email": "late@x.com"}],
            "safeUsers": [{"id": 1, "email": "early@x.com"}],
        });
        let users: Vec<ManagedUserRecord> = parse_list(body).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "early@x.com");
    }

    #[test]
    fn bare_arrays_and_unknown_envelopes() {
        let bare: Vec<ManagedUserRecord> =
            parse_list(json!([{"id": 1, "email": "a@x.com"}])).unwrap();
        assert_eq!(bare.len(), 1);

        let unknown: Vec<ManagedUserRecord> =
            parse_list(json!({"total": 0, "rows": []})).unwrap();
        assert!(unknown.is_empty());

        // A key holding something other than an array is skipped.
        let companies: Vec<CompanyRecord> = parse_list(json!({
            "data": {"page": 1},
            "items": [{"id": 1, "name": "Acme"}],
        }))
        .unwrap();
        assert_eq!(companies[0].name, "Acme");
    }

    #[test]
    fn record_lookup_falls_back_to_body() {
        let nested: ManagedUserRecord = parse_record(
            json!({"safeRop": {"id": 3, "email": "r@x.com"}}),
            &["safeRop", "data"],
        )
        .unwrap();
        assert_eq!(nested.id, UserId(3));

        let bare: ManagedUserRecord = parse_record(
            json!({"id": 4, "email": "s@x.com"}),
            &["safeRop", "data"],
        )
        .unwrap();
        assert_eq!(bare.id, UserId(4));

        let missing: Option<ManagedUserRecord> =
            parse_record(json!({"message": "ok"}), &["data"]);
        assert!(missing.is_none());
    }

    #[test]
    fn error_messages_from_various_bodies() {
        assert_eq!(error_message(r#"{"message":"email taken"}"#), "email taken");
        assert_eq!(
            error_message(r#"{"message":["email must be an email","password too short"]}"#),
            "email must be an email, password too short"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(r#"{"statusCode":500}"#), "");
    }

    #[test]
    fn login_token_may_sit_on_the_user() {
        let response: LoginResponse = serde_json::from_value(json!({
            "user": {
                "id": 1,
                "email": "admin@procrm.uz",
                "role": "SUPERADMIN",
                "accessToken": "abc",
            }
        }))
        .unwrap();
        assert_eq!(response.token(), Some("abc"));
    }
}
