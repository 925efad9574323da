//! Session token encodings.
//!
//! Two encodings coexist in the `sessionId` cookie: the legacy one (the raw
//! user ID) and the current one (`{"userId": ..., "orgCode": ...}`). User IDs
//! are opaque here; whether one names a real account is the resolver's call.

use serde::Deserialize;
use serde_json::json;

/// A decoded session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionToken {
    /// Raw user ID, written before organizations existed.
    Legacy(String),
    /// Current encoding. `org_code` is `None` for personal sessions.
    Structured {
        user_id: String,
        org_code: Option<String>,
    },
    /// Anything else. Never an error: treated as "no session".
    Invalid,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredPayload {
    user_id: String,
    #[serde(default)]
    org_code: Option<String>,
}

impl SessionToken {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if raw.starts_with('{') {
            return match serde_json::from_str::<StructuredPayload>(raw) {
                Ok(payload) if !payload.user_id.trim().is_empty() => Self::Structured {
                    user_id: payload.user_id,
                    org_code: payload.org_code.filter(|code| !code.is_empty()),
                },
                _ => Self::Invalid,
            };
        }

        if raw.is_empty() {
            Self::Invalid
        } else {
            Self::Legacy(raw.to_string())
        }
    }

    /// Cookie value in the current encoding.
    pub fn encode(user_id: &str, org_code: Option<&str>) -> String {
        json!({ "userId": user_id, "orgCode": org_code }).to_string()
    }
}
