//! OAuth2 token types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A token is treated as expired this long before its actual expiry.
const EXPIRY_DELTA_SECS: i64 = 10;

/// Credential issued by the token endpoint.
///
/// Legacy cache files use capitalised keys, hence the aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(alias = "AccessToken")]
    pub access_token: String,

    #[serde(default = "default_token_type", alias = "TokenType")]
    pub token_type: String,

    #[serde(default, alias = "RefreshToken", skip_serializing_if = "String::is_empty")]
    pub refresh_token: String,

    /// `None` means the token never expires.
    #[serde(default, alias = "Expiry", skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".into()
}

impl Token {
    /// Returns true if the token is expired (or about to be) at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => expiry - Duration::seconds(EXPIRY_DELTA_SECS) <= now,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }
}

/// Successful JSON body from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl TokenResponse {
    /// Converts the response into a [`Token`] issued at `issued_at`.
    ///
    /// Refresh responses usually omit the refresh token; `previous_refresh`
    /// is carried over in that case.
    pub fn into_token(self, issued_at: DateTime<Utc>, previous_refresh: Option<&str>) -> Token {
        let refresh_token = self
            .refresh_token
            .filter(|t| !t.is_empty())
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default();

        Token {
            access_token: self.access_token,
            token_type: self
                .token_type
                .filter(|t| !t.is_empty())
                .unwrap_or_else(default_token_type),
            refresh_token,
            expiry: self
                .expires_in
                .filter(|secs| *secs > 0)
                .map(|secs| issued_at + Duration::seconds(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn token_expiring(expiry: Option<DateTime<Utc>>) -> Token {
        Token {
            access_token: "ya29.abc".into(),
            token_type: "Bearer".into(),
            refresh_token: String::new(),
            expiry,
        }
    }

    #[test]
    fn token_without_expiry_never_expires() {
        assert!(!token_expiring(None).is_expired_at(at(1_000_000)));
    }

    #[test]
    fn token_expires_with_delta() {
        let token = token_expiring(Some(at(100)));
        assert!(!token.is_expired_at(at(0)));
        assert!(!token.is_expired_at(at(89)));
        assert!(token.is_expired_at(at(90)));
        assert!(token.is_expired_at(at(200)));
    }

    #[test]
    fn response_into_token_sets_expiry() {
        let resp: TokenResponse = serde_json::from_str(
            r#"{"access_token":"a1","token_type":"Bearer","expires_in":3600,"refresh_token":"r1"}"#,
        )
        .unwrap();
        let token = resp.into_token(at(0), None);
        assert_eq!(token.access_token, "a1");
        assert_eq!(token.refresh_token, "r1");
        assert_eq!(token.expiry, Some(at(3600)));
        assert!(token.can_refresh());
    }

    #[test]
    fn refresh_response_keeps_previous_refresh_token() {
        let resp: TokenResponse =
            serde_json::from_str(r#"{"access_token":"a2","expires_in":3600}"#).unwrap();
        let token = resp.into_token(at(0), Some("r-old"));
        assert_eq!(token.access_token, "a2");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.refresh_token, "r-old");
    }

    #[test]
    fn token_json_roundtrip_omits_empty_fields() {
        let token = token_expiring(None);
        let json = serde_json::to_string(&token).unwrap();
        assert!(!json.contains("refresh_token"));
        assert!(!json.contains("expiry"));
        let parsed: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn legacy_cache_keys_are_accepted() {
        let json = r#"{
            "AccessToken": "ya29.legacy",
            "RefreshToken": "1/refresh",
            "Expiry": "2013-06-01T10:00:00Z"
        }"#;
        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "ya29.legacy");
        assert_eq!(token.refresh_token, "1/refresh");
        assert_eq!(token.token_type, "Bearer");
        assert!(token.is_expired());
    }
}
