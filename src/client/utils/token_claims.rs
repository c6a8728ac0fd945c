//! Display-only decode of the JWT payload (user id, account type). No
//! signature verification happens client-side; the backend validates the
//! token on every call.

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    pub id: String,
    #[serde(rename = "type", default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Decode the payload segment of a `header.payload.signature` token.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| anyhow!("token is not a JWT"))?;
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| anyhow!("token payload is not base64url: {}", e))?;
    let claims = serde_json::from_slice(&bytes)
        .map_err(|e| anyhow!("token payload is not valid JSON: {}", e))?;
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        let encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload);
        format!("eyJhbGciOiJIUzI1NiJ9.{}.c2ln", encoded)
    }

    #[test]
    fn decodes_id_and_type() {
        let token = token_with_payload(r#"{"id": "u1", "type": "student", "iat": 1}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.id, "u1");
        assert_eq!(claims.user_type.as_deref(), Some("student"));
    }

    #[test]
    fn rejects_non_jwt_input() {
        assert!(decode_claims("just-an-opaque-token").is_err());
        assert!(decode_claims("a.%%%.c").is_err());
    }
}
