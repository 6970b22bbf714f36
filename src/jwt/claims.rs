//! Claims embedded in issued tokens.

use serde::{Deserialize, Serialize};

/// Discriminates the two token roles inside the shared claim shape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenKind {
    /// Bearer credential presented on data requests.
    #[serde(rename = "access_token")]
    Access,
    /// Credential exchanged for a fresh pair.
    #[serde(rename = "refresh_token")]
    Refresh,
}

/// Claim set carried by both token roles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Token role.
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Operator the token was issued to.
    pub client_id: String,
    /// Customer identity the token is bound to.
    pub username: String,
    /// Issuing organization code.
    pub org_code: String,
    /// Issue instant, seconds since epoch.
    pub iat: i64,
    /// Expiry instant, seconds since epoch.
    pub exp: i64,
    /// Unique token id; distinguishes tokens minted within one second.
    pub jti: String,
}

impl TokenClaims {
    /// Claims for a token minted now with the given lifetime.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        client_id: impl Into<String>,
        username: impl Into<String>,
        org_code: impl Into<String>,
        ttl_seconds: i64,
    ) -> Self {
        let now = chrono::Utc::now().timestamp();
        TokenClaims {
            kind,
            client_id: client_id.into(),
            username: username.into(),
            org_code: org_code.into(),
            iat: now,
            exp: now + ttl_seconds,
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Whether the expiry instant has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.exp < chrono::Utc::now().timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let claims = TokenClaims::new(TokenKind::Access, "opA", "user1", "BANK1", 900);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.client_id, "opA");
        assert_eq!(claims.exp, claims.iat + 900);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_kind_serializes_to_contract_literals() {
        let access = serde_json::to_value(TokenKind::Access).unwrap();
        let refresh = serde_json::to_value(TokenKind::Refresh).unwrap();
        assert_eq!(access, "access_token");
        assert_eq!(refresh, "refresh_token");
    }

    #[test]
    fn test_type_field_name_on_the_wire() {
        let claims = TokenClaims::new(TokenKind::Refresh, "opA", "user1", "BANK1", 60);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "refresh_token");
    }

    #[test]
    fn test_jti_unique_per_mint() {
        let a = TokenClaims::new(TokenKind::Access, "opA", "user1", "BANK1", 60);
        let b = TokenClaims::new(TokenKind::Access, "opA", "user1", "BANK1", 60);
        assert_ne!(a.jti, b.jti);
    }
}
