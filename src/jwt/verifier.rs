//! Refresh-token verification.

use crate::jwt::claims::{TokenClaims, TokenKind};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use thiserror::Error;

/// Why a refresh token was rejected. Logged internally only; the wire
/// response collapses every case to a single generic rejection.
#[derive(Error, Debug)]
pub enum RefreshVerifyError {
    /// Bad signature, malformed token, or expired (expiry is enforced
    /// during decode).
    #[error("refresh token failed decode: {0}")]
    Decode(#[from] jsonwebtoken::errors::Error),

    /// Token verified but its `type` claim is not `refresh_token`.
    #[error("token type is not refresh_token")]
    WrongTokenType,

    /// Token verified but was issued to a different client.
    #[error("token client_id does not match the presented client_id")]
    ClientIdMismatch,
}

/// Validates refresh tokens against the shared organization secret.
pub struct RefreshTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl RefreshTokenVerifier {
    /// Create a verifier for the given signing secret.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        validation.leeway = 0;
        RefreshTokenVerifier {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Check signature, expiry, token type, and client binding, in that
    /// order, and return the embedded claims.
    ///
    /// # Errors
    ///
    /// Returns the precise rejection reason for internal logging.
    pub fn verify(
        &self,
        token: &str,
        expected_client_id: &str,
    ) -> Result<TokenClaims, RefreshVerifyError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.kind != TokenKind::Refresh {
            return Err(RefreshVerifyError::WrongTokenType);
        }
        if claims.client_id != expected_client_id {
            return Err(RefreshVerifyError::ClientIdMismatch);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::issuer::TokenIssuer;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &[u8] = b"test-signing-secret";

    fn verifier() -> RefreshTokenVerifier {
        RefreshTokenVerifier::new(SECRET)
    }

    #[test]
    fn test_accepts_issued_refresh_token() {
        let pair = TokenIssuer::new("BANK1", SECRET).issue("opA", "user1").unwrap();
        let claims = verifier().verify(&pair.refresh_token, "opA").unwrap();
        assert_eq!(claims.username, "user1");
        assert_eq!(claims.org_code, "BANK1");
    }

    #[test]
    fn test_rejects_access_token_in_refresh_slot() {
        let pair = TokenIssuer::new("BANK1", SECRET).issue("opA", "user1").unwrap();
        let err = verifier().verify(&pair.access_token, "opA").unwrap_err();
        assert!(matches!(err, RefreshVerifyError::WrongTokenType));
    }

    #[test]
    fn test_rejects_client_id_mismatch() {
        let pair = TokenIssuer::new("BANK1", SECRET).issue("opA", "user1").unwrap();
        let err = verifier().verify(&pair.refresh_token, "opB").unwrap_err();
        assert!(matches!(err, RefreshVerifyError::ClientIdMismatch));
    }

    #[test]
    fn test_rejects_wrong_signing_secret() {
        let pair = TokenIssuer::new("BANK1", b"other-secret").issue("opA", "user1").unwrap();
        let err = verifier().verify(&pair.refresh_token, "opA").unwrap_err();
        assert!(matches!(err, RefreshVerifyError::Decode(_)));
    }

    #[test]
    fn test_rejects_tampered_token() {
        let pair = TokenIssuer::new("BANK1", SECRET).issue("opA", "user1").unwrap();
        let mut tampered = pair.refresh_token;
        let flipped = if tampered.ends_with('A') { 'B' } else { 'A' };
        tampered.pop();
        tampered.push(flipped);
        assert!(verifier().verify(&tampered, "opA").is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let now = chrono::Utc::now().timestamp();
        let claims = TokenClaims {
            kind: TokenKind::Refresh,
            client_id: "opA".to_string(),
            username: "user1".to_string(),
            org_code: "BANK1".to_string(),
            iat: now - 7200,
            exp: now - 3600,
            jti: uuid::Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        let err = verifier().verify(&token, "opA").unwrap_err();
        assert!(matches!(err, RefreshVerifyError::Decode(_)));
    }
}
