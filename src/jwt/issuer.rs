//! Access/refresh token pair minting.

use crate::jwt::claims::{TokenClaims, TokenKind};
use crate::jwt::{ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

/// A freshly minted access/refresh pair. Issuance is all-or-nothing;
/// there is no partial success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// 7-day access token.
    pub access_token: String,
    /// 30-day refresh token.
    pub refresh_token: String,
}

/// Mints token pairs signed with the shared organization secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    org_code: String,
}

impl TokenIssuer {
    /// Create an issuer for the given organization and signing secret.
    #[must_use]
    pub fn new(org_code: impl Into<String>, secret: &[u8]) -> Self {
        TokenIssuer {
            encoding_key: EncodingKey::from_secret(secret),
            org_code: org_code.into(),
        }
    }

    /// Mint a new pair bound to the operator and customer identity.
    ///
    /// Signing includes the issue instant and a fresh `jti`, so repeated
    /// calls with identical inputs never produce identical tokens.
    ///
    /// # Errors
    ///
    /// Returns the underlying encoding error if signing fails; callers
    /// map this to an internal-fault response.
    pub fn issue(
        &self,
        client_id: &str,
        username: &str,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let access_token = self.sign(TokenClaims::new(
            TokenKind::Access,
            client_id,
            username,
            &self.org_code,
            ACCESS_TOKEN_TTL_SECS,
        ))?;
        let refresh_token = self.sign(TokenClaims::new(
            TokenKind::Refresh,
            client_id,
            username,
            &self.org_code,
            REFRESH_TOKEN_TTL_SECS,
        ))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn sign(&self, claims: TokenClaims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }
}
