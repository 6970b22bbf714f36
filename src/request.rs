//! Validated token-request variants.
//!
//! Produced exclusively by the validation pipeline; once one of these
//! exists, every field the flow needs is known to be present.

/// Grant-type discriminant for the initial password-based issuance.
pub const GRANT_TYPE_PASSWORD: &str = "password";
/// Grant-type discriminant for refresh-token re-issuance.
pub const GRANT_TYPE_REFRESH: &str = "refresh_token";

/// Fields of a `grant_type=password` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordGrant {
    /// Transaction id echoed back on success.
    pub tx_id: String,
    /// Information-provider (bank) code claimed by the caller.
    pub org_code: String,
    /// Operator client id.
    pub client_id: String,
    /// Operator client secret.
    pub client_secret: String,
    /// Customer identity the tokens are bound to.
    pub username: String,
    /// Electronic signature over the consent payload, base64-encoded.
    pub password: String,
    /// Signed transmission-request payload.
    pub consent: String,
}

/// Fields of a `grant_type=refresh_token` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshGrant {
    /// Operator client id.
    pub client_id: String,
    /// Operator client secret.
    pub client_secret: String,
    /// The refresh token being exchanged.
    pub refresh_token: String,
}

/// A token request that passed the validation pipeline, tagged by grant type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRequest {
    /// Initial issuance against customer credentials and consent.
    Password(PasswordGrant),
    /// Re-issuance against a previously issued refresh token.
    Refresh(RefreshGrant),
}
