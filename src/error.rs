//! Request-level error taxonomy.
//!
//! Every failure a token request can produce maps to one entry of the
//! closed `rsp_code` enumeration shared with counterpart MyData systems.
//! The orchestrator is the only place that converts component outcomes
//! into these codes.

use thiserror::Error;

/// A failed token request, carrying exactly the detail that may reach
/// the wire. Internal diagnostics (verifier reasons, signing faults) are
/// logged where they occur and never stored here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Request did not declare a JSON content type.
    #[error("Invalid content type. Must be application/json")]
    InvalidContentType,

    /// Transaction-correlation header absent.
    #[error("Missing x-api-tran-id header")]
    MissingTransactionId,

    /// One or more base required body fields absent.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<String>),

    /// Password grant missing username / password / consent.
    #[error("Missing required fields for password grant type")]
    MissingPasswordGrantFields,

    /// Refresh grant missing the refresh token itself.
    #[error("Missing refresh token")]
    MissingRefreshToken,

    /// Unknown `grant_type` discriminant.
    #[error("Invalid grant type")]
    InvalidGrantType,

    /// `org_code` does not match the configured organization.
    #[error("Invalid organization code")]
    InvalidOrgCode,

    /// Unknown client or wrong secret. Deliberately indistinguishable.
    #[error("Invalid client credentials")]
    InvalidClientCredentials,

    /// Electronic signature rejected by the configured policy.
    #[error("Invalid electronic signature")]
    InvalidSignature,

    /// Refresh token failed verification for any reason.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Unexpected fault outside the issuance/refresh sites.
    #[error("Internal server error")]
    Internal,

    /// Token minting failed on the password path.
    #[error("Internal server error during token issuance")]
    IssuanceFault,

    /// Token minting failed on the refresh path.
    #[error("Internal server error during token refresh")]
    RefreshFault,
}

impl AuthError {
    /// The wire response code. These literals are part of the
    /// integration contract and must not drift.
    #[must_use]
    pub fn rsp_code(&self) -> &'static str {
        match self {
            // 40001 covers both the content-type and org-code rejections
            // in the reference contract.
            AuthError::InvalidContentType | AuthError::InvalidOrgCode => "40001",
            AuthError::MissingTransactionId => "40002",
            AuthError::MissingRequiredFields(_) => "40003",
            AuthError::MissingPasswordGrantFields => "40004",
            AuthError::MissingRefreshToken => "40005",
            AuthError::InvalidGrantType => "40006",
            AuthError::InvalidClientCredentials => "40101",
            AuthError::InvalidSignature => "40102",
            AuthError::InvalidRefreshToken => "40103",
            AuthError::Internal => "50000",
            AuthError::IssuanceFault => "50001",
            AuthError::RefreshFault => "50002",
        }
    }

    /// HTTP status class for transports that want one.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            AuthError::InvalidContentType
            | AuthError::MissingTransactionId
            | AuthError::MissingRequiredFields(_)
            | AuthError::MissingPasswordGrantFields
            | AuthError::MissingRefreshToken
            | AuthError::InvalidGrantType
            | AuthError::InvalidOrgCode => 400,
            AuthError::InvalidClientCredentials
            | AuthError::InvalidSignature
            | AuthError::InvalidRefreshToken => 401,
            AuthError::Internal | AuthError::IssuanceFault | AuthError::RefreshFault => 500,
        }
    }
}
