//! Wire response envelope.
//!
//! The field names, fixed values, and advertised lifetimes below are
//! part of the integration contract with counterpart MyData systems.

use crate::error::AuthError;
use crate::jwt::{TokenPair, REFRESH_TOKEN_TTL_SECS};
use serde::{Deserialize, Serialize};

/// Fixed token type advertised on success.
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
/// Scope granted to issued access tokens.
pub const SCOPE_BANK_READ: &str = "bank-read";
/// Advertised access-token lifetime in seconds. Fixed by the contract,
/// independent of the token's embedded expiry.
pub const ACCESS_TOKEN_EXPIRES_IN: u64 = 3600;
/// Advertised refresh-token lifetime in seconds, derived from the
/// issuer's actual refresh TTL.
pub const REFRESH_TOKEN_EXPIRES_IN: u64 = REFRESH_TOKEN_TTL_SECS as u64;

/// Successful issuance/refresh response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// Echoed transaction id; present on the password path only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    /// Always `Bearer`.
    pub token_type: String,
    /// Newly minted access token.
    pub access_token: String,
    /// Advertised access-token lifetime in seconds.
    pub expires_in: u64,
    /// Newly minted refresh token.
    pub refresh_token: String,
    /// Advertised refresh-token lifetime in seconds.
    pub refresh_token_expires_in: u64,
    /// Granted scope.
    pub scope: String,
}

impl TokenResponse {
    /// Build the contract envelope around a freshly minted pair.
    #[must_use]
    pub fn new(tx_id: Option<String>, tokens: TokenPair) -> Self {
        TokenResponse {
            tx_id,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            access_token: tokens.access_token,
            expires_in: ACCESS_TOKEN_EXPIRES_IN,
            refresh_token: tokens.refresh_token,
            refresh_token_expires_in: REFRESH_TOKEN_EXPIRES_IN,
            scope: SCOPE_BANK_READ.to_string(),
        }
    }
}

/// Failure response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Detailed response code from the closed enumeration.
    pub rsp_code: String,
    /// Human-readable detail. Never carries claim or credential detail.
    pub rsp_msg: String,
}

impl From<&AuthError> for ErrorBody {
    fn from(err: &AuthError) -> Self {
        ErrorBody {
            rsp_code: err.rsp_code().to_string(),
            rsp_msg: err.to_string(),
        }
    }
}

/// Either outcome of a token request, ready for serialization.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TokenEnvelope {
    /// 200-equivalent success body.
    Success(TokenResponse),
    /// Rejection body with its `rsp_code`.
    Failure(ErrorBody),
}
