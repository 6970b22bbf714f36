//! Ordered request-validation pipeline.
//!
//! Checks run cheapest-first and short-circuit on the first failure so
//! every failure class maps to one deterministic `rsp_code`. Field-level
//! checks within a stage report all missing names at once.

use crate::error::AuthError;
use crate::request::{PasswordGrant, RefreshGrant, TokenRequest, GRANT_TYPE_PASSWORD, GRANT_TYPE_REFRESH};
use serde_json::Value;

/// Header name carrying the transaction-correlation identifier.
pub const TRAN_ID_HEADER: &str = "x-api-tran-id";

/// Base body fields required regardless of grant type, in contract order.
const BASE_FIELDS: [&str; 5] = ["tx_id", "org_code", "grant_type", "client_id", "client_secret"];

/// Fields additionally required by the password grant.
const PASSWORD_FIELDS: [&str; 3] = ["username", "password", "consent"];

/// The inbound metadata the pipeline inspects. The transport owns header
/// parsing; only presence and value matter here.
#[derive(Debug, Clone, Default)]
pub struct RequestHeaders {
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// Value of the `x-api-tran-id` header, if present.
    pub transaction_id: Option<String>,
}

impl RequestHeaders {
    /// Headers for a well-formed JSON request with the given tran id.
    #[must_use]
    pub fn json(transaction_id: impl Into<String>) -> Self {
        RequestHeaders {
            content_type: Some("application/json".to_string()),
            transaction_id: Some(transaction_id.into()),
        }
    }
}

/// Run the full pipeline over raw headers and a parsed JSON body.
///
/// # Errors
///
/// Returns the `AuthError` for the first failing stage: `40001` for a
/// non-JSON content type, `40002` for a missing tran id, `40003` for
/// missing base fields, `40004`/`40005` for missing grant-specific
/// fields, `40006` for an unknown grant type.
pub fn validate(headers: &RequestHeaders, body: &Value) -> Result<TokenRequest, AuthError> {
    check_content_type(headers)?;
    check_transaction_id(headers)?;
    check_base_fields(body)?;
    build_request(body)
}

fn check_content_type(headers: &RequestHeaders) -> Result<(), AuthError> {
    match &headers.content_type {
        Some(ct) if ct.contains("application/json") => Ok(()),
        _ => Err(AuthError::InvalidContentType),
    }
}

fn check_transaction_id(headers: &RequestHeaders) -> Result<(), AuthError> {
    match &headers.transaction_id {
        Some(id) if !id.is_empty() => Ok(()),
        _ => Err(AuthError::MissingTransactionId),
    }
}

fn check_base_fields(body: &Value) -> Result<(), AuthError> {
    let missing: Vec<String> = BASE_FIELDS
        .iter()
        .filter(|field| field_str(body, field).is_none())
        .map(|field| (*field).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AuthError::MissingRequiredFields(missing))
    }
}

fn build_request(body: &Value) -> Result<TokenRequest, AuthError> {
    // check_base_fields already guaranteed these.
    let grant_type = required(body, "grant_type");

    match grant_type.as_str() {
        GRANT_TYPE_PASSWORD => {
            if PASSWORD_FIELDS.iter().any(|f| field_str(body, f).is_none()) {
                return Err(AuthError::MissingPasswordGrantFields);
            }
            Ok(TokenRequest::Password(PasswordGrant {
                tx_id: required(body, "tx_id"),
                org_code: required(body, "org_code"),
                client_id: required(body, "client_id"),
                client_secret: required(body, "client_secret"),
                username: required(body, "username"),
                password: required(body, "password"),
                consent: required(body, "consent"),
            }))
        }
        GRANT_TYPE_REFRESH => {
            let refresh_token =
                field_str(body, "refresh_token").ok_or(AuthError::MissingRefreshToken)?;
            Ok(TokenRequest::Refresh(RefreshGrant {
                client_id: required(body, "client_id"),
                client_secret: required(body, "client_secret"),
                refresh_token: refresh_token.to_string(),
            }))
        }
        _ => Err(AuthError::InvalidGrantType),
    }
}

/// A field is present iff it is a non-empty JSON string.
fn field_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn required(body: &Value, field: &str) -> String {
    field_str(body, field).unwrap_or_default().to_string()
}
