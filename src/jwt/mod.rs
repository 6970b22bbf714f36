//! Signed-token capsule: claims, issuance, and refresh verification.
//!
//! Tokens are HS256 JWTs signed with the shared organization secret.
//! The claim shape and TTLs here are contract; the signing scheme is
//! an implementation detail behind [`TokenIssuer`] / [`RefreshTokenVerifier`].

pub mod claims;
pub mod issuer;
pub mod verifier;

pub use claims::{TokenClaims, TokenKind};
pub use issuer::{TokenIssuer, TokenPair};
pub use verifier::{RefreshTokenVerifier, RefreshVerifyError};

/// Embedded access-token lifetime: 7 days.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;
/// Embedded refresh-token lifetime: 30 days.
pub const REFRESH_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;
