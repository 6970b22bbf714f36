//! MyData token service core.
//!
//! Bank-side issuance and refresh of bearer access tokens for approved
//! MyData relay operators (the IA-002 token endpoint): request
//! validation, operator credential verification, pluggable
//! electronic-signature verification, JWT minting, and refresh-token
//! verification/rotation. Transport, routing, and schema middleware are
//! external collaborators; they hand [`service::AuthService`] parsed
//! header metadata plus a JSON body and serialize the returned envelope.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod credentials;
pub mod error;
pub mod jwt;
pub mod request;
pub mod response;
pub mod service;
pub mod signature;
pub mod validation;

// Re-exports for convenience
pub use config::{Config, ConfigError};
pub use credentials::{CredentialStore, OperatorCredential};
pub use error::AuthError;
pub use response::{ErrorBody, TokenEnvelope, TokenResponse};
pub use service::AuthService;
pub use signature::{SignaturePolicy, SignatureVerifier};
pub use validation::RequestHeaders;
