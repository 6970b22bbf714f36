//! Token-request orchestrator.
//!
//! Sequences pipeline, credential lookup, signature or refresh-token
//! verification, and issuance, and is the single place that translates
//! component outcomes into wire response codes. Each request is one
//! deterministic pass; there is no retry and no request-spanning state.

use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::error::AuthError;
use crate::jwt::{RefreshTokenVerifier, TokenIssuer};
use crate::request::{PasswordGrant, RefreshGrant, TokenRequest};
use crate::response::{ErrorBody, TokenEnvelope, TokenResponse};
use crate::signature::{build_verifier, SignatureVerifier};
use crate::validation::{self, RequestHeaders};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// The token-issuance core. One instance serves any number of
/// concurrent requests; all of its state is read-only after startup.
pub struct AuthService {
    org_code: String,
    store: Arc<CredentialStore>,
    signature_verifier: Arc<dyn SignatureVerifier>,
    issuer: TokenIssuer,
    refresh_verifier: RefreshTokenVerifier,
}

impl AuthService {
    /// Wire up the service from validated configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let Config {
            org_code,
            signing_secret,
            operators,
            signature_policy,
        } = config;

        let store = Arc::new(CredentialStore::new(operators));
        let signature_verifier = build_verifier(signature_policy, Arc::clone(&store));
        let secret = signing_secret.as_bytes();
        let issuer = TokenIssuer::new(org_code.clone(), secret);
        let refresh_verifier = RefreshTokenVerifier::new(secret);

        AuthService {
            org_code,
            store,
            signature_verifier,
            issuer,
            refresh_verifier,
        }
    }

    /// Handle one token request end to end, returning the envelope the
    /// transport serializes.
    pub fn handle(&self, headers: &RequestHeaders, body: &Value) -> TokenEnvelope {
        match self.handle_token_request(headers, body) {
            Ok(response) => TokenEnvelope::Success(response),
            Err(err) => TokenEnvelope::Failure(ErrorBody::from(&err)),
        }
    }

    /// Fallible form of [`handle`](Self::handle) for callers that want
    /// the typed error (and its HTTP status class).
    ///
    /// # Errors
    ///
    /// Returns the `AuthError` for whichever stage rejected the request.
    pub fn handle_token_request(
        &self,
        headers: &RequestHeaders,
        body: &Value,
    ) -> Result<TokenResponse, AuthError> {
        match validation::validate(headers, body)? {
            TokenRequest::Password(grant) => self.issue_access_token(grant),
            TokenRequest::Refresh(grant) => self.refresh_token(grant),
        }
    }

    /// Password path: org code, credentials, signature, then issuance.
    fn issue_access_token(&self, grant: PasswordGrant) -> Result<TokenResponse, AuthError> {
        if grant.org_code != self.org_code {
            return Err(AuthError::InvalidOrgCode);
        }

        if self
            .store
            .authenticate(&grant.client_id, &grant.client_secret)
            .is_none()
        {
            return Err(AuthError::InvalidClientCredentials);
        }

        if !self
            .signature_verifier
            .verify(&grant.password, &grant.consent, &grant.client_id)
        {
            return Err(AuthError::InvalidSignature);
        }

        let tokens = self
            .issuer
            .issue(&grant.client_id, &grant.username)
            .map_err(|err| {
                warn!(client_id = %grant.client_id, error = %err, "token issuance failed");
                AuthError::IssuanceFault
            })?;

        info!(client_id = %grant.client_id, tx_id = %grant.tx_id, "issued token pair");
        Ok(TokenResponse::new(Some(grant.tx_id), tokens))
    }

    /// Refresh path: credentials, refresh-token verification, then
    /// re-issuance. The org code is deliberately not re-checked here;
    /// the reference contract applies that check to initial issuance
    /// only.
    fn refresh_token(&self, grant: RefreshGrant) -> Result<TokenResponse, AuthError> {
        if self
            .store
            .authenticate(&grant.client_id, &grant.client_secret)
            .is_none()
        {
            return Err(AuthError::InvalidClientCredentials);
        }

        let claims = self
            .refresh_verifier
            .verify(&grant.refresh_token, &grant.client_id)
            .map_err(|err| {
                // Reason stays in the logs; the wire sees one generic code.
                warn!(client_id = %grant.client_id, reason = %err, "refresh token rejected");
                AuthError::InvalidRefreshToken
            })?;

        let tokens = self
            .issuer
            .issue(&grant.client_id, &claims.username)
            .map_err(|err| {
                warn!(client_id = %grant.client_id, error = %err, "token refresh failed");
                AuthError::RefreshFault
            })?;

        info!(client_id = %grant.client_id, "rotated token pair");
        Ok(TokenResponse::new(None, tokens))
    }
}
