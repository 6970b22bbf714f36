//! Process configuration.
//!
//! Loaded from environment variables and validated at startup. A
//! missing organization code or signing secret is fatal here, never a
//! per-request error.

use crate::credentials::OperatorCredential;
use crate::signature::SignaturePolicy;
use std::env;
use thiserror::Error;

/// Startup configuration failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required environment variables absent.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),

    /// `SIGNATURE_POLICY` carried an unrecognized value.
    #[error("Invalid SIGNATURE_POLICY: {0} (expected \"cryptographic\" or \"accept-all\")")]
    InvalidSignaturePolicy(String),
}

/// Everything needed to construct the credential store and orchestrator.
#[derive(Debug, Clone)]
pub struct Config {
    /// Organization code of the issuing institution.
    pub org_code: String,
    /// Shared secret signing all issued tokens.
    pub signing_secret: String,
    /// Registered operator credentials.
    pub operators: Vec<OperatorCredential>,
    /// Selected signature-verification policy.
    pub signature_policy: SignaturePolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Seeds at most one operator from `MYDATA_CLIENT_ID` /
    /// `MYDATA_CLIENT_SECRET` / `MYDATA_PUBLIC_KEY`; additional
    /// operators can be appended programmatically before the service
    /// is constructed.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming every missing required variable,
    /// or rejecting an unknown signature policy.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let org_code = env::var("BANK_ORG_CODE").ok().filter(|v| !v.is_empty());
        let signing_secret = env::var("JWT_SECRET_KEY").ok().filter(|v| !v.is_empty());

        let missing: Vec<String> = [
            ("BANK_ORG_CODE", org_code.is_none()),
            ("JWT_SECRET_KEY", signing_secret.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| (*name).to_string())
        .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingEnvVars(missing));
        }

        let mut operators = Vec::new();
        if let Ok(client_id) = env::var("MYDATA_CLIENT_ID") {
            if !client_id.is_empty() {
                operators.push(OperatorCredential {
                    client_id,
                    client_secret: env::var("MYDATA_CLIENT_SECRET").unwrap_or_default(),
                    public_key: env::var("MYDATA_PUBLIC_KEY").unwrap_or_default(),
                });
            }
        }

        let signature_policy = match env::var("SIGNATURE_POLICY") {
            Ok(raw) => SignaturePolicy::parse(&raw).map_err(ConfigError::InvalidSignaturePolicy)?,
            Err(_) => SignaturePolicy::Cryptographic,
        };

        Ok(Config {
            // Guarded by the missing-variable check above.
            org_code: org_code.unwrap_or_default(),
            signing_secret: signing_secret.unwrap_or_default(),
            operators,
            signature_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment manipulation is process-global, so every scenario
    // runs inside one test.
    #[test]
    fn test_from_env_scenarios() {
        env::remove_var("BANK_ORG_CODE");
        env::remove_var("JWT_SECRET_KEY");
        env::remove_var("MYDATA_CLIENT_ID");
        env::remove_var("MYDATA_CLIENT_SECRET");
        env::remove_var("MYDATA_PUBLIC_KEY");
        env::remove_var("SIGNATURE_POLICY");

        // Missing both required variables: both are named.
        let err = Config::from_env().unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingEnvVars(vec![
                "BANK_ORG_CODE".to_string(),
                "JWT_SECRET_KEY".to_string(),
            ])
        );

        // Missing only the secret.
        env::set_var("BANK_ORG_CODE", "BANK1");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVars(vec!["JWT_SECRET_KEY".to_string()]));

        // Complete configuration with a seeded operator.
        env::set_var("JWT_SECRET_KEY", "secret");
        env::set_var("MYDATA_CLIENT_ID", "opA");
        env::set_var("MYDATA_CLIENT_SECRET", "sA");
        env::set_var("MYDATA_PUBLIC_KEY", "-----BEGIN PUBLIC KEY-----");
        let config = Config::from_env().unwrap();
        assert_eq!(config.org_code, "BANK1");
        assert_eq!(config.operators.len(), 1);
        assert_eq!(config.operators[0].client_id, "opA");
        assert_eq!(config.signature_policy, SignaturePolicy::Cryptographic);

        // Explicit permissive policy.
        env::set_var("SIGNATURE_POLICY", "accept-all");
        let config = Config::from_env().unwrap();
        assert_eq!(config.signature_policy, SignaturePolicy::AcceptAll);

        // Unknown policy value is rejected.
        env::set_var("SIGNATURE_POLICY", "off");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err, ConfigError::InvalidSignaturePolicy("off".to_string()));

        env::remove_var("BANK_ORG_CODE");
        env::remove_var("JWT_SECRET_KEY");
        env::remove_var("MYDATA_CLIENT_ID");
        env::remove_var("MYDATA_CLIENT_SECRET");
        env::remove_var("MYDATA_PUBLIC_KEY");
        env::remove_var("SIGNATURE_POLICY");
    }
}
