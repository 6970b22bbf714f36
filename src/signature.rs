//! Electronic-signature verification policies.
//!
//! The verification contract is side-effect free and never panics:
//! every internal failure (unknown client, bad PEM, bad base64, bad
//! signature) collapses to a `false` result. Which policy runs is an
//! explicit configuration decision, never a code path.

use crate::credentials::CredentialStore;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use ring::signature::{UnparsedPublicKey, RSA_PKCS1_2048_8192_SHA256};
use std::sync::Arc;
use tracing::{debug, warn};

/// Accept/reject decision over a signed consent payload.
pub trait SignatureVerifier: Send + Sync {
    /// Verify `signature_b64` over `signed_payload` for the operator
    /// identified by `client_id`.
    fn verify(&self, signature_b64: &str, signed_payload: &str, client_id: &str) -> bool;
}

/// Which verification policy to run, chosen at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignaturePolicy {
    /// Genuine public-key verification against the operator's
    /// registered key. The default.
    Cryptographic,
    /// Accept every signature. Non-production only; selecting it is
    /// logged loudly.
    AcceptAll,
}

impl SignaturePolicy {
    /// Parse the policy from its configuration literal.
    ///
    /// # Errors
    ///
    /// Returns the unrecognized value so configuration can report it.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "cryptographic" => Ok(SignaturePolicy::Cryptographic),
            "accept-all" => Ok(SignaturePolicy::AcceptAll),
            other => Err(other.to_string()),
        }
    }
}

/// Instantiate the verifier for the configured policy.
#[must_use]
pub fn build_verifier(
    policy: SignaturePolicy,
    store: Arc<CredentialStore>,
) -> Arc<dyn SignatureVerifier> {
    match policy {
        SignaturePolicy::Cryptographic => Arc::new(CryptographicVerifier::new(store)),
        SignaturePolicy::AcceptAll => {
            warn!("signature verification is DISABLED (accept-all policy selected); do not run this configuration in production");
            Arc::new(AcceptAllVerifier)
        }
    }
}

/// Permissive policy for non-production configurations.
pub struct AcceptAllVerifier;

impl SignatureVerifier for AcceptAllVerifier {
    fn verify(&self, _signature_b64: &str, _signed_payload: &str, _client_id: &str) -> bool {
        true
    }
}

/// Production policy: RSA-PKCS1-SHA256 verification of the consent
/// payload against the operator's registered public key.
pub struct CryptographicVerifier {
    store: Arc<CredentialStore>,
}

impl CryptographicVerifier {
    /// Create a verifier backed by the operator credential store.
    #[must_use]
    pub fn new(store: Arc<CredentialStore>) -> Self {
        CryptographicVerifier { store }
    }
}

impl SignatureVerifier for CryptographicVerifier {
    fn verify(&self, signature_b64: &str, signed_payload: &str, client_id: &str) -> bool {
        let Some(operator) = self.store.lookup(client_id) else {
            debug!(client_id, "signature check failed: unknown client");
            return false;
        };

        let Some(key_der) = rsa_public_key_der(&operator.public_key) else {
            debug!(client_id, "signature check failed: unparseable public key");
            return false;
        };

        let Some(signature) = decode_signature(signature_b64) else {
            debug!(client_id, "signature check failed: signature is not valid base64");
            return false;
        };

        let key = UnparsedPublicKey::new(&RSA_PKCS1_2048_8192_SHA256, key_der);
        match key.verify(signed_payload.as_bytes(), &signature) {
            Ok(()) => true,
            Err(_) => {
                debug!(client_id, "signature check failed: signature does not verify");
                false
            }
        }
    }
}

/// Decode the signature field. The scheme specifies url-safe base64;
/// standard encoding is also seen in the wild, so both are accepted.
fn decode_signature(signature_b64: &str) -> Option<Vec<u8>> {
    STANDARD
        .decode(signature_b64)
        .or_else(|_| URL_SAFE_NO_PAD.decode(signature_b64))
        .ok()
}

/// Extract DER `RSAPublicKey` bytes from a PEM block, unwrapping an
/// SPKI envelope when present.
fn rsa_public_key_der(pem_text: &str) -> Option<Vec<u8>> {
    let block = pem::parse(pem_text).ok()?;
    match block.tag() {
        "RSA PUBLIC KEY" => Some(block.contents().to_vec()),
        _ => {
            use x509_parser::prelude::FromDer;
            let (_, spki) =
                x509_parser::x509::SubjectPublicKeyInfo::from_der(block.contents()).ok()?;
            Some(spki.subject_public_key.data.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::OperatorCredential;

    fn store_with_key(public_key: &str) -> Arc<CredentialStore> {
        Arc::new(CredentialStore::new(vec![OperatorCredential {
            client_id: "opA".to_string(),
            client_secret: "sA".to_string(),
            public_key: public_key.to_string(),
        }]))
    }

    #[test]
    fn test_accept_all_always_true() {
        let verifier = AcceptAllVerifier;
        assert!(verifier.verify("anything", "payload", "opA"));
        assert!(verifier.verify("", "", "unknown"));
    }

    #[test]
    fn test_cryptographic_rejects_unknown_client() {
        let verifier = CryptographicVerifier::new(store_with_key(""));
        assert!(!verifier.verify("c2ln", "payload", "opB"));
    }

    #[test]
    fn test_cryptographic_rejects_bad_pem_without_panicking() {
        let verifier = CryptographicVerifier::new(store_with_key("not a pem block"));
        assert!(!verifier.verify("c2ln", "payload", "opA"));
    }

    #[test]
    fn test_cryptographic_rejects_bad_base64() {
        let key = "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n";
        let verifier = CryptographicVerifier::new(store_with_key(key));
        assert!(!verifier.verify("%%not-base64%%", "payload", "opA"));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            SignaturePolicy::parse("cryptographic").unwrap(),
            SignaturePolicy::Cryptographic
        );
        assert_eq!(
            SignaturePolicy::parse("accept-all").unwrap(),
            SignaturePolicy::AcceptAll
        );
        assert!(SignaturePolicy::parse("disabled").is_err());
    }

    #[test]
    fn test_build_verifier_honors_policy() {
        let store = store_with_key("");
        let permissive = build_verifier(SignaturePolicy::AcceptAll, Arc::clone(&store));
        assert!(permissive.verify("x", "y", "nobody"));

        let strict = build_verifier(SignaturePolicy::Cryptographic, store);
        assert!(!strict.verify("x", "y", "nobody"));
    }
}
