//! Registered MyData operator credentials.
//!
//! The store is built once from configuration and never mutated
//! afterwards; concurrent reads need no locking. Provisioning and
//! persistence are external concerns.

use std::collections::HashMap;
use subtle::ConstantTimeEq;

/// One authorized relay/data-operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorCredential {
    /// Client identifier issued at portal registration.
    pub client_id: String,
    /// Shared secret presented alongside the client identifier.
    pub client_secret: String,
    /// PEM-encoded public key for electronic-signature verification.
    pub public_key: String,
}

/// Immutable lookup table of authorized operators, keyed by client id.
#[derive(Debug, Default)]
pub struct CredentialStore {
    operators: HashMap<String, OperatorCredential>,
}

impl CredentialStore {
    /// Build the store from the configured operator entries.
    pub fn new(operators: impl IntoIterator<Item = OperatorCredential>) -> Self {
        CredentialStore {
            operators: operators
                .into_iter()
                .map(|op| (op.client_id.clone(), op))
                .collect(),
        }
    }

    /// Look up an operator by client id.
    #[must_use]
    pub fn lookup(&self, client_id: &str) -> Option<&OperatorCredential> {
        self.operators.get(client_id)
    }

    /// Look up an operator and check its secret in constant time.
    ///
    /// Returns `None` for both the unknown-client and wrong-secret
    /// cases; callers must not be able to tell them apart.
    #[must_use]
    pub fn authenticate(&self, client_id: &str, client_secret: &str) -> Option<&OperatorCredential> {
        let operator = self.lookup(client_id)?;
        let matches: bool = operator
            .client_secret
            .as_bytes()
            .ct_eq(client_secret.as_bytes())
            .into();
        matches.then_some(operator)
    }

    /// Number of registered operators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether no operators are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator(id: &str, secret: &str) -> OperatorCredential {
        OperatorCredential {
            client_id: id.to_string(),
            client_secret: secret.to_string(),
            public_key: String::new(),
        }
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let store = CredentialStore::new(vec![operator("opA", "sA")]);
        assert!(store.lookup("opA").is_some());
        assert!(store.lookup("opB").is_none());
    }

    #[test]
    fn test_authenticate_matches_secret() {
        let store = CredentialStore::new(vec![operator("opA", "sA")]);
        assert!(store.authenticate("opA", "sA").is_some());
        assert!(store.authenticate("opA", "wrong").is_none());
        assert!(store.authenticate("unknown", "sA").is_none());
    }

    #[test]
    fn test_supports_multiple_operators() {
        let store = CredentialStore::new(vec![operator("opA", "sA"), operator("opB", "sB")]);
        assert_eq!(store.len(), 2);
        assert!(store.authenticate("opB", "sB").is_some());
        assert!(store.authenticate("opB", "sA").is_none());
    }
}
