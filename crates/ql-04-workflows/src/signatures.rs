//! # Signature Verification Port
//!
//! Cryptographic verification happens outside the core: by the time a
//! transaction reaches handle, its [`SignatureMap`] lists the primitive keys
//! whose signatures over the body checked out. The core only decides
//! whether a (possibly compound) key is satisfied by that set.

use shared_types::{Key, SignatureMap};

/// Decides whether `key` has signed.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, key: &Key, signatures: &SignatureMap) -> bool;
}

/// Evaluates key lists and thresholds against verified primitive keys.
///
/// Structurally invalid keys (empty lists, unreachable thresholds) are
/// never satisfied.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeySatisfactionVerifier;

impl KeySatisfactionVerifier {
    pub fn new() -> Self {
        Self
    }

    fn is_satisfied(key: &Key, signatures: &SignatureMap) -> bool {
        match key {
            Key::Ed25519(_) | Key::EcdsaSecp256k1(_) => signatures.contains(key),
            Key::KeyList(keys) => {
                !keys.is_empty() && keys.iter().all(|k| Self::is_satisfied(k, signatures))
            }
            Key::Threshold { threshold, keys } => {
                if *threshold == 0 || *threshold as usize > keys.len() {
                    return false;
                }
                let signed = keys
                    .iter()
                    .filter(|k| Self::is_satisfied(k, signatures))
                    .count();
                signed >= *threshold as usize
            }
        }
    }
}

impl SignatureVerifier for KeySatisfactionVerifier {
    fn verify(&self, key: &Key, signatures: &SignatureMap) -> bool {
        Self::is_satisfied(key, signatures)
    }
}
