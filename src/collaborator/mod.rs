//! Boundary with the wallet/crypto library that actually derives keys.
//!
//! The wizard never touches key material itself: it hands entropy or words
//! to a [`KeyCollaborator`] and interprets the answer. `check_key` serves both
//! "does this phrase reproduce my key" and "which key is this phrase"; the
//! library does not distinguish them, the caller does.

pub mod mnemonic;
pub mod ton;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::CollaboratorError;
use crate::key::{Key, PublicKey};

pub use ton::TonCollaborator;

/// Operations consumed from the key library.
#[async_trait]
pub trait KeyCollaborator: Send + Sync {
    /// One-time initialization. Must succeed before any key operation.
    async fn start(&self) -> Result<(), CollaboratorError>;

    /// Generate a fresh key, mixing in the supplied entropy.
    async fn create_key(&self, entropy: Vec<u8>) -> Result<Key, CollaboratorError>;

    /// Derive the public key a phrase corresponds to.
    async fn check_key(&self, words: Vec<String>) -> Result<PublicKey, CollaboratorError>;

    /// The vocabulary phrases are drawn from.
    async fn valid_words(&self) -> Result<Vec<String>, CollaboratorError>;

    /// Teardown on exit.
    async fn finish(&self);
}

pub type SharedCollaborator = Arc<dyn KeyCollaborator>;
