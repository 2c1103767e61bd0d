//! In-process key library implementing the TON mnemonic scheme.

use async_trait::async_trait;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use zeroize::Zeroize;

use super::mnemonic::{word_list, Mnemonic};
use super::KeyCollaborator;
use crate::config::{KdfConfig, KeygenConfig};
use crate::error::CollaboratorError;
use crate::key::{Key, PublicKey};

/// blake3 derive-key context for the generation RNG seed
const RNG_CONTEXT: &str = "tonkeygen 2024 mnemonic rng seed";

/// Derives keys on blocking threads so the UI loop never stalls on PBKDF2.
pub struct TonCollaborator {
    kdf: KdfConfig,
    data_dir: Option<PathBuf>,
    started: AtomicBool,
    /// OS randomness gathered once at start and mixed into every generation
    pool: Arc<OnceCell<[u8; 32]>>,
}

impl TonCollaborator {
    pub fn new(kdf: KdfConfig, data_dir: Option<PathBuf>) -> Self {
        Self {
            kdf,
            data_dir,
            started: AtomicBool::new(false),
            pool: Arc::new(OnceCell::new()),
        }
    }

    pub fn from_config(config: &KeygenConfig) -> Self {
        Self::new(config.kdf, config.storage.resolve_data_dir())
    }

    fn ensure_started(&self) -> Result<(), CollaboratorError> {
        if self.started.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(CollaboratorError::not_started())
        }
    }

    async fn pool(&self) -> [u8; 32] {
        *self.pool.get_or_init(|| async { gather_pool() }).await
    }
}

fn gather_pool() -> [u8; 32] {
    let mut pool = [0u8; 32];
    OsRng.fill_bytes(&mut pool);
    pool
}

/// Generation RNG seeded from the pool, fresh OS bytes and the user's input.
fn mixed_rng(pool: &[u8; 32], user_entropy: &[u8]) -> StdRng {
    let mut fresh = [0u8; 32];
    OsRng.fill_bytes(&mut fresh);
    let mut hasher = blake3::Hasher::new_derive_key(RNG_CONTEXT);
    hasher.update(pool);
    hasher.update(&fresh);
    hasher.update(user_entropy);
    let mut seed = *hasher.finalize().as_bytes();
    fresh.zeroize();
    let rng = StdRng::from_seed(seed);
    seed.zeroize();
    rng
}

#[async_trait]
impl KeyCollaborator for TonCollaborator {
    async fn start(&self) -> Result<(), CollaboratorError> {
        if let Some(dir) = &self.data_dir {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                CollaboratorError::internal(format!(
                    "KEYSTORE_DIR_FAILED: {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        let pool = Arc::clone(&self.pool);
        tokio::spawn(async move {
            pool.get_or_init(|| async { gather_pool() }).await;
            debug!("RNG pool pre-seeded");
        });

        self.started.store(true, Ordering::Release);
        info!(
            iterations = self.kdf.iterations,
            data_dir = ?self.data_dir,
            "Key library started"
        );
        Ok(())
    }

    async fn create_key(&self, entropy: Vec<u8>) -> Result<Key, CollaboratorError> {
        self.ensure_started()?;
        if entropy.is_empty() {
            return Err(CollaboratorError::new(400, "EMPTY_ENTROPY"));
        }
        let pool = self.pool().await;
        let kdf = self.kdf;

        tokio::task::spawn_blocking(move || -> Result<Key, CollaboratorError> {
            let mut entropy = entropy;
            let mut rng = mixed_rng(&pool, &entropy);
            entropy.zeroize();
            let mnemonic = Mnemonic::generate(&mut rng, &kdf)?;
            let public_key = mnemonic.public_key(&kdf);
            debug!(public_key = %public_key, "Key generated");
            Key::new(public_key, mnemonic.words().to_vec())
                .map_err(|e| CollaboratorError::internal(e.to_string()))
        })
        .await
        .map_err(|e| CollaboratorError::internal(format!("key generation task failed: {}", e)))?
    }

    async fn check_key(&self, words: Vec<String>) -> Result<PublicKey, CollaboratorError> {
        self.ensure_started()?;
        let kdf = self.kdf;

        tokio::task::spawn_blocking(move || -> Result<PublicKey, CollaboratorError> {
            let mnemonic = Mnemonic::from_words(words)?;
            if !mnemonic.is_basic_seed(&kdf) {
                if mnemonic.is_password_seed() {
                    return Err(CollaboratorError::need_mnemonic_password());
                }
                return Err(CollaboratorError::invalid_mnemonic(
                    "phrase does not form a seed",
                ));
            }
            Ok(mnemonic.public_key(&kdf))
        })
        .await
        .map_err(|e| CollaboratorError::internal(format!("key check task failed: {}", e)))?
    }

    async fn valid_words(&self) -> Result<Vec<String>, CollaboratorError> {
        Ok(word_list().iter().map(|w| w.to_string()).collect())
    }

    async fn finish(&self) {
        if self.started.swap(false, Ordering::AcqRel) {
            info!("Key library stopped");
        } else {
            warn!("Key library finished without being started");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> TonCollaborator {
        TonCollaborator::new(KdfConfig { iterations: 256 }, None)
    }

    #[tokio::test]
    async fn test_operations_require_start() {
        let lib = fast();
        let err = lib.create_key(b"entropy".to_vec()).await.unwrap_err();
        assert_eq!(err, CollaboratorError::not_started());
        let err = lib.check_key(vec!["abandon".into(); 24]).await.unwrap_err();
        assert_eq!(err, CollaboratorError::not_started());
    }

    #[tokio::test]
    async fn test_create_then_check_round_trip() {
        let lib = fast();
        lib.start().await.unwrap();

        let key = lib.create_key(b"some keyboard mashing".to_vec()).await.unwrap();
        assert_eq!(key.words().len(), 24);

        let derived = lib.check_key(key.words().to_vec()).await.unwrap();
        assert_eq!(&derived, key.public_key());
        lib.finish().await;
    }

    #[tokio::test]
    async fn test_check_rejects_bad_phrases() {
        let lib = fast();
        lib.start().await.unwrap();

        let err = lib.check_key(vec!["abandon".into(); 12]).await.unwrap_err();
        assert!(err.is_bad_mnemonic());

        let mut words: Vec<String> = vec!["abandon".into(); 24];
        words[0] = "qwerty".into();
        let err = lib.check_key(words).await.unwrap_err();
        assert!(err.is_bad_mnemonic());
    }

    #[tokio::test]
    async fn test_empty_entropy_is_rejected() {
        let lib = fast();
        lib.start().await.unwrap();
        let err = lib.create_key(Vec::new()).await.unwrap_err();
        assert!(!err.is_bad_mnemonic());
    }

    #[tokio::test]
    async fn test_valid_words_is_full_list() {
        let words = fast().valid_words().await.unwrap();
        assert_eq!(words.len(), 2048);
        assert_eq!(words[0], "abandon");
    }

    #[tokio::test]
    async fn test_start_creates_data_dir() {
        let dir = std::env::temp_dir().join(format!("tonkeygen-start-{}", std::process::id()));
        let lib = TonCollaborator::new(KdfConfig { iterations: 256 }, Some(dir.clone()));
        lib.start().await.unwrap();
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
