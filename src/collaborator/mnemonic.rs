//! TON mnemonic scheme.
//!
//! Unlike BIP-39 there is no checksum word. A phrase is valid when
//! PBKDF2-HMAC-SHA512 over its HMAC entropy yields a leading zero byte, and
//! new phrases are drawn at random until one passes.

use bip39::Language;
use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use pbkdf2::pbkdf2_hmac;
use rand::Rng;
use sha2::Sha512;
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

use crate::config::KdfConfig;
use crate::dictionary::normalize;
use crate::error::CollaboratorError;
use crate::key::{PublicKey, WORD_COUNT};

/// Salt for seed derivation
const SEED_SALT: &[u8] = b"TON default seed";

/// Salt for the basic seed check
const BASIC_SEED_SALT: &[u8] = b"TON seed version";

/// Salt for the password-protected seed check
const PASSWORD_SEED_SALT: &[u8] = b"TON fast seed version";

/// Random phrases tried before giving up (a phrase passes with p = 1/256).
const MAX_GENERATION_ATTEMPTS: usize = 256 * 64;

/// The 2048-word vocabulary.
pub fn word_list() -> &'static [&'static str; 2048] {
    Language::English.word_list()
}

/// Phrase of [`WORD_COUNT`] words from [`word_list`].
pub struct Mnemonic {
    words: Vec<String>,
}

impl Mnemonic {
    /// Parse user-supplied words. Wrong count or unknown words are
    /// reported as `INVALID_MNEMONIC`.
    pub fn from_words(words: Vec<String>) -> Result<Self, CollaboratorError> {
        let words: Vec<String> = words.iter().map(|w| normalize(w)).collect();
        if words.len() != WORD_COUNT {
            return Err(CollaboratorError::invalid_mnemonic(format!(
                "expected {} words, got {}",
                WORD_COUNT,
                words.len()
            )));
        }
        if let Some(position) = words
            .iter()
            .position(|w| Language::English.find_word(w).is_none())
        {
            return Err(CollaboratorError::invalid_mnemonic(format!(
                "unknown word at position {}",
                position + 1
            )));
        }
        Ok(Self { words })
    }

    /// Draw random phrases until one is a basic seed.
    pub fn generate<R: Rng>(rng: &mut R, kdf: &KdfConfig) -> Result<Self, CollaboratorError> {
        let list = word_list();
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let words = (0..WORD_COUNT)
                .map(|_| list[rng.gen_range(0..list.len())].to_string())
                .collect();
            let candidate = Self { words };
            if candidate.is_basic_seed(kdf) {
                return Ok(candidate);
            }
        }
        Err(CollaboratorError::internal("MNEMONIC_GENERATION_FAILED"))
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// HMAC-SHA512 keyed by the space-joined phrase over an empty password.
    pub fn entropy(&self) -> Zeroizing<[u8; 64]> {
        let phrase = Zeroizing::new(self.words.join(" "));
        let mut mac = Hmac::<Sha512>::new_from_slice(phrase.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(b"");
        let mut entropy = Zeroizing::new([0u8; 64]);
        entropy.copy_from_slice(&mac.finalize().into_bytes());
        entropy
    }

    /// Whether the phrase can be used without a password.
    pub fn is_basic_seed(&self, kdf: &KdfConfig) -> bool {
        let entropy = self.entropy();
        let mut out = [0u8; 64];
        pbkdf2_hmac::<Sha512>(
            &entropy[..],
            BASIC_SEED_SALT,
            kdf.check_iterations(),
            &mut out,
        );
        out[0] == 0
    }

    /// Whether the phrase was generated with a password.
    pub fn is_password_seed(&self) -> bool {
        let entropy = self.entropy();
        let mut out = [0u8; 64];
        pbkdf2_hmac::<Sha512>(&entropy[..], PASSWORD_SEED_SALT, 1, &mut out);
        out[0] == 1
    }

    /// Ed25519 signing key from the first half of the derived seed.
    pub fn signing_key(&self, kdf: &KdfConfig) -> SigningKey {
        let entropy = self.entropy();
        let mut seed = Zeroizing::new([0u8; 64]);
        pbkdf2_hmac::<Sha512>(&entropy[..], SEED_SALT, kdf.iterations, &mut seed[..]);
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&seed[..32]);
        let key = SigningKey::from_bytes(&secret);
        secret.zeroize();
        key
    }

    pub fn public_key(&self, kdf: &KdfConfig) -> PublicKey {
        PublicKey::from_ed25519(&self.signing_key(kdf).verifying_key().to_bytes())
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("words", &"[REDACTED]")
            .finish()
    }
}

impl Drop for Mnemonic {
    fn drop(&mut self) {
        for word in &mut self.words {
            word.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Cheap parameters so tests do not spend seconds in PBKDF2.
    const FAST: KdfConfig = KdfConfig { iterations: 256 };

    fn abandon_art() -> Vec<String> {
        let mut words = vec!["abandon".to_string(); 23];
        words.push("art".to_string());
        words
    }

    #[test]
    fn test_word_list_is_sorted() {
        let list = word_list();
        assert_eq!(list.len(), 2048);
        assert!(list.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_from_words_normalizes() {
        let mut words = abandon_art();
        words[0] = "  ABANDON ".to_string();
        let mnemonic = Mnemonic::from_words(words).unwrap();
        assert_eq!(mnemonic.words()[0], "abandon");
    }

    #[test]
    fn test_from_words_rejects_count_and_unknown_words() {
        let err = Mnemonic::from_words(vec!["abandon".to_string(); 12]).unwrap_err();
        assert!(err.is_bad_mnemonic());

        let mut words = abandon_art();
        words[5] = "notaword".to_string();
        let err = Mnemonic::from_words(words).unwrap_err();
        assert!(err.is_bad_mnemonic());
        assert!(err.message.contains("position 6"));
    }

    #[test]
    fn test_generate_produces_basic_seed() {
        let mut rng = StdRng::seed_from_u64(7);
        let mnemonic = Mnemonic::generate(&mut rng, &FAST).unwrap();
        assert_eq!(mnemonic.words().len(), WORD_COUNT);
        assert!(mnemonic.is_basic_seed(&FAST));
        assert!(mnemonic
            .words()
            .iter()
            .all(|w| Language::English.find_word(w).is_some()));
    }

    #[test]
    fn test_generation_is_deterministic_for_a_given_rng() {
        let a = Mnemonic::generate(&mut StdRng::seed_from_u64(42), &FAST).unwrap();
        let b = Mnemonic::generate(&mut StdRng::seed_from_u64(42), &FAST).unwrap();
        assert_eq!(a.words(), b.words());
        assert_eq!(a.public_key(&FAST), b.public_key(&FAST));
    }

    #[test]
    fn test_public_key_depends_only_on_words() {
        let mnemonic = Mnemonic::generate(&mut StdRng::seed_from_u64(3), &FAST).unwrap();
        let reparsed = Mnemonic::from_words(mnemonic.words().to_vec()).unwrap();
        assert_eq!(mnemonic.public_key(&FAST), reparsed.public_key(&FAST));
        assert!(mnemonic.public_key(&FAST).to_ed25519().is_ok());
    }

    #[test]
    fn test_debug_hides_words() {
        let mnemonic = Mnemonic::from_words(abandon_art()).unwrap();
        let printed = format!("{:?}", mnemonic);
        assert!(printed.contains("REDACTED"));
        assert!(!printed.contains("abandon"));
    }

    #[test]
    fn test_entropy_changes_with_words() {
        let a = Mnemonic::from_words(abandon_art()).unwrap();
        let mut words = abandon_art();
        words[0] = "ability".to_string();
        let b = Mnemonic::from_words(words).unwrap();
        assert_ne!(*a.entropy(), *b.entropy());
    }
}
