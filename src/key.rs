//! Key record: public key text plus the 24-word phrase it was derived from.

use base64::{engine::general_purpose::URL_SAFE as BASE64_URL, Engine};
use crc::{Crc, CRC_16_XMODEM};
use serde::Serialize;
use std::fmt;
use zeroize::Zeroize;

use crate::error::{KeygenError, KeygenResult};

/// Words in a mnemonic phrase.
pub const WORD_COUNT: usize = 24;

/// Length of the text form of an Ed25519 public key.
pub const PUBLIC_KEY_TEXT_LEN: usize = 48;

/// Tag bytes preceding an Ed25519 public key in its text form.
const PUBLIC_KEY_TAG: [u8; 2] = [0x3E, 0xE6];

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Public key as shown to the user. Opaque text: the wizard only ever
/// displays, copies, saves and compares it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PublicKey(String);

impl PublicKey {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self(text.into())
    }

    /// Text form of a raw Ed25519 key: URL-safe base64 of
    /// `tag(2) || key(32) || crc16-xmodem(2, big-endian)`.
    pub fn from_ed25519(key: &[u8; 32]) -> Self {
        let mut raw = Vec::with_capacity(36);
        raw.extend_from_slice(&PUBLIC_KEY_TAG);
        raw.extend_from_slice(key);
        let crc = CRC16.checksum(&raw);
        raw.extend_from_slice(&crc.to_be_bytes());
        Self(BASE64_URL.encode(&raw))
    }

    /// Recover the raw Ed25519 key, validating tag, length and checksum.
    pub fn to_ed25519(&self) -> KeygenResult<[u8; 32]> {
        if self.0.len() != PUBLIC_KEY_TEXT_LEN {
            return Err(KeygenError::InvalidPublicKey(format!(
                "expected {} characters, got {}",
                PUBLIC_KEY_TEXT_LEN,
                self.0.len()
            )));
        }
        let raw = BASE64_URL
            .decode(&self.0)
            .map_err(|e| KeygenError::InvalidPublicKey(e.to_string()))?;
        if raw.len() != 36 || raw[..2] != PUBLIC_KEY_TAG {
            return Err(KeygenError::InvalidPublicKey("unknown key tag".to_string()));
        }
        let expected = u16::from_be_bytes([raw[34], raw[35]]);
        if CRC16.checksum(&raw[..34]) != expected {
            return Err(KeygenError::InvalidPublicKey("checksum mismatch".to_string()));
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(&raw[2..34]);
        Ok(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A derived key. `words` always holds exactly [`WORD_COUNT`] entries and
/// `public_key` is a pure function of them.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Key {
    public_key: PublicKey,
    words: Vec<String>,
}

impl Key {
    pub fn new(public_key: PublicKey, words: Vec<String>) -> KeygenResult<Self> {
        if words.len() != WORD_COUNT {
            return Err(KeygenError::WordCount {
                expected: WORD_COUNT,
                actual: words.len(),
            });
        }
        Ok(Self { public_key, words })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("public_key", &self.public_key)
            .field("words", &"[REDACTED]")
            .finish()
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        for word in &mut self.words {
            word.zeroize();
        }
    }
}
