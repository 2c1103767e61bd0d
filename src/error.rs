use thiserror::Error;

/// Detail markers the wallet library puts in errors caused by a bad phrase.
pub const BAD_MNEMONIC_MARKERS: [&str; 2] = ["INVALID_MNEMONIC", "NEED_MNEMONIC_PASSWORD"];

/// Application-wide error types
#[derive(Error, Debug)]
pub enum KeygenError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("Key library error: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Expected {expected} words, got {actual}")]
    WordCount { expected: usize, actual: usize },

    #[error("No key has been created yet")]
    NoKey,

    #[error("Data directory is not available")]
    NoDataDir,
}

impl KeygenError {
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type alias using KeygenError
pub type KeygenResult<T> = Result<T, KeygenError>;

/// Error reported by the key library: a numeric code plus detail text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{code}] {message}")]
pub struct CollaboratorError {
    pub code: i32,
    pub message: String,
}

/// How a wizard should present a collaborator failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The words do not form a usable phrase; the user can fix them.
    BadMnemonic,
    /// Anything else; shown with the raw detail text.
    Generic,
}

impl CollaboratorError {
    pub fn new<S: Into<String>>(code: i32, message: S) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_mnemonic<S: AsRef<str>>(detail: S) -> Self {
        Self::new(400, format!("INVALID_MNEMONIC: {}", detail.as_ref()))
    }

    pub fn need_mnemonic_password() -> Self {
        Self::new(400, "NEED_MNEMONIC_PASSWORD")
    }

    pub fn not_started() -> Self {
        Self::new(500, "LIBRARY_NOT_STARTED")
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::new(500, message)
    }

    /// Classify by substring match on the detail text. The markers are the
    /// contract with the wallet library, so they must match it exactly.
    pub fn class(&self) -> ErrorClass {
        if BAD_MNEMONIC_MARKERS
            .iter()
            .any(|marker| self.message.contains(marker))
        {
            ErrorClass::BadMnemonic
        } else {
            ErrorClass::Generic
        }
    }

    pub fn is_bad_mnemonic(&self) -> bool {
        self.class() == ErrorClass::BadMnemonic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_mnemonic_markers() {
        assert!(CollaboratorError::invalid_mnemonic("word 3").is_bad_mnemonic());
        assert!(CollaboratorError::need_mnemonic_password().is_bad_mnemonic());
        assert!(CollaboratorError::new(400, "tonlib: INVALID_MNEMONIC (checksum)").is_bad_mnemonic());
    }

    #[test]
    fn test_generic_errors() {
        assert_eq!(CollaboratorError::not_started().class(), ErrorClass::Generic);
        assert_eq!(
            CollaboratorError::new(500, "invalid mnemonic").class(),
            ErrorClass::Generic
        );
    }

    #[test]
    fn test_display_keeps_detail() {
        let err = CollaboratorError::new(500, "KEYSTORE_FAILED");
        assert_eq!(err.to_string(), "[500] KEYSTORE_FAILED");
        let wrapped = KeygenError::from(err);
        assert_eq!(wrapped.to_string(), "Key library error: [500] KEYSTORE_FAILED");
    }
}
