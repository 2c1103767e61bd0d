use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::error::{KeygenError, KeygenResult};

static CONFIG: OnceLock<KeygenConfig> = OnceLock::new();

/// Directory name used under the platform data directory.
pub const APP_DIR_NAME: &str = "TonKeyGenerator";

/// Accepted window of keyboard entropy.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EntropyConfig {
    /// Characters required before key generation may start
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Most recent characters retained once the minimum is reached
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_min_length() -> usize {
    50
}

fn default_max_length() -> usize {
    200
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
        }
    }
}

/// Word suggestion settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DictionaryConfig {
    /// Input length before any suggestion is offered
    #[serde(default = "default_min_prefix")]
    pub min_prefix: usize,
}

fn default_min_prefix() -> usize {
    3
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            min_prefix: default_min_prefix(),
        }
    }
}

/// Wizard behaviour switches
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    /// Honour the operator phrase that skips the transcription check.
    /// Disable for release builds handed to end users.
    #[serde(default = "default_allow_bypass")]
    pub allow_bypass_phrase: bool,
}

fn default_allow_bypass() -> bool {
    true
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            allow_bypass_phrase: default_allow_bypass(),
        }
    }
}

/// Key derivation parameters of the TON mnemonic scheme
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct KdfConfig {
    /// PBKDF2 iterations for seed derivation
    #[serde(default = "default_iterations")]
    pub iterations: u32,
}

fn default_iterations() -> u32 {
    100_000
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
        }
    }
}

impl KdfConfig {
    /// Iterations of the cheap "is this a basic seed" check.
    pub fn check_iterations(&self) -> u32 {
        (self.iterations / 256).max(1)
    }
}

/// Local storage
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Overrides the platform data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the data directory (explicit setting first, then platform default).
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME)))
    }
}

/// Root application configuration
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct KeygenConfig {
    #[serde(default)]
    pub entropy: EntropyConfig,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub kdf: KdfConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl KeygenConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> KeygenResult<Self> {
        let config = Config::builder()
            // Start with default config file
            .add_source(File::with_name("config/default").required(false))
            // Override with local config if present
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (prefix: TONKEYGEN_)
            // e.g., TONKEYGEN_ENTROPY__MIN_LENGTH, TONKEYGEN_KDF__ITERATIONS
            .add_source(
                Environment::with_prefix("TONKEYGEN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Initialize the global config singleton
    pub fn init() -> KeygenResult<&'static Self> {
        let config = Self::load()?;
        Ok(CONFIG.get_or_init(|| config))
    }

    /// Reject settings the wizard cannot work with.
    pub fn validate(&self) -> KeygenResult<()> {
        if self.entropy.min_length == 0 {
            return Err(KeygenError::invalid_config("entropy.min_length must be positive"));
        }
        if self.entropy.max_length < self.entropy.min_length {
            return Err(KeygenError::invalid_config(format!(
                "entropy.max_length ({}) is below entropy.min_length ({})",
                self.entropy.max_length, self.entropy.min_length
            )));
        }
        if self.kdf.iterations == 0 {
            return Err(KeygenError::invalid_config("kdf.iterations must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KeygenConfig::default();
        assert_eq!(config.entropy.min_length, 50);
        assert_eq!(config.entropy.max_length, 200);
        assert_eq!(config.dictionary.min_prefix, 3);
        assert!(config.wizard.allow_bypass_phrase);
        assert_eq!(config.kdf.iterations, 100_000);
        assert_eq!(config.kdf.check_iterations(), 390);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_source_deserializes_to_defaults() {
        let config: KeygenConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config, KeygenConfig::default());
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let mut config = KeygenConfig::default();
        config.entropy.min_length = 300;
        assert!(matches!(config.validate(), Err(KeygenError::InvalidConfig(_))));

        config.entropy.min_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_check_iterations_never_zero() {
        let kdf = KdfConfig { iterations: 100 };
        assert_eq!(kdf.check_iterations(), 1);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let storage = StorageConfig {
            data_dir: Some(PathBuf::from("/tmp/keygen-test")),
        };
        assert_eq!(storage.resolve_data_dir(), Some(PathBuf::from("/tmp/keygen-test")));
    }
}
