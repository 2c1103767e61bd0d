//! Handing the public key to the outside world: clipboard and file.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::KeygenResult;
use crate::key::PublicKey;

/// File name used when saving without an explicit path.
pub const PUBLIC_KEY_FILE_NAME: &str = "public_key.txt";

pub fn copy_to_clipboard(key: &PublicKey) -> KeygenResult<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(key.as_str().to_string())?;
    info!(public_key = %key, "Public key copied to clipboard");
    Ok(())
}

/// Write the key text followed by a newline, creating parent directories.
pub fn save_to_file(key: &PublicKey, path: &Path) -> KeygenResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, format!("{}\n", key))?;
    info!(path = %path.display(), "Public key saved");
    Ok(())
}

pub fn default_path(data_dir: &Path) -> PathBuf {
    data_dir.join(PUBLIC_KEY_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_writes_key_line() {
        let dir = std::env::temp_dir().join(format!("tonkeygen-export-{}", std::process::id()));
        let path = default_path(&dir.join("nested"));
        let key = PublicKey::from_ed25519(&[9u8; 32]);

        save_to_file(&key, &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written.trim_end(), key.as_str());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_into_missing_file_parent_fails() {
        let dir = std::env::temp_dir().join(format!("tonkeygen-export-file-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("blocker");
        fs::write(&blocker, "x").unwrap();

        let key = PublicKey::new("PK1");
        assert!(save_to_file(&key, &blocker.join("public_key.txt")).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
