// src/core/secret.rs
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::storage::write_json_atomic;
use crate::crypto::{self, KdfParams};
use crate::models::SecretWordRecord;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("No secret word has been set")]
    NotSet,

    #[error("A secret word is already set")]
    AlreadySet,

    #[error("Secret word does not match")]
    WrongSecret,

    #[error("Secret word cannot be empty")]
    EmptySecret,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Crypto error: {0}")]
    CryptoError(#[from] crate::crypto::CryptoError),
}

pub type Result<T> = std::result::Result<T, SecretError>;

/// File-backed store for the single secret word that gates the keeper.
///
/// Only an argon2id hash of the word is written; the hint is stored as
/// entered so it can be shown before unlocking.
pub struct SecretStore {
    path: PathBuf,
    kdf: KdfParams,
}

impl SecretStore {
    pub fn new(path: impl Into<PathBuf>, kdf: KdfParams) -> Self {
        Self { path: path.into(), kdf }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Stores the first secret word and hint. Fails if one is already set;
    /// use [`replace`](Self::replace) to change it.
    pub fn set(&self, word: &str, hint: &str) -> Result<()> {
        if self.exists() {
            return Err(SecretError::AlreadySet);
        }
        self.write_record(word, hint)
    }

    /// Replaces the secret word, but only for someone who knows the current one.
    pub fn replace(&self, current: &str, word: &str, hint: &str) -> Result<()> {
        if !self.verify(current)? {
            return Err(SecretError::WrongSecret);
        }
        self.write_record(word, hint)
    }

    fn write_record(&self, word: &str, hint: &str) -> Result<()> {
        if word.is_empty() {
            return Err(SecretError::EmptySecret);
        }

        let record = SecretWordRecord {
            hash: crypto::hash_secret(word, &self.kdf)?,
            hint: hint.to_string(),
            created_at: Utc::now(),
        };
        write_json_atomic(&self.path, &record)?;

        log::info!("Secret word stored at {}", self.path.display());
        Ok(())
    }

    pub fn verify(&self, word: &str) -> Result<bool> {
        let record = self.load()?;
        let matches = crypto::verify_secret(word, &record.hash)?;

        if !matches {
            log::warn!("Secret word verification failed");
        }
        Ok(matches)
    }

    pub fn hint(&self) -> Result<String> {
        Ok(self.load()?.hint)
    }

    fn load(&self) -> Result<SecretWordRecord> {
        if !self.exists() {
            return Err(SecretError::NotSet);
        }
        let data = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SecretStore {
        let kdf = KdfParams { memory_cost: 1024, time_cost: 1, parallelism: 1 };
        SecretStore::new(dir.path().join("nested").join("secret.json"), kdf)
    }

    #[test]
    fn test_set_and_verify() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(!store.exists());
        store.set("pineapple", "a spiky fruit").unwrap();
        assert!(store.exists());

        assert!(store.verify("pineapple").unwrap());
        assert!(!store.verify("Pineapple").unwrap());
        assert_eq!(store.hint().unwrap(), "a spiky fruit");
    }

    #[test]
    fn test_word_is_not_stored_in_clear() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("pineapple", "fruit").unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(!raw.contains("pineapple"));
        assert!(raw.contains("$argon2id$"));
    }

    #[test]
    fn test_missing_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(matches!(store.verify("x"), Err(SecretError::NotSet)));
        assert!(matches!(store.hint(), Err(SecretError::NotSet)));
    }

    #[test]
    fn test_set_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("first", "one").unwrap();

        assert!(matches!(store.set("second", "two"), Err(SecretError::AlreadySet)));
        assert!(store.verify("first").unwrap());
        assert_eq!(store.hint().unwrap(), "one");
    }

    #[test]
    fn test_replace_needs_current_word() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("owner-word", "mine").unwrap();
        let before = fs::read(store.path()).unwrap();

        assert!(matches!(
            store.replace("guess", "intruder", "theirs"),
            Err(SecretError::WrongSecret)
        ));
        assert_eq!(fs::read(store.path()).unwrap(), before);
        assert!(store.verify("owner-word").unwrap());
        assert!(!store.verify("intruder").unwrap());

        store.replace("owner-word", "new-word", "fresh").unwrap();
        assert!(store.verify("new-word").unwrap());
        assert!(!store.verify("owner-word").unwrap());
        assert_eq!(store.hint().unwrap(), "fresh");
    }

    #[test]
    fn test_replace_without_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(matches!(store.replace("a", "b", "c"), Err(SecretError::NotSet)));
        assert!(!store.exists());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(matches!(store.set("", "hint"), Err(SecretError::EmptySecret)));
        assert!(!store.exists());
    }

    #[test]
    fn test_corrupt_record_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), b"{not json").unwrap();

        assert!(matches!(store.hint(), Err(SecretError::JsonError(_))));
    }
}
