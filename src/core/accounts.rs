// src/core/accounts.rs
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::secret::{SecretError, SecretStore};
use crate::core::storage::write_json_atomic;
use crate::models::AccountEntry;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Secret word does not match")]
    Locked,

    #[error("Account name cannot be empty")]
    EmptyAccount,

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Secret word error: {0}")]
    SecretError(#[from] SecretError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AccountError>;

/// Account/password pairs kept in a JSON file.
///
/// Passwords are stored as entered, not encrypted. The only way to get a
/// store is [`AccountStore::unlock`], so nothing is read or written without
/// the secret word.
#[derive(Debug)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    pub fn unlock(path: impl Into<PathBuf>, secret: &SecretStore, word: &str) -> Result<Self> {
        if !secret.verify(word)? {
            return Err(AccountError::Locked);
        }
        Ok(Self { path: path.into() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Duplicate account names are allowed; lookups return every match
    pub fn add(&self, account: &str, password: &str) -> Result<()> {
        let account = account.trim();
        if account.is_empty() {
            return Err(AccountError::EmptyAccount);
        }
        if password.is_empty() {
            return Err(AccountError::EmptyPassword);
        }

        let mut entries = self.load()?;
        entries.push(AccountEntry {
            account: account.to_string(),
            password: password.to_string(),
            created_at: Utc::now(),
        });
        write_json_atomic(&self.path, &entries)?;

        log::info!("Saved password for account '{}'", account);
        Ok(())
    }

    /// All `(account, password)` pairs whose account name matches exactly.
    pub fn find(&self, account: &str) -> Result<Vec<(String, String)>> {
        let account = account.trim();
        let found: Vec<(String, String)> = self
            .load()?
            .into_iter()
            .filter(|entry| entry.account == account)
            .map(|entry| (entry.account, entry.password))
            .collect();

        log::debug!("Lookup for '{}' matched {} entries", account, found.len());
        Ok(found)
    }

    fn load(&self) -> Result<Vec<AccountEntry>> {
        if !self.path.is_file() {
            return Ok(Vec::new());
        }
        let data = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}
