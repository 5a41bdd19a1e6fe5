// src/core/config.rs
use std::env;
use std::path::PathBuf;
use log::LevelFilter;

use crate::crypto::KdfParams;
use crate::generators::{DEFAULT_MAX_ATTEMPTS, MIN_PASSWORD_LENGTH};

/// Upper bound offered by the interactive length picker.
pub const MAX_MENU_PASSWORD_LENGTH: usize = 30;

// Configuration for the password keeper
#[derive(Debug, Clone)]
pub struct Config {
    // Password Generation
    pub default_password_length: usize,
    pub max_generation_attempts: usize,

    // Secret word and accounts
    pub secret_file: PathBuf,
    pub accounts_file: PathBuf,
    pub kdf_memory_cost: u32,
    pub kdf_time_cost: u32,
    pub kdf_parallelism: u32,
    pub max_unlock_attempts: usize,

    // Logging
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        let kdf = KdfParams::default();

        Self {
            // Password Generation
            default_password_length: 16,
            max_generation_attempts: DEFAULT_MAX_ATTEMPTS,

            // Secret word and accounts
            secret_file: PathBuf::from("./secret.json"),
            accounts_file: PathBuf::from("./accounts.json"),
            kdf_memory_cost: kdf.memory_cost,
            kdf_time_cost: kdf.time_cost,
            kdf_parallelism: kdf.parallelism,
            max_unlock_attempts: 3,

            // Logging
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(dir) = default_data_dir() {
            config.secret_file = dir.join("secret.json");
            config.accounts_file = dir.join("accounts.json");
        }

        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    // Apply overrides from any key/value source; `load` feeds it the process environment
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Password Generation
        if let Some(val) = lookup("DEFAULT_PASSWORD_LENGTH") {
            match val.parse::<usize>() {
                Ok(length) if length >= MIN_PASSWORD_LENGTH => self.default_password_length = length,
                _ => log::warn!("Ignoring DEFAULT_PASSWORD_LENGTH={}, must be at least {}", val, MIN_PASSWORD_LENGTH),
            }
        }

        if let Some(val) = lookup("MAX_GENERATION_ATTEMPTS") {
            match val.parse::<usize>() {
                Ok(attempts) if attempts > 0 => self.max_generation_attempts = attempts,
                _ => log::warn!("Ignoring MAX_GENERATION_ATTEMPTS={}", val),
            }
        }

        // Secret word
        if let Some(path) = lookup("SECRET_FILE") {
            self.secret_file = PathBuf::from(path);
        }

        if let Some(path) = lookup("ACCOUNTS_FILE") {
            self.accounts_file = PathBuf::from(path);
        }

        if let Some(val) = lookup("KDF_MEMORY_COST") {
            if let Ok(memory_cost) = val.parse() {
                self.kdf_memory_cost = memory_cost;
            }
        }

        if let Some(val) = lookup("KDF_TIME_COST") {
            if let Ok(time_cost) = val.parse() {
                self.kdf_time_cost = time_cost;
            }
        }

        if let Some(val) = lookup("KDF_PARALLELISM") {
            if let Ok(parallelism) = val.parse() {
                self.kdf_parallelism = parallelism;
            }
        }

        if let Some(val) = lookup("MAX_UNLOCK_ATTEMPTS") {
            match val.parse::<usize>() {
                Ok(attempts) if attempts > 0 => self.max_unlock_attempts = attempts,
                _ => log::warn!("Ignoring MAX_UNLOCK_ATTEMPTS={}, must be at least 1", val),
            }
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => self.log_level = LevelFilter::Off,
                "error" => self.log_level = LevelFilter::Error,
                "warn" => self.log_level = LevelFilter::Warn,
                "info" => self.log_level = LevelFilter::Info,
                "debug" => self.log_level = LevelFilter::Debug,
                "trace" => self.log_level = LevelFilter::Trace,
                _ => {}
            }
        }
    }

    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            memory_cost: self.kdf_memory_cost,
            time_cost: self.kdf_time_cost,
            parallelism: self.kdf_parallelism,
        }
    }
}

// Per-user location, e.g. ~/.config/passkeeper on Linux
fn default_data_dir() -> Option<PathBuf> {
    match directories::ProjectDirs::from("com", "passkeeper", "passkeeper") {
        Some(dirs) => Some(dirs.config_dir().to_path_buf()),
        None => {
            log::warn!("Could not determine config directory, using working directory");
            None
        }
    }
}
