// src/generators/password.rs
use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use thiserror::Error;

use crate::models::CharClass;

/// Characters a generated password is drawn from: digits, lowercase,
/// uppercase, then ASCII punctuation. No whitespace.
pub const SYMBOLS: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// One character of each class is needed, so nothing shorter can validate.
pub const MIN_PASSWORD_LENGTH: usize = CharClass::ALL.len();

/// Longest password a generator builds unless told otherwise.
pub const MAX_PASSWORD_LENGTH: usize = 4096;

pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Password length {length} is out of range, must be between {min} and {max} characters")]
    InvalidLength { length: i64, min: usize, max: usize },

    #[error("No valid password found after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
}

/// Generates random passwords that satisfy the four-class complexity policy.
#[derive(Debug, Clone)]
pub struct PasswordGenerator {
    min_length: usize,
    max_length: usize,
    max_attempts: usize,
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator {
            min_length: MIN_PASSWORD_LENGTH,
            max_length: MAX_PASSWORD_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Builds a generator with an explicit retry bound. The minimum length
    /// can be raised but never below [`MIN_PASSWORD_LENGTH`].
    pub fn with_limits(min_length: usize, max_attempts: usize) -> Self {
        PasswordGenerator {
            min_length: min_length.max(MIN_PASSWORD_LENGTH),
            max_length: MAX_PASSWORD_LENGTH.max(min_length),
            max_attempts,
        }
    }

    /// Lowers (or raises) the longest password this generator will build.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length.max(self.min_length);
        self
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Generates a password of exactly `length` characters using the OS
    /// random source.
    pub fn generate(&self, length: usize) -> Result<String, GeneratorError> {
        self.generate_with(&mut OsRng, length)
    }

    /// Same as [`generate`](Self::generate) for lengths coming from user
    /// input, where zero and negative values must be reported rather than
    /// rejected by the type system.
    pub fn generate_signed(&self, length: i64) -> Result<String, GeneratorError> {
        match usize::try_from(length) {
            Ok(length) => self.generate(length),
            Err(_) => Err(self.invalid_length(length)),
        }
    }

    pub fn generate_with<R>(&self, rng: &mut R, length: usize) -> Result<String, GeneratorError>
    where
        R: Rng + CryptoRng + ?Sized,
    {
        if length < self.min_length || length > self.max_length {
            return Err(self.invalid_length(i64::try_from(length).unwrap_or(i64::MAX)));
        }

        let dist = Uniform::from(0..SYMBOLS.len());

        for attempt in 1..=self.max_attempts {
            let candidate: String = (0..length)
                .map(|_| SYMBOLS[dist.sample(rng)] as char)
                .collect();

            if Self::is_valid(&candidate) {
                log::debug!("Generated {}-character password after {} attempt(s)", length, attempt);
                return Ok(candidate);
            }

            log::trace!("Discarded candidate on attempt {}", attempt);
        }

        log::warn!(
            "Password generation gave up after {} attempts (length {})",
            self.max_attempts,
            length
        );
        Err(GeneratorError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }

    fn invalid_length(&self, length: i64) -> GeneratorError {
        GeneratorError::InvalidLength {
            length,
            min: self.min_length,
            max: self.max_length,
        }
    }

    /// True when the candidate has at least one digit, lowercase letter,
    /// uppercase letter and symbol, in any position.
    pub fn is_valid(candidate: &str) -> bool {
        CharClass::ALL
            .iter()
            .all(|class| candidate.chars().any(|c| class.matches(c)))
    }

    pub fn missing_classes(candidate: &str) -> Vec<CharClass> {
        CharClass::ALL
            .iter()
            .copied()
            .filter(|class| !candidate.chars().any(|c| class.matches(c)))
            .collect()
    }
}
