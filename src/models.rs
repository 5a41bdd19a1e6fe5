// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use std::fmt;

/// The character classes a password must contain at least once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    Lowercase,
    Uppercase,
    Symbol,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Digit,
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Symbol,
    ];

    pub fn matches(self, c: char) -> bool {
        match self {
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Lowercase => c.is_ascii_lowercase(),
            CharClass::Uppercase => c.is_ascii_uppercase(),
            // anything that is not a letter, a digit or whitespace
            CharClass::Symbol => !c.is_ascii_alphanumeric() && !c.is_whitespace(),
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Digit => write!(f, "digit"),
            CharClass::Lowercase => write!(f, "lowercase letter"),
            CharClass::Uppercase => write!(f, "uppercase letter"),
            CharClass::Symbol => write!(f, "symbol"),
        }
    }
}

// Persisted secret word: argon2 PHC hash plus the user's hint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretWordRecord {
    pub hash: String,
    pub hint: String,
    pub created_at: DateTime<Utc>,
}

// One saved account/password pair; the password is kept as entered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountEntry {
    pub account: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}
