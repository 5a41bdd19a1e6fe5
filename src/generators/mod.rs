// src/generators/mod.rs
mod password;

pub use password::{
    GeneratorError, PasswordGenerator, DEFAULT_MAX_ATTEMPTS, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
    SYMBOLS,
};
