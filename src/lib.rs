//! Secure password generation behind a secret-word gate.
//!
//! The heart of the crate is [`generators::PasswordGenerator`], which draws
//! passwords from the OS random source and only hands back ones that contain
//! a digit, a lowercase letter, an uppercase letter and a symbol.

pub mod cli;
pub mod core;
pub mod crypto;
pub mod generators;
pub mod models;

pub use crate::generators::{GeneratorError, PasswordGenerator};
