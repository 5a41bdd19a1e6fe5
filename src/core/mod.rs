// src/core/mod.rs
pub mod accounts;
pub mod config;
pub mod secret;
mod storage;
