// src/cli/mod.rs
use clap::Parser;
use std::path::PathBuf;

pub mod commands;
pub mod menu;
pub mod handlers;

pub use commands::{AccountCommand, CliCommand, SecretCommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File holding the hashed secret word
    #[arg(long, env = "SECRET_FILE")]
    pub secret_file: Option<PathBuf>,

    /// Command to execute; starts the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}
