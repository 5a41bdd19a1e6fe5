// src/cli/commands.rs
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate secure passwords
    Generate {
        /// Password length (defaults to DEFAULT_PASSWORD_LENGTH)
        #[arg(short, long, allow_negative_numbers = true)]
        length: Option<i64>,

        /// How many passwords to print
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },

    /// Check a password against the complexity policy
    Check {
        /// Password to check
        #[arg(required = true)]
        candidate: String,
    },

    /// Manage the secret word
    #[command(subcommand)]
    Secret(SecretCommand),

    /// Save or look up account passwords (asks for the secret word)
    #[command(subcommand)]
    Account(AccountCommand),
}

#[derive(Subcommand, Debug)]
pub enum SecretCommand {
    /// Set the secret word and its hint
    Set {
        /// Replace an existing secret word (asks for the current one)
        #[arg(long)]
        force: bool,
    },

    /// Check a secret word against the stored one
    Verify,

    /// Show the hint for the secret word
    Hint,
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Save a password for an account
    Add {
        /// Account name
        #[arg(required = true)]
        account: String,

        /// Generate the password instead of typing it
        #[arg(short, long)]
        generate: bool,

        /// Length of the generated password
        #[arg(short, long, allow_negative_numbers = true, requires = "generate")]
        length: Option<i64>,
    },

    /// Show the saved passwords for an account
    Get {
        /// Account name
        #[arg(required = true)]
        account: String,
    },
}
