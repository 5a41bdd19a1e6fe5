// src/cli/handlers.rs
use anyhow::{bail, Context};
use inquire::{Password, Text};
use std::process::ExitCode;

use crate::cli::{AccountCommand, CliCommand, SecretCommand};
use crate::core::accounts::AccountStore;
use crate::core::config::Config;
use crate::core::secret::SecretStore;
use crate::generators::{GeneratorError, PasswordGenerator, MIN_PASSWORD_LENGTH};
use crate::models::CharClass;

pub fn generator_from(config: &Config) -> PasswordGenerator {
    PasswordGenerator::with_limits(MIN_PASSWORD_LENGTH, config.max_generation_attempts)
}

pub fn secret_store_from(config: &Config) -> SecretStore {
    SecretStore::new(config.secret_file.clone(), config.kdf_params())
}

// The account file only opens for the right secret word
pub fn open_accounts(config: &Config, word: &str) -> anyhow::Result<AccountStore> {
    let secret = secret_store_from(config);
    AccountStore::unlock(config.accounts_file.clone(), &secret, word)
        .context("Could not open saved accounts")
}

// Dispatch a one-shot command
pub fn run_command(command: CliCommand, config: &Config) -> anyhow::Result<ExitCode> {
    match command {
        CliCommand::Generate { length, count } => {
            let generator = generator_from(config);
            let length = length.unwrap_or(config.default_password_length as i64);

            for password in handle_generate(&generator, length, count)? {
                println!("{}", password);
            }
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Check { candidate } => {
            let missing = handle_check(&candidate);
            println!("{}", describe_check(&missing));

            if missing.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        CliCommand::Secret(secret) => {
            let store = secret_store_from(config);
            run_secret_command(secret, &store)
        }
        CliCommand::Account(account) => run_account_command(account, config),
    }
}

pub fn handle_generate(
    generator: &PasswordGenerator,
    length: i64,
    count: usize,
) -> Result<Vec<String>, GeneratorError> {
    (0..count).map(|_| generator.generate_signed(length)).collect()
}

pub fn handle_check(candidate: &str) -> Vec<CharClass> {
    PasswordGenerator::missing_classes(candidate)
}

pub fn describe_check(missing: &[CharClass]) -> String {
    if missing.is_empty() {
        return "✅ Password meets the complexity policy".to_string();
    }

    let names: Vec<String> = missing.iter().map(|class| class.to_string()).collect();
    format!("❌ Password is missing: {}", names.join(", "))
}

fn run_secret_command(command: SecretCommand, store: &SecretStore) -> anyhow::Result<ExitCode> {
    match command {
        SecretCommand::Set { force } => {
            let current = if store.exists() {
                if !force {
                    bail!(
                        "A secret word is already stored at {}. Use --force to replace it.",
                        store.path().display()
                    );
                }
                Some(prompt_secret_word("Current secret word:")?)
            } else {
                None
            };

            let word = prompt_new_secret()?;
            let hint = Text::new("Hint for the secret word:").prompt()?;

            handle_set_secret(store, current.as_deref(), &word, &hint)?;
            println!("✅ Secret word saved");
            Ok(ExitCode::SUCCESS)
        }
        SecretCommand::Verify => {
            let word = prompt_secret_word("Secret word:")?;

            if store.verify(&word)? {
                println!("✅ Secret word is correct");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("❌ Secret word does not match");
                Ok(ExitCode::FAILURE)
            }
        }
        SecretCommand::Hint => {
            println!("💡 Hint: {}", store.hint()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_account_command(command: AccountCommand, config: &Config) -> anyhow::Result<ExitCode> {
    let word = prompt_secret_word("Secret word:")?;
    let accounts = open_accounts(config, &word)?;

    match command {
        AccountCommand::Add { account, generate, length } => {
            let password = if generate {
                let length = length.unwrap_or(config.default_password_length as i64);
                generator_from(config).generate_signed(length)?
            } else {
                Password::new("Password:")
                    .with_display_mode(inquire::PasswordDisplayMode::Masked)
                    .prompt()?
            };

            handle_add_account(&accounts, &account, &password)?;
            if generate {
                println!("🔑 {}", password);
            }
            println!("✅ Saved password for {}", account.trim());
            Ok(ExitCode::SUCCESS)
        }
        AccountCommand::Get { account } => {
            let found = handle_find_account(&accounts, &account)?;
            println!("{}", describe_accounts(&account, &found));

            if found.is_empty() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// Without `current` this is first-time setup; with it, a replacement that
// must know the existing word
pub fn handle_set_secret(
    store: &SecretStore,
    current: Option<&str>,
    word: &str,
    hint: &str,
) -> anyhow::Result<()> {
    let result = match current {
        Some(current) => store.replace(current, word, hint),
        None => store.set(word, hint),
    };
    result.with_context(|| format!("Failed to store secret word at {}", store.path().display()))
}

pub fn handle_add_account(accounts: &AccountStore, account: &str, password: &str) -> anyhow::Result<()> {
    accounts
        .add(account, password)
        .with_context(|| format!("Failed to save password for {}", account.trim()))
}

pub fn handle_find_account(accounts: &AccountStore, account: &str) -> anyhow::Result<Vec<(String, String)>> {
    Ok(accounts.find(account)?)
}

pub fn describe_accounts(account: &str, found: &[(String, String)]) -> String {
    if found.is_empty() {
        return format!("❌ No saved password for {}", account.trim());
    }

    found
        .iter()
        .map(|(account, password)| format!("🔑 {}: {}", account, password))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn prompt_secret_word(message: &str) -> anyhow::Result<String> {
    Ok(Password::new(message)
        .with_display_mode(inquire::PasswordDisplayMode::Hidden)
        .without_confirmation()
        .prompt()?)
}

// Ask for a new secret word twice; inquire does the confirmation
pub fn prompt_new_secret() -> anyhow::Result<String> {
    let word = Password::new("🔐 Create your secret word:")
        .with_display_mode(inquire::PasswordDisplayMode::Hidden)
        .with_custom_confirmation_message("🔁 Confirm your secret word:")
        .with_custom_confirmation_error_message("The secret words don't match.")
        .prompt()?;

    if word.is_empty() {
        bail!("Secret word cannot be empty");
    }
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KdfParams;
    use tempfile::TempDir;

    #[test]
    fn test_handle_generate_count_and_length() {
        let generator = PasswordGenerator::new();
        let passwords = handle_generate(&generator, 12, 5).unwrap();

        assert_eq!(passwords.len(), 5);
        assert!(passwords.iter().all(|p| p.len() == 12));
        assert!(passwords.iter().all(|p| PasswordGenerator::is_valid(p)));
    }

    #[test]
    fn test_handle_generate_rejects_bad_lengths() {
        let generator = PasswordGenerator::new();

        for length in [-1, 0, 1, 3] {
            assert!(matches!(
                handle_generate(&generator, length, 1),
                Err(GeneratorError::InvalidLength { .. })
            ));
        }
    }

    #[test]
    fn test_zero_count_generates_nothing() {
        let generator = PasswordGenerator::new();
        assert!(handle_generate(&generator, 8, 0).unwrap().is_empty());
    }

    #[test]
    fn test_describe_check() {
        assert!(describe_check(&handle_check("Ab3$efgh")).starts_with("✅"));
        assert_eq!(
            describe_check(&handle_check("Abcdef123")),
            "❌ Password is missing: symbol"
        );
        assert_eq!(
            describe_check(&handle_check("abc")),
            "❌ Password is missing: digit, uppercase letter, symbol"
        );
    }

    #[test]
    fn test_generator_follows_config() {
        let config = Config { max_generation_attempts: 42, ..Config::default() };
        let generator = generator_from(&config);

        assert_eq!(generator.max_attempts(), 42);
        assert_eq!(generator.min_length(), 4);
    }

    fn test_config(dir: &TempDir) -> Config {
        let kdf = KdfParams { memory_cost: 1024, time_cost: 1, parallelism: 1 };
        Config {
            secret_file: dir.path().join("secret.json"),
            accounts_file: dir.path().join("accounts.json"),
            kdf_memory_cost: kdf.memory_cost,
            kdf_time_cost: kdf.time_cost,
            kdf_parallelism: kdf.parallelism,
            ..Config::default()
        }
    }

    #[test]
    fn test_handle_set_secret() {
        let dir = TempDir::new().unwrap();
        let store = secret_store_from(&test_config(&dir));

        handle_set_secret(&store, None, "walrus", "tusks").unwrap();
        assert!(store.verify("walrus").unwrap());

        let err = handle_set_secret(&store, None, "seal", "flippers").unwrap_err();
        assert!(err.to_string().contains("Failed to store secret word"));
    }

    #[test]
    fn test_replacing_secret_needs_current_word() {
        let dir = TempDir::new().unwrap();
        let store = secret_store_from(&test_config(&dir));
        handle_set_secret(&store, None, "owner-word", "h").unwrap();

        assert!(handle_set_secret(&store, Some("not-it"), "attacker", "mine").is_err());
        assert!(!store.verify("attacker").unwrap());
        assert!(store.verify("owner-word").unwrap());
        assert_eq!(store.hint().unwrap(), "h");

        handle_set_secret(&store, Some("owner-word"), "renewed", "new hint").unwrap();
        assert!(store.verify("renewed").unwrap());
    }

    #[test]
    fn test_accounts_need_secret_word() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        handle_set_secret(&secret_store_from(&config), None, "gatekeeper", "g").unwrap();

        assert!(open_accounts(&config, "wrong").is_err());

        let accounts = open_accounts(&config, "gatekeeper").unwrap();
        handle_add_account(&accounts, "mail", "M4il!box").unwrap();

        let found = handle_find_account(&accounts, "mail").unwrap();
        assert_eq!(describe_accounts("mail", &found), "🔑 mail: M4il!box");
        assert_eq!(
            describe_accounts("shop", &handle_find_account(&accounts, "shop").unwrap()),
            "❌ No saved password for shop"
        );
    }
}
