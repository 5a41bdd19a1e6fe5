// src/cli/menu.rs
use inquire::error::InquireError;
use inquire::{Confirm, Password, Select, Text};

use crate::cli::handlers::{
    describe_accounts, describe_check, generator_from, handle_add_account, handle_check,
    handle_find_account, handle_set_secret, open_accounts, prompt_new_secret, secret_store_from,
};
use crate::core::accounts::AccountStore;
use crate::core::config::{Config, MAX_MENU_PASSWORD_LENGTH};
use crate::core::secret::SecretStore;
use crate::generators::MIN_PASSWORD_LENGTH;

const GENERATE: &str = "🔐  Generate secure password";
const SAVE: &str = "💾  Save account and password";
const SEARCH: &str = "🔍  Search account";
const CHECK: &str = "🔎  Check a password";
const EXIT: &str = "❌  Exit";

pub fn run_cli_menu(config: &Config) -> anyhow::Result<()> {
    println!("🔐 Welcome to");
    println!("╔══════════════════════════════════════╗");
    println!("║          PASSKEEPER GENERATOR        ║");
    println!("╚══════════════════════════════════════╝");

    match run_session(config) {
        Err(e) if is_interrupted(&e) => {
            println!("\n👋 Goodbye!");
            Ok(())
        }
        other => other,
    }
}

fn run_session(config: &Config) -> anyhow::Result<()> {
    let store = secret_store_from(config);

    let word = if store.exists() {
        match unlock(&store, config.max_unlock_attempts)? {
            Some(word) => {
                println!("✅ Unlocked");
                word
            }
            None => {
                println!("❌ Too many failed attempts.");
                return Ok(());
            }
        }
    } else {
        println!("🔐 First-time setup: create a secret word and a hint");
        let word = prompt_new_secret()?;
        let hint = Text::new("💡 Hint for the secret word:").prompt()?;
        handle_set_secret(&store, None, &word, &hint)?;
        println!("✅ Secret word saved");
        word
    };

    let accounts = open_accounts(config, &word)?;
    let generator = generator_from(config);
    let default_length = config
        .default_password_length
        .clamp(MIN_PASSWORD_LENGTH, MAX_MENU_PASSWORD_LENGTH);

    loop {
        let selection = Select::new("Choose an option:", vec![GENERATE, SAVE, SEARCH, CHECK, EXIT])
            .with_help_message("Use arrow keys to navigate, Enter to select. Ctrl+C to exit.")
            .prompt_skippable()?;

        match selection {
            Some(GENERATE) => {
                let input = Text::new("Password length:")
                    .with_default(&default_length.to_string())
                    .with_help_message(&format!(
                        "Between {} and {}",
                        MIN_PASSWORD_LENGTH, MAX_MENU_PASSWORD_LENGTH
                    ))
                    .prompt()?;

                let length = match parse_menu_length(&input) {
                    Some(length) => length,
                    None => {
                        println!(
                            "❌ Length must be a number between {} and {}",
                            MIN_PASSWORD_LENGTH, MAX_MENU_PASSWORD_LENGTH
                        );
                        continue;
                    }
                };

                match generator.generate(length) {
                    Ok(password) => {
                        println!("🔑 {}", password);
                        let save = Confirm::new("Save it under an account?")
                            .with_default(false)
                            .prompt()?;
                        if save {
                            save_account(&accounts, &password)?;
                        }
                    }
                    Err(e) => {
                        log::error!("Password generation failed: {}", e);
                        println!("❌ {}", e);
                    }
                }
            }
            Some(SAVE) => {
                let password = Password::new("Password:")
                    .with_display_mode(inquire::PasswordDisplayMode::Masked)
                    .prompt()?;
                save_account(&accounts, &password)?;
            }
            Some(SEARCH) => {
                let account = Text::new("Account:").prompt()?;
                let found = handle_find_account(&accounts, &account)?;
                println!("{}", describe_accounts(&account, &found));
            }
            Some(CHECK) => {
                let candidate = Password::new("Password to check:")
                    .with_display_mode(inquire::PasswordDisplayMode::Masked)
                    .without_confirmation()
                    .prompt()?;
                println!("{}", describe_check(&handle_check(&candidate)));
            }
            _ => break,
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}

// Bad input is reported and the menu carries on
fn save_account(accounts: &AccountStore, password: &str) -> anyhow::Result<()> {
    let account = Text::new("Account:").prompt()?;

    match handle_add_account(accounts, &account, password) {
        Ok(()) => println!("✅ Saved password for {}", account.trim()),
        Err(e) => println!("❌ {:#}", e),
    }
    Ok(())
}

fn unlock(store: &SecretStore, max_attempts: usize) -> anyhow::Result<Option<String>> {
    unlock_with(store, max_attempts, || {
        Ok(Password::new("Secret word:")
            .with_display_mode(inquire::PasswordDisplayMode::Hidden)
            .with_help_message("Leave empty to see your hint")
            .without_confirmation()
            .prompt()?)
    })
}

/// Asks for the secret word until it matches or `max_attempts` wrong answers
/// have been given, returning the accepted word. An empty answer shows the
/// hint instead of using up an attempt.
fn unlock_with<F>(store: &SecretStore, max_attempts: usize, mut ask: F) -> anyhow::Result<Option<String>>
where
    F: FnMut() -> anyhow::Result<String>,
{
    let mut attempts = 0;

    while attempts < max_attempts {
        let word = ask()?;

        if word.is_empty() {
            println!("💡 Hint: {}", store.hint()?);
            continue;
        }

        if store.verify(&word)? {
            return Ok(Some(word));
        }

        attempts += 1;
        println!("❌ Wrong secret word ({}/{})", attempts, max_attempts);
    }

    log::warn!("Locked out after {} failed secret word attempts", max_attempts);
    Ok(None)
}

fn parse_menu_length(input: &str) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|length| (MIN_PASSWORD_LENGTH..=MAX_MENU_PASSWORD_LENGTH).contains(length))
}

fn is_interrupted(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KdfParams;
    use tempfile::TempDir;

    fn store_with(dir: &TempDir, word: &str) -> SecretStore {
        let kdf = KdfParams { memory_cost: 1024, time_cost: 1, parallelism: 1 };
        let store = SecretStore::new(dir.path().join("secret.json"), kdf);
        store.set(word, "the usual").unwrap();
        store
    }

    // Hands out the scripted answers in order and counts how many were used
    fn scripted<'a>(answers: &'a [&'a str], asked: &'a mut usize) -> impl 'a + FnMut() -> anyhow::Result<String> {
        move || {
            let answer = answers.get(*asked).copied().unwrap_or("out of answers");
            *asked += 1;
            Ok(answer.to_string())
        }
    }

    #[test]
    fn test_parse_menu_length_bounds() {
        assert_eq!(parse_menu_length("4"), Some(4));
        assert_eq!(parse_menu_length(" 30 "), Some(30));
        assert_eq!(parse_menu_length("16"), Some(16));
        assert_eq!(parse_menu_length("3"), None);
        assert_eq!(parse_menu_length("31"), None);
        assert_eq!(parse_menu_length("-1"), None);
        assert_eq!(parse_menu_length("twelve"), None);
    }

    #[test]
    fn test_interrupts_are_recognised() {
        let interrupted = anyhow::Error::from(InquireError::OperationInterrupted);
        let canceled = anyhow::Error::from(InquireError::OperationCanceled);
        let other = anyhow::anyhow!("disk on fire");

        assert!(is_interrupted(&interrupted));
        assert!(is_interrupted(&canceled));
        assert!(!is_interrupted(&other));
    }

    #[test]
    fn test_unlock_after_wrong_answers() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, "harbour");
        let mut asked = 0;

        let word = unlock_with(&store, 3, scripted(&["dock", "pier", "harbour"], &mut asked)).unwrap();
        assert_eq!(word.as_deref(), Some("harbour"));
        assert_eq!(asked, 3);
    }

    #[test]
    fn test_unlock_stops_after_max_attempts() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, "harbour");
        let mut asked = 0;

        let word = unlock_with(&store, 3, scripted(&["a", "b", "c", "harbour"], &mut asked)).unwrap();
        assert_eq!(word, None);
        assert_eq!(asked, 3);
    }

    #[test]
    fn test_empty_answer_does_not_use_an_attempt() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, "harbour");
        let mut asked = 0;

        let word = unlock_with(&store, 2, scripted(&["", "wrong", "", "harbour"], &mut asked)).unwrap();
        assert_eq!(word.as_deref(), Some("harbour"));
        assert_eq!(asked, 4);
    }

    #[test]
    fn test_prompt_errors_end_unlock() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, "harbour");

        let result = unlock_with(&store, 3, || Err(InquireError::OperationInterrupted.into()));
        assert!(is_interrupted(&result.unwrap_err()));
    }
}
