use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

use passkeeper::cli::{self, Args};
use passkeeper::core::config::Config;

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    let dotenv_loaded = Path::new(".env").exists() && dotenvy::dotenv().is_ok();

    let args = Args::parse();

    let mut config = Config::load();
    if let Some(path) = args.secret_file {
        config.secret_file = path;
    }

    // Logs go to stderr so generated passwords on stdout can be piped
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_module_path(true)
        .target(env_logger::Target::Stderr)
        .init();

    if dotenv_loaded {
        log::debug!("Loaded .env file");
    }
    log::debug!("Loaded config: {:?}", config);

    match args.command {
        Some(command) => cli::handlers::run_command(command, &config),
        None => {
            cli::menu::run_cli_menu(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
