use appknox::cli::dispatcher::{Dispatcher, SessionOptions};
use appknox::cli::main_types::Cli;
use appknox::storage::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load Config
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    let profile_name = cli
        .profile
        .or(config.default_profile.clone())
        .unwrap_or_else(|| "default".to_string());

    if cli.verbose {
        eprintln!("Verbose: Using profile: {}", profile_name);
        if let Some(config_dir) = &cli.config_dir {
            eprintln!("Verbose: Using config directory: {}", config_dir);
        }
    }

    let options = SessionOptions {
        host: cli.host,
        insecure: cli.insecure,
        username: cli.username,
        password: cli.password,
    };
    let dispatcher = Dispatcher::new(config, config_path, profile_name, options, cli.verbose);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("Error [{}]: {}", e.severity().label(), e.display_friendly());
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}
