use crate::api::client::AppknoxClient;
use crate::api::models::{ApiResponse, Pagination};
use crate::cli::main_types::{
    Commands, ConfigCommands, DynamicCommands, FileCommands, ProjectCommands,
};
use crate::core::auth::{ConnectionSettings, LoginInput};
use crate::error::{AppError, CliError, ConfigError};
use crate::storage::config::Config;
use crate::storage::credentials::Credentials;
use crate::utils::logging::{LogSink, VerboseLogger};
use crate::utils::validation::{validate_host, validate_url};
use std::path::PathBuf;
use std::sync::Arc;

/// Global options that shape how a session is opened.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub host: Option<String>,
    pub insecure: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    profile_name: String,
    options: SessionOptions,
    logger: Arc<VerboseLogger>,
}

impl Dispatcher {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        profile_name: String,
        options: SessionOptions,
        verbose: bool,
    ) -> Self {
        Self {
            config,
            config_path,
            profile_name,
            options,
            logger: Arc::new(VerboseLogger::new(verbose)),
        }
    }

    fn log_verbose(&self, msg: &str) {
        self.logger.log(msg);
    }

    fn sink(&self) -> Arc<dyn LogSink> {
        self.logger.clone()
    }

    fn settings(&self) -> ConnectionSettings {
        let profile = self
            .config
            .get_profile(&self.profile_name)
            .cloned()
            .unwrap_or_default();
        ConnectionSettings::resolve(
            &profile,
            self.options.host.clone(),
            self.options.insecure,
            self.options.username.clone(),
            self.options.password.clone(),
            &Credentials::new(self.profile_name.clone()),
            self.logger.as_ref(),
        )
    }

    async fn client(&self) -> Result<AppknoxClient, AppError> {
        let settings = self.settings();
        validate_host(&settings.host)?;
        self.log_verbose(&format!(
            "Connecting to {} as {}",
            settings.host,
            settings.username.as_deref().unwrap_or("(no username)")
        ));
        settings.connect(self.sink()).await
    }

    fn print(response: &ApiResponse) {
        println!("{}", response);
    }

    pub async fn dispatch(mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Login => self.handle_login().await,
            Commands::Logout => self.handle_logout(),
            Commands::Config { command } => self.handle_config_command(command),
            command => {
                let client = self.client().await?;
                let response = Self::run(&client, command).await?;
                Self::print(&response);
                Ok(())
            }
        }
    }

    async fn run(client: &AppknoxClient, command: Commands) -> Result<ApiResponse, AppError> {
        match command {
            Commands::Whoami => client.current_user().await,
            Commands::SubmitUrl { url } => {
                validate_url(&url)?;
                client.submit_url(&url).await
            }
            Commands::Upload { path } => client.upload_path(&path).await,
            Commands::Project { command } => match command {
                ProjectCommands::Get { id } => client.project_get(id).await,
                ProjectCommands::List { limit, offset } => {
                    client.project_list(Pagination::new(limit, offset)).await
                }
            },
            Commands::File { command } => match command {
                FileCommands::Get { id } => client.file_get(id).await,
                FileCommands::List {
                    project_id,
                    limit,
                    offset,
                } => {
                    client
                        .file_list(project_id, Pagination::new(limit, offset))
                        .await
                }
            },
            Commands::Analyses { file_id } => client.analyses_list(file_id).await,
            Commands::Dynamic { command } => match command {
                DynamicCommands::Start { file_id } => client.dynamic_start(file_id).await,
                DynamicCommands::Stop { file_id } => client.dynamic_stop(file_id).await,
                DynamicCommands::Restart { file_id } => client.dynamic_restart(file_id).await,
            },
            Commands::Report {
                file_id,
                format,
                language,
            } => client.report(file_id, &format, &language).await,
            Commands::Vulnerability { id, language } => {
                client.vulnerability(id, Some(&language)).await
            }
            Commands::Login | Commands::Logout | Commands::Config { .. } => {
                Err(AppError::Cli(CliError::InvalidArguments(
                    "command does not need a session".to_string(),
                )))
            }
        }
    }

    async fn handle_login(&mut self) -> Result<(), AppError> {
        self.log_verbose("Attempting login command");
        let default_username = self.options.username.clone().or_else(|| {
            self.config
                .get_profile(&self.profile_name)
                .and_then(|p| p.username.clone())
        });
        let input =
            LoginInput::from_args_or_prompt(default_username, self.options.password.clone())?;
        input.validate()?;

        self.options.username = Some(input.username.clone());
        self.options.password = Some(input.password.clone());
        let client = self.client().await?;

        Credentials::new(self.profile_name.clone()).save_password(&input.password)?;
        let profile = self.config.profile_mut(&self.profile_name);
        profile.username = Some(input.username.clone());
        if self.config.default_profile.is_none() {
            self.config.default_profile = Some(self.profile_name.clone());
        }
        self.config.save(self.config_path.clone())?;

        println!("✅ Successfully logged in as {}", input.username);
        println!("Connected to: {}", client.api_base());
        Ok(())
    }

    fn handle_logout(&self) -> Result<(), AppError> {
        self.log_verbose("Attempting logout command");
        Credentials::new(self.profile_name.clone()).clear_password()?;
        println!(
            "✅ Successfully logged out from profile: {}",
            self.profile_name
        );
        Ok(())
    }

    fn handle_config_command(&mut self, command: ConfigCommands) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                self.log_verbose("Attempting config show command");
                println!("Current Configuration:");
                println!("=====================");

                match &self.config.default_profile {
                    Some(default_profile) => println!("Default Profile: {}", default_profile),
                    None => println!("Default Profile: (not set)"),
                }

                println!("\nProfiles:");
                if self.config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    let mut names: Vec<&String> = self.config.profiles.keys().collect();
                    names.sort();
                    for name in names {
                        let profile = &self.config.profiles[name];
                        println!("  [{}]", name);
                        println!("    Host: {}", profile.host);
                        println!("    Secure: {}", profile.secure);
                        if let Some(username) = &profile.username {
                            println!("    Username: {}", username);
                        }
                    }
                }
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                self.log_verbose(&format!(
                    "Attempting config set - key: {}, value: {}",
                    key, value
                ));
                apply_setting(&mut self.config, &self.profile_name, &key, &value)?;
                self.config.save(self.config_path.clone())?;
                println!("✅ {} = {} (profile: {})", key, value, self.profile_name);
                Ok(())
            }
        }
    }
}

/// Set one profile field from its user-facing name.
pub fn apply_setting(
    config: &mut Config,
    profile_name: &str,
    key: &str,
    value: &str,
) -> Result<(), AppError> {
    match key {
        "host" => {
            validate_host(value)?;
            config.profile_mut(profile_name).host = value.to_string();
        }
        "secure" => {
            let secure = value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                field: key.to_string(),
                value: value.to_string(),
                reason: "expected true or false".to_string(),
            })?;
            config.profile_mut(profile_name).secure = secure;
        }
        "username" => {
            config.profile_mut(profile_name).username = Some(value.to_string());
        }
        _ => {
            return Err(AppError::Cli(CliError::InvalidArguments(format!(
                "Unknown field: {}. Use 'host', 'secure' or 'username'",
                key
            ))));
        }
    }
    Ok(())
}
