use crate::api::client::{AppknoxClient, ClientBuilder};
use crate::error::{AppError, CliError};
use crate::storage::config::Profile;
use crate::storage::credentials::Credentials;
use crate::utils::error_helpers::convert_io_error;
use crate::utils::logging::{LogRecord, LogSink};
use log::Level;
use rpassword::read_password;
use std::io::{self, Write};
use std::sync::Arc;

/// User login credentials input handler
#[derive(Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    /// Collect login credentials from interactive input.
    /// If `default_username` is provided, only the password is prompted.
    pub fn collect(default_username: Option<&str>) -> Result<Self, AppError> {
        let username = if let Some(username) = default_username {
            println!("Using username: {}", username);
            username.to_string()
        } else {
            print!("Username: ");
            io::stdout()
                .flush()
                .map_err(|e| convert_io_error(e, "Failed to flush stdout"))?;

            let mut username = String::new();
            io::stdin().read_line(&mut username).map_err(|e| {
                AppError::Cli(CliError::Input(format!("Failed to read username: {}", e)))
            })?;
            username.trim().to_string()
        };

        print!("Password: ");
        io::stdout()
            .flush()
            .map_err(|e| convert_io_error(e, "Failed to flush stdout"))?;

        let password = read_password().map_err(|e| {
            AppError::Cli(CliError::Input(format!("Failed to read password: {}", e)))
        })?;

        Ok(Self {
            username,
            password: password.trim().to_string(),
        })
    }

    /// Use arguments when both are given, prompt for whatever is missing.
    pub fn from_args_or_prompt(
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, AppError> {
        match (username, password) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            (username, _) => Self::collect(username.as_deref()),
        }
    }

    /// Validate that credentials are not empty
    pub fn validate(&self) -> Result<(), AppError> {
        if self.username.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "Username cannot be empty".to_string(),
            )));
        }
        if self.password.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "Password cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Where and as whom to log in, after merging flags, environment,
/// profile and keyring.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSettings {
    pub host: String,
    pub secure: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConnectionSettings {
    /// Flags/environment first, then the profile. The keyring is only asked
    /// for a password once a username is known; keyring failures are logged
    /// and treated as "nothing stored".
    pub fn resolve(
        profile: &Profile,
        host: Option<String>,
        insecure: bool,
        username: Option<String>,
        password: Option<String>,
        credentials: &Credentials,
        sink: &dyn LogSink,
    ) -> Self {
        let username = username
            .filter(|u| !u.is_empty())
            .or_else(|| profile.username.clone());

        let password = match password.filter(|p| !p.is_empty()) {
            Some(password) => Some(password),
            None if username.is_some() => match credentials.load_password() {
                Ok(stored) => stored,
                Err(e) => {
                    let reason = e.to_string();
                    sink.record(&LogRecord {
                        level: Level::Warn,
                        message: "Could not read stored password",
                        fields: &[
                            ("profile", credentials.profile_name.as_str()),
                            ("reason", reason.as_str()),
                        ],
                    });
                    None
                }
            },
            None => None,
        };

        Self {
            host: host.unwrap_or_else(|| profile.host.clone()),
            secure: profile.secure && !insecure,
            username,
            password,
        }
    }

    pub fn builder(&self, sink: Arc<dyn LogSink>) -> ClientBuilder {
        let mut builder = ClientBuilder::new()
            .host(self.host.clone())
            .secure(self.secure)
            .log_sink(sink);
        if let Some(username) = &self.username {
            builder = builder.username(username.clone());
        }
        if let Some(password) = &self.password {
            builder = builder.password(password.clone());
        }
        builder
    }

    pub async fn connect(&self, sink: Arc<dyn LogSink>) -> Result<AppknoxClient, AppError> {
        self.builder(sink).login().await
    }
}
