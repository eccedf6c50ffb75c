use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("ReportError: {0}")]
    Report(#[from] ReportError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Input error: {0}")]
    Input(String),
    #[error("Output error: {0}")]
    Output(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unable to connect to server at {endpoint}: {message}")]
    Connection { endpoint: String, message: String },
    #[error("Response error: {status} from {endpoint}")]
    Response {
        status: u16,
        endpoint: String,
        body: Vec<u8>,
    },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    /// Raw response body as text, for `Response` errors.
    pub fn body_text(&self) -> Option<String> {
        match self {
            ApiError::Response { body, .. } => Some(String::from_utf8_lossy(body).into_owned()),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing credentials: a username and password are required")]
    MissingCredentials,
    #[error("Login failed: Invalid credentials")]
    InvalidCredentials,
    #[error("API key authentication is not supported by the server")]
    ApiKeyUnsupported,
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid format type: {value}")]
    InvalidFormat { value: String },
    #[error("Unsupported language: {value}")]
    UnsupportedLanguage { value: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{field}': {value}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration save failed: {message}")]
    ConfigSaveFailed { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "critical",
            ErrorSeverity::High => "error",
            ErrorSeverity::Medium => "warning",
            ErrorSeverity::Low => "info",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Connection { .. } => ErrorSeverity::Critical,
                ApiError::Response { status, .. } if *status >= 500 => ErrorSeverity::High,
                ApiError::Response { status: 401 | 403, .. } => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Auth(_) => ErrorSeverity::High,
            AppError::Report(_) => ErrorSeverity::Low,
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Auth(AuthError::MissingCredentials) => "Missing credentials".to_string(),
            AppError::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_string(),
            AppError::Api(ApiError::Connection { .. }) => {
                "Unable to connect to server. Please try after sometime.".to_string()
            }
            AppError::Api(err @ ApiError::Response { status, .. }) => {
                let body = err.body_text().unwrap_or_default();
                if body.is_empty() {
                    format!("Server responded with status {}", status)
                } else {
                    format!("Server responded with status {}: {}", status, body)
                }
            }
            AppError::Report(err) => err.to_string(),
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Auth(AuthError::MissingCredentials) => Some(
                "pass --username/--password, set APPKNOX_USERNAME/APPKNOX_PASSWORD or run 'appknox login'"
                    .to_string(),
            ),
            AppError::Auth(AuthError::InvalidCredentials) => {
                Some("'appknox login' try again".to_string())
            }
            AppError::Api(ApiError::Connection { .. }) => {
                Some("Check your internet connection and the configured host".to_string())
            }
            AppError::Report(_) => {
                Some("supported formats: json, pdf; supported languages: en, ja".to_string())
            }
            _ => None,
        }
    }
}
