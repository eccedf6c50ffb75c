use crate::api::constants::{
    DEFAULT_APPKNOX_HOST, DEFAULT_SECURE_CONNECTION, DEFAULT_VULNERABILITY_LANGUAGE,
};
use crate::api::models::{ApiResponse, LoginRequest, LoginResponse, Pagination, ReportRequest, SignedUrl};
use crate::error::{ApiError, AppError, AuthError, StorageError};
use crate::map_api_error;
use crate::utils::error_helpers::{convert_json_error, convert_request_error};
use crate::utils::logging::{FacadeSink, LogRecord, LogSink};
use log::Level;
use reqwest::{Client, Method, Response};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

const USER_AGENT: &str = concat!("appknox-rs/", env!("CARGO_PKG_VERSION"));
const LOGIN_ENDPOINT: &str = "token/new.json";
const UPLOAD_CONTENT_TYPE: &str = "application/octet-stream";

/// How the client proves its identity to the server.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthStrategy {
    Basic { username: String, password: String },
    ApiKey(String),
}

impl fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStrategy::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            AuthStrategy::ApiKey(_) => f.debug_tuple("ApiKey").field(&"<redacted>").finish(),
        }
    }
}

/// Collects connection settings and credentials. [`ClientBuilder::login`]
/// is the only way to obtain an [`AppknoxClient`].
pub struct ClientBuilder {
    username: Option<String>,
    password: Option<String>,
    api_key: Option<String>,
    host: String,
    secure: bool,
    sink: Arc<dyn LogSink>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            username: None,
            password: None,
            api_key: None,
            host: DEFAULT_APPKNOX_HOST.to_string(),
            secure: DEFAULT_SECURE_CONNECTION,
            sink: Arc::new(FacadeSink),
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn credentials(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username(username).password(password)
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn api_base(&self) -> String {
        let protocol = if self.secure { "https" } else { "http" };
        format!("{}://{}/api", protocol, self.host)
    }

    /// Pick the credential mode. Empty strings count as absent.
    pub fn auth_strategy(&self) -> Result<AuthStrategy, AuthError> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }

        if let (Some(username), Some(password)) = (present(&self.username), present(&self.password))
        {
            return Ok(AuthStrategy::Basic {
                username: username.to_string(),
                password: password.to_string(),
            });
        }
        if let Some(api_key) = present(&self.api_key) {
            return Ok(AuthStrategy::ApiKey(api_key.to_string()));
        }
        Err(AuthError::MissingCredentials)
    }

    /// Authenticate against `token/new.json` and return a ready client.
    pub async fn login(self) -> Result<AppknoxClient, AppError> {
        let (username, password) = match self.auth_strategy()? {
            AuthStrategy::Basic { username, password } => (username, password),
            AuthStrategy::ApiKey(_) => return Err(AuthError::ApiKeyUnsupported.into()),
        };

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init"))?;

        let api_base = self.api_base();
        let login_url = format!("{}/{}", api_base, LOGIN_ENDPOINT);
        self.sink.record(&LogRecord {
            level: Level::Debug,
            message: "Logging in",
            fields: &[("url", login_url.as_str())],
        });

        let response = map_api_error!(
            http.post(&login_url)
                .form(&LoginRequest {
                    username: &username,
                    password: &password,
                })
                .send()
                .await,
            LOGIN_ENDPOINT
        )?;
        let status = response.status();
        let body = map_api_error!(response.bytes().await, LOGIN_ENDPOINT)?;

        let login: LoginResponse = match serde_json::from_slice(&body) {
            Ok(login) => login,
            Err(_) if !status.is_success() => {
                return Err(ApiError::Response {
                    status: status.as_u16(),
                    endpoint: LOGIN_ENDPOINT.to_string(),
                    body: body.to_vec(),
                }
                .into());
            }
            Err(e) => return Err(convert_json_error(e, LOGIN_ENDPOINT).into()),
        };

        match (login.success, status.is_success()) {
            (Some(false), _) => {
                self.sink.record(&LogRecord {
                    level: Level::Warn,
                    message: "Login rejected",
                    fields: &[("username", username.as_str())],
                });
                return Err(AuthError::InvalidCredentials.into());
            }
            (_, false) => {
                return Err(ApiError::Response {
                    status: status.as_u16(),
                    endpoint: LOGIN_ENDPOINT.to_string(),
                    body: body.to_vec(),
                }
                .into());
            }
            (None, true) => {
                return Err(ApiError::Decode {
                    endpoint: LOGIN_ENDPOINT.to_string(),
                    message: "login response has no success flag".to_string(),
                }
                .into());
            }
            (Some(true), true) => {}
        }

        let (token, user) = match (login.token, login.user) {
            (Some(token), Some(user)) if !token.is_empty() && !user.is_empty() => (token, user),
            _ => {
                return Err(ApiError::Decode {
                    endpoint: LOGIN_ENDPOINT.to_string(),
                    message: "login response is missing token or user".to_string(),
                }
                .into());
            }
        };

        self.sink.record(&LogRecord {
            level: Level::Debug,
            message: "Logged in",
            fields: &[("user", user.as_str())],
        });

        Ok(AppknoxClient {
            http,
            api_base,
            user,
            token,
            sink: self.sink,
        })
    }
}

/// An authenticated session with the Appknox API.
///
/// Every method issues its calls one after another; nothing is retried.
/// The client is not mutated after login, but it makes no promises about
/// concurrent use.
pub struct AppknoxClient {
    http: Client,
    api_base: String,
    user: String,
    token: String,
    sink: Arc<dyn LogSink>,
}

impl fmt::Debug for AppknoxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppknoxClient")
            .field("api_base", &self.api_base)
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Map a status outside [200, 299] to a response error carrying the raw body.
pub(crate) fn check_status(status: u16, endpoint: &str, body: Vec<u8>) -> Result<Vec<u8>, ApiError> {
    if (200..=299).contains(&status) {
        Ok(body)
    } else {
        Err(ApiError::Response {
            status,
            endpoint: endpoint.to_string(),
            body,
        })
    }
}

impl AppknoxClient {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Log in to the production host with a username/password pair.
    pub async fn connect(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, AppError> {
        ClientBuilder::new().credentials(username, password).login().await
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    fn log(&self, level: Level, message: &str, fields: &[(&str, &str)]) {
        self.sink.record(&LogRecord {
            level,
            message,
            fields,
        });
    }

    async fn read_response(response: Response, endpoint: &str) -> Result<ApiResponse, ApiError> {
        let status = response.status().as_u16();
        let body = map_api_error!(response.bytes().await, endpoint)?;
        let body = check_status(status, endpoint, body.to_vec())?;
        Ok(ApiResponse::from_bytes(&body))
    }

    /// Authenticated call against `{api_base}/{endpoint}`.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        form: &[(&str, String)],
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}/{}", self.api_base, endpoint);
        self.log(
            Level::Debug,
            "Making a request",
            &[("method", method.as_str()), ("url", url.as_str())],
        );

        let mut request = self
            .http
            .request(method, &url)
            .basic_auth(&self.user, Some(&self.token));
        if !query.is_empty() {
            request = request.query(query);
        }
        if !form.is_empty() {
            request = request.form(form);
        }

        let response = map_api_error!(request.send().await, endpoint)?;
        Self::read_response(response, endpoint).await
    }

    async fn get(&self, endpoint: &str) -> Result<ApiResponse, AppError> {
        Ok(self.request(Method::GET, endpoint, &[], &[]).await?)
    }

    pub async fn current_user(&self) -> Result<ApiResponse, AppError> {
        self.get(&format!("users/{}", self.user)).await
    }

    /// Submit a store listing URL for analysis.
    pub async fn submit_url(&self, store_url: &str) -> Result<ApiResponse, AppError> {
        Ok(self
            .request(Method::POST, "store_url", &[], &[("storeURL", store_url.to_string())])
            .await?)
    }

    /// Upload an application binary: fetch a signed URL, PUT the bytes to
    /// it, then register the upload. A failure after the PUT leaves an
    /// unregistered blob behind.
    pub async fn upload_file(&self, content: Vec<u8>) -> Result<ApiResponse, AppError> {
        let signed = self
            .request(
                Method::GET,
                "signed_url",
                &[],
                &[("content_type", UPLOAD_CONTENT_TYPE.to_string())],
            )
            .await?;
        let signed: SignedUrl = match signed {
            ApiResponse::Json(value) => {
                serde_json::from_value(value).map_err(|e| convert_json_error(e, "signed_url"))?
            }
            ApiResponse::Text(_) => {
                return Err(ApiError::Decode {
                    endpoint: "signed_url".to_string(),
                    message: "expected a JSON object with url, file_key and file_key_signed"
                        .to_string(),
                }
                .into());
            }
        };

        self.log(
            Level::Info,
            "Please wait while uploading file..",
            &[("url", signed.url.as_str())],
        );
        // The signed URL carries its own authorization.
        let response = map_api_error!(
            self.http.put(&signed.url).body(content).send().await,
            "signed_url upload"
        )?;
        Self::read_response(response, "signed_url upload").await?;

        Ok(self
            .request(
                Method::POST,
                "uploaded_file",
                &[],
                &[
                    ("file_key", signed.file_key),
                    ("file_key_signed", signed.file_key_signed),
                ],
            )
            .await?)
    }

    /// Read `path` from disk and [`upload_file`](Self::upload_file) it.
    pub async fn upload_path(&self, path: impl AsRef<Path>) -> Result<ApiResponse, AppError> {
        let path = path.as_ref();
        let content = tokio::fs::read(path)
            .await
            .map_err(|source| StorageError::FileIo {
                path: path.to_string_lossy().to_string(),
                source,
            })?;
        self.upload_file(content).await
    }

    pub async fn project_get(&self, project_id: u64) -> Result<ApiResponse, AppError> {
        self.get(&format!("projects/{}", project_id)).await
    }

    pub async fn project_list(&self, pagination: Pagination) -> Result<ApiResponse, AppError> {
        let query = [
            ("limit", pagination.limit.to_string()),
            ("offset", pagination.offset.to_string()),
        ];
        Ok(self.request(Method::GET, "projects", &query, &[]).await?)
    }

    pub async fn file_get(&self, file_id: u64) -> Result<ApiResponse, AppError> {
        self.get(&format!("files/{}", file_id)).await
    }

    pub async fn file_list(
        &self,
        project_id: u64,
        pagination: Pagination,
    ) -> Result<ApiResponse, AppError> {
        let query = [
            ("projectId", project_id.to_string()),
            ("offset", pagination.offset.to_string()),
            ("limit", pagination.limit.to_string()),
        ];
        Ok(self.request(Method::GET, "files", &query, &[]).await?)
    }

    pub async fn dynamic_start(&self, file_id: u64) -> Result<ApiResponse, AppError> {
        self.get(&format!("dynamic/{}", file_id)).await
    }

    pub async fn dynamic_stop(&self, file_id: u64) -> Result<ApiResponse, AppError> {
        self.get(&format!("dynamic_shutdown/{}", file_id)).await
    }

    /// Stop, then start. If the start fails the scan stays stopped.
    pub async fn dynamic_restart(&self, file_id: u64) -> Result<ApiResponse, AppError> {
        self.dynamic_stop(file_id).await?;
        self.dynamic_start(file_id).await
    }

    /// Analyses are embedded in the file resource, so this reads `files/{id}`.
    pub async fn analyses_list(&self, file_id: u64) -> Result<ApiResponse, AppError> {
        self.get(&format!("files/{}", file_id)).await
    }

    /// Fetch a report. `format` must be `json` or `pdf`, `language` `en` or
    /// `ja`; anything else fails before a request is made.
    pub async fn report(
        &self,
        file_id: u64,
        format: &str,
        language: &str,
    ) -> Result<ApiResponse, AppError> {
        let request = ReportRequest::parse(file_id, format, language)?;
        self.report_request(&request).await
    }

    pub async fn report_request(&self, request: &ReportRequest) -> Result<ApiResponse, AppError> {
        Ok(self
            .request(Method::GET, &request.endpoint(), &request.query(), &[])
            .await?)
    }

    pub async fn payment(&self, card: &str) -> Result<ApiResponse, AppError> {
        Ok(self
            .request(Method::POST, "stripe_payment", &[], &[("card", card.to_string())])
            .await?)
    }

    pub async fn vulnerability(
        &self,
        vulnerability_id: u64,
        language: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        let language = language.unwrap_or(DEFAULT_VULNERABILITY_LANGUAGE);
        Ok(self
            .request(
                Method::GET,
                &format!("vulnerabilities/{}", vulnerability_id),
                &[("language", language.to_string())],
                &[],
            )
            .await?)
    }
}
