use crate::api::constants::{DEFAULT_LIMIT, DEFAULT_OFFSET};
use crate::error::ReportError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Custom deserializer: the server sends the user id as a number, some
/// deployments as a string. Both are kept as their textual form.
fn deserialize_user_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

// Authentication models
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// Absent on error bodies such as `{"detail": ...}`.
    #[serde(default)]
    pub success: Option<bool>,
    pub token: Option<String>,
    #[serde(deserialize_with = "deserialize_user_id", default)]
    pub user: Option<String>,
}

/// Pre-authorized upload target returned by `signed_url`.
#[derive(Debug, Deserialize, Clone)]
pub struct SignedUrl {
    pub url: String,
    pub file_key: String,
    pub file_key_signed: String,
}

/// Body of a successful response: JSON when it parses, the raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

impl ApiResponse {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(value) => ApiResponse::Json(value),
            Err(_) => ApiResponse::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Text(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ApiResponse::Json(_) => None,
            ApiResponse::Text(text) => Some(text),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, ApiResponse::Json(_))
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiResponse::Json(value) => match serde_json::to_string_pretty(value) {
                Ok(pretty) => f.write_str(&pretty),
                Err(_) => write!(f, "{}", value),
            },
            ApiResponse::Text(text) => f.write_str(text),
        }
    }
}

/// Limit/offset pair for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Pagination {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Json,
    Pdf,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ReportFormat::Json),
            "pdf" => Ok(ReportFormat::Pdf),
            _ => Err(ReportError::InvalidFormat {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportLanguage {
    #[default]
    En,
    Ja,
}

impl ReportLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportLanguage::En => "en",
            ReportLanguage::Ja => "ja",
        }
    }
}

impl FromStr for ReportLanguage {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(ReportLanguage::En),
            "ja" => Ok(ReportLanguage::Ja),
            _ => Err(ReportError::UnsupportedLanguage {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReportLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated parameters for a report download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub file_id: u64,
    pub format: ReportFormat,
    pub language: ReportLanguage,
}

impl ReportRequest {
    /// JSON report in English.
    pub fn new(file_id: u64) -> Self {
        Self {
            file_id,
            format: ReportFormat::default(),
            language: ReportLanguage::default(),
        }
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_language(mut self, language: ReportLanguage) -> Self {
        self.language = language;
        self
    }

    /// Format is checked before language, so an input with both wrong
    /// reports the format.
    pub fn parse(file_id: u64, format: &str, language: &str) -> Result<Self, ReportError> {
        Ok(Self {
            file_id,
            format: format.parse()?,
            language: language.parse()?,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("report/{}", self.file_id)
    }

    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("format", self.format.as_str().to_string()),
            ("language", self.language.as_str().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_numeric_user() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"success": true, "token": "T", "user": 42}"#).unwrap();
        assert_eq!(resp.success, Some(true));
        assert_eq!(resp.token.as_deref(), Some("T"));
        assert_eq!(resp.user.as_deref(), Some("42"));
    }

    #[test]
    fn test_login_response_failure_without_token() {
        let resp: LoginResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(resp.success, Some(false));
        assert!(resp.token.is_none());
        assert!(resp.user.is_none());
    }

    #[test]
    fn test_login_response_error_body_has_no_flag() {
        let resp: LoginResponse = serde_json::from_str(r#"{"detail": "maintenance"}"#).unwrap();
        assert!(resp.success.is_none());
    }

    #[test]
    fn test_api_response_falls_back_to_text() {
        let resp = ApiResponse::from_bytes(b"<html>ok</html>");
        assert_eq!(resp.as_text(), Some("<html>ok</html>"));
        assert!(!resp.is_json());

        let resp = ApiResponse::from_bytes(br#"{"id": 1}"#);
        assert_eq!(resp.as_json().and_then(|v| v["id"].as_u64()), Some(1));
    }

    #[test]
    fn test_pagination_default() {
        let pagination = Pagination::default();
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn test_report_request_validation() {
        let request = ReportRequest::parse(7, "pdf", "ja").unwrap();
        assert_eq!(request.format, ReportFormat::Pdf);
        assert_eq!(request.language, ReportLanguage::Ja);
        assert_eq!(request.endpoint(), "report/7");

        assert!(matches!(
            ReportRequest::parse(7, "xml", "en"),
            Err(ReportError::InvalidFormat { .. })
        ));
        assert!(matches!(
            ReportRequest::parse(7, "json", "fr"),
            Err(ReportError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_report_defaults_match_constants() {
        use crate::api::constants::{DEFAULT_REPORT_FORMAT, DEFAULT_REPORT_LANGUAGE};
        assert_eq!(ReportFormat::default().as_str(), DEFAULT_REPORT_FORMAT);
        assert_eq!(ReportLanguage::default().as_str(), DEFAULT_REPORT_LANGUAGE);

        let request = ReportRequest::new(9);
        assert_eq!(request.format.as_str(), DEFAULT_REPORT_FORMAT);
        assert_eq!(request.language.as_str(), DEFAULT_REPORT_LANGUAGE);
        assert_eq!(
            request.with_format(ReportFormat::Pdf),
            ReportRequest::parse(9, "pdf", "en").unwrap()
        );
    }
}
