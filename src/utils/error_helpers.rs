use crate::error::{ApiError, CliError};
use std::io;

/// Helper functions for standardizing error conversions across the codebase.
/// Convert reqwest errors to ApiError with endpoint context
pub fn convert_request_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    if error.is_connect() {
        return ApiError::Connection {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        };
    }

    ApiError::Http {
        status: error.status().map(|s| s.as_u16()).unwrap_or(0),
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert serde_json errors to ApiError with endpoint context
pub fn convert_json_error(error: serde_json::Error, endpoint: &str) -> ApiError {
    ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: format!("JSON parse error: {}", error),
    }
}

/// Convert IO errors on the terminal to CliError
pub fn convert_io_error(error: io::Error, operation: &str) -> CliError {
    CliError::Output(format!("{}: {}", operation, error))
}

/// Helper macro for standardizing map_err patterns
#[macro_export]
macro_rules! map_api_error {
    ($result:expr, $endpoint:expr) => {
        $result.map_err(|e| $crate::utils::error_helpers::convert_request_error(e, $endpoint))
    };
}
