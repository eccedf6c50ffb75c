//! Input validation and sanitization utilities
//!
//! This module provides utilities for validating user input and
//! configuration values before they reach the API client.

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate a bare host name, optionally with a port (`api.appknox.com`, `localhost:8000`)
pub fn validate_host(host: &str) -> crate::Result<()> {
    if host.is_empty() {
        return Err(CliError::InvalidArguments("Host cannot be empty".to_string()).into());
    }

    if host.contains("://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid host '{}': give the host without a scheme, use --insecure for http",
            host
        ))
        .into());
    }

    if host.contains('/') || host.chars().any(char::is_whitespace) {
        return Err(CliError::InvalidArguments(format!(
            "Invalid host '{}': host must not contain a path or whitespace",
            host
        ))
        .into());
    }

    Ok(())
}
