//! Storage layer
//!
//! Handles profile configuration and password storage for the command-line
//! tool. Uses the OS keyring for the password and TOML for configuration.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
