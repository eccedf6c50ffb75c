//! # appknox
//!
//! Client library for the Appknox application security scanning API.
//!
//! A client is obtained by logging in; every other operation is a single
//! authenticated HTTP call, except uploads (three calls) and dynamic scan
//! restarts (two calls).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use appknox::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> appknox::Result<()> {
//!     let client = AppknoxClient::builder()
//!         .credentials("alice@example.com", "secret")
//!         .login()
//!         .await?;
//!
//!     let projects = client.project_list(Pagination::default()).await?;
//!     println!("{}", projects);
//!
//!     let report = client.report(1234, "json", "en").await?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           CLI Layer                 │  `appknox` binary, argument parsing
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  Credential collection, session setup
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  Profiles (TOML), password (keyring)
//! └─────────────────────────────────────┘
//!   API layer (client, models, defaults) and utils are shared support layers.
//! ```
//!
//! ## Logging
//!
//! The library never installs a logger. Records go to the [`LogSink`]
//! given to [`ClientBuilder::log_sink`]; the default forwards to the `log`
//! facade under the `appknox` target.
//!
//! [`LogSink`]: utils::logging::LogSink
//! [`ClientBuilder::log_sink`]: api::client::ClientBuilder::log_sink

pub use error::AppError;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::Result;
    pub use crate::api::client::{AppknoxClient, AuthStrategy, ClientBuilder};
    pub use crate::api::models::{
        ApiResponse, Pagination, ReportFormat, ReportLanguage, ReportRequest,
    };
    pub use crate::error::{ApiError, AppError, AuthError, ReportError};
    pub use crate::utils::logging::{FacadeSink, LogRecord, LogSink, NullSink};
}

pub mod cli; // Command-line interface
pub mod core; // Credential collection and session setup
pub mod storage; // Configuration and password persistence

pub mod api; // Appknox API client
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;

#[doc(hidden)]
pub use api::client::{AppknoxClient, ClientBuilder};
#[doc(hidden)]
pub use api::models::{ApiResponse, Pagination};
