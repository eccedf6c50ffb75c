//! API layer - Appknox HTTP client, request/response models and defaults

pub mod client;
pub mod constants;
pub mod models;
