//! Command-line interface for the `appknox` binary

pub mod dispatcher;
pub mod main_types;
