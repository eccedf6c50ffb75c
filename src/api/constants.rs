//! Default values shared by the client and the command-line tool.

use log::LevelFilter;

pub const DEFAULT_APPKNOX_HOST: &str = "api.appknox.com";
pub const DEFAULT_SECURE_CONNECTION: bool = true;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_OFFSET: u32 = 0;

pub const DEFAULT_REPORT_FORMAT: &str = "json";
pub const DEFAULT_REPORT_LANGUAGE: &str = "en";

pub const DEFAULT_VULNERABILITY_LANGUAGE: &str = "en";
