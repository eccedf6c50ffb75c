use crate::api::constants::{
    DEFAULT_LIMIT, DEFAULT_OFFSET, DEFAULT_REPORT_FORMAT, DEFAULT_REPORT_LANGUAGE,
    DEFAULT_VULNERABILITY_LANGUAGE,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "appknox")]
#[command(about = "Command line interface for the Appknox security scanning API")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Server host, e.g. api.appknox.com
    #[arg(long, global = true, env = "APPKNOX_HOST")]
    pub host: Option<String>,

    /// Use http instead of https
    #[arg(long, global = true)]
    pub insecure: bool,

    #[arg(short, long, global = true, env = "APPKNOX_USERNAME")]
    pub username: Option<String>,

    #[arg(long, global = true, env = "APPKNOX_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify credentials and store them for the profile
    Login,
    /// Remove the stored password for the profile
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Submit a store listing URL for analysis
    SubmitUrl {
        /// Play Store / App Store URL
        url: String,
    },
    /// Upload an application binary
    Upload {
        /// Path to the .apk / .ipa file
        path: PathBuf,
    },
    /// Project commands
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// File commands
    File {
        #[command(subcommand)]
        command: FileCommands,
    },
    /// List analyses of a file
    Analyses {
        /// File ID
        file_id: u64,
    },
    /// Dynamic scan control
    Dynamic {
        #[command(subcommand)]
        command: DynamicCommands,
    },
    /// Fetch the report of a file
    Report {
        /// File ID
        file_id: u64,
        /// json or pdf
        #[arg(long, default_value = DEFAULT_REPORT_FORMAT)]
        format: String,
        /// en or ja
        #[arg(long, default_value = DEFAULT_REPORT_LANGUAGE)]
        language: String,
    },
    /// Show a vulnerability
    Vulnerability {
        /// Vulnerability ID
        id: u64,
        #[arg(long, default_value = DEFAULT_VULNERABILITY_LANGUAGE)]
        language: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Show a project
    Get {
        /// Project ID
        id: u64,
    },
    /// List projects
    List {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = DEFAULT_OFFSET)]
        offset: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum FileCommands {
    /// Show a file
    Get {
        /// File ID
        id: u64,
    },
    /// List files of a project
    List {
        /// Project ID
        project_id: u64,
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = DEFAULT_OFFSET)]
        offset: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum DynamicCommands {
    /// Start a dynamic scan
    Start { file_id: u64 },
    /// Stop a dynamic scan
    Stop { file_id: u64 },
    /// Stop, then start a dynamic scan
    Restart { file_id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set a profile value (host, secure, username)
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}
