//! CLI argument definitions for the Precog binary.

use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use precog::{
    ClientConfig,
    constants::{API_HOST, API_PATH, API_PORT},
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Aligned tables and plain values
    Human,
    /// One JSON document per command
    Json,
}

/// Precog storage and query client
#[derive(Parser, Debug)]
#[command(name = "precog")]
#[command(about = "Precog: store records, run queries and manage tokens")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub format: Format,

    #[command(subcommand)]
    pub command: Commands,
}

/// Endpoint and credentials shared by every command
#[derive(clap::Args, Debug)]
pub struct ConnectionArgs {
    /// Token used to authenticate every request
    #[arg(long, env = "PRECOG_TOKEN_ID", hide_env_values = true)]
    pub token_id: String,

    /// API host
    #[arg(long, default_value = API_HOST, env = "PRECOG_HOST")]
    pub host: String,

    /// API port
    #[arg(short, long, default_value_t = API_PORT, env = "PRECOG_PORT")]
    pub port: u16,

    /// Path prefix prepended to every request
    #[arg(long, default_value = API_PATH, env = "PRECOG_PATH_PREFIX")]
    pub path_prefix: String,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(short, long, env = "PRECOG_TIMEOUT")]
    pub timeout: Option<u64>,
}

impl ConnectionArgs {
    /// Client settings described by these arguments.
    pub fn config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.token_id.clone())
            .with_endpoint(self.host.clone(), self.port)
            .with_path_prefix(self.path_prefix.clone());
        match self.timeout {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage access tokens
    #[command(subcommand)]
    Token(TokenCommands),
    /// Store a JSON record at a path
    Store(StoreArgs),
    /// Run a query relative to a path
    Query(QueryArgs),
    /// List the children of a path
    Ls(LsArgs),
}

#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Create a token granting access to a subtree
    Create(TokenCreateArgs),
    /// Show the token used for authentication
    Show,
    /// Delete a token
    Delete(TokenDeleteArgs),
}

/// Arguments for the token create command
#[derive(clap::Args, Debug)]
pub struct TokenCreateArgs {
    /// Subtree the token grants access to
    pub path: String,

    /// Grant write access in addition to read access
    #[arg(long)]
    pub readwrite: bool,

    /// Expiration time (RFC 3339)
    #[arg(long)]
    pub expires: Option<DateTime<Utc>>,

    /// Delegated token identifier (repeatable)
    #[arg(long = "grant")]
    pub grants: Vec<String>,
}

/// Arguments for the token delete command
#[derive(clap::Args, Debug)]
pub struct TokenDeleteArgs {
    /// Identifier of the token to delete
    pub id: String,
}

/// Arguments for the store command
#[derive(clap::Args, Debug)]
pub struct StoreArgs {
    /// Path to store the record at
    pub path: String,

    /// Record as a JSON document
    pub record: String,
}

/// Arguments for the query command
#[derive(clap::Args, Debug)]
pub struct QueryArgs {
    /// Base path the query is evaluated against
    pub path: String,

    /// Query text
    pub query: String,
}

/// Arguments for the ls command
#[derive(clap::Args, Debug)]
pub struct LsArgs {
    /// Path to list
    #[arg(default_value = "/")]
    pub path: String,
}
