//! Command Line Interface (CLI) arguments.

use clap::Parser;

/// Climate API command line interface
#[derive(Clone, Debug, Parser)]
pub struct CommandLineArgs {
    /// The IP address on which the API should listen
    #[arg(long, default_value = "0.0.0.0", env = "CLIMATE_API_HOST")]
    pub host: String,
    /// The port to which the API should bind
    #[arg(long, default_value_t = 8080, env = "CLIMATE_API_PORT")]
    pub port: u16,
    /// Path to the SQLite database holding the measurement and station tables
    #[arg(
        long,
        default_value = "Resources/hawaii.sqlite",
        env = "CLIMATE_API_DATABASE"
    )]
    pub database: String,
    /// Maximum number of open database connections. Defaults to the number of CPUs.
    #[arg(long, env = "CLIMATE_API_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,
    /// Maximum time in seconds to wait for a free database connection.
    #[arg(long, default_value_t = 30, env = "CLIMATE_API_ACQUIRE_TIMEOUT")]
    pub acquire_timeout: u64,
    /// Flag indicating whether HTTPS should be used
    #[arg(long, default_value_t = false, env = "CLIMATE_API_HTTPS")]
    pub https: bool,
    /// Path to the certificate file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/climate-api/certs/cert.pem",
        env = "CLIMATE_API_CERT_FILE"
    )]
    pub cert_file: String,
    /// Path to the key file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/climate-api/certs/key.pem",
        env = "CLIMATE_API_KEY_FILE"
    )]
    pub key_file: String,
    /// Maximum time in seconds to wait for requests to complete upon receiving `ctrl+c` signal.
    #[arg(long, default_value_t = 60, env = "CLIMATE_API_SHUTDOWN_TIMEOUT")]
    pub graceful_shutdown_timeout: u64,
    /// Whether to enable sending traces to Jaeger.
    #[arg(long, default_value_t = false, env = "CLIMATE_API_ENABLE_JAEGER")]
    pub enable_jaeger: bool,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
