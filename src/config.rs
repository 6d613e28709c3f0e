//! CLI configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::cli::Command;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Storage settings.
#[derive(Debug, Args)]
pub(crate) struct StorageConfig {
    /// Directory holding the saved cart and the session flags
    #[arg(long, env = "COMPTOIR_DATA_DIR", default_value = ".comptoir", global = true)]
    pub data_dir: PathBuf,

    /// Catalog file to use instead of the built-in catalog
    #[arg(long, env = "COMPTOIR_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,
}

impl StorageConfig {
    /// Directory of the durable cart collections.
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    /// Directory of the session-scoped flags.
    pub fn session_dir(&self) -> PathBuf {
        self.data_dir.join("session")
    }
}

/// Comptoir configuration
#[derive(Debug, Parser)]
#[command(name = "comptoir", about = "HSB CBD shop: catalog, pricing and cart", long_about = None)]
pub(crate) struct AppConfig {
    /// Storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn data_dir_splits_store_and_session() -> TestResult {
        let config = AppConfig::try_parse_from(["comptoir", "--data-dir", "/tmp/shop", "age", "status"])?;

        assert_eq!(config.storage.store_dir(), PathBuf::from("/tmp/shop/store"));
        assert_eq!(config.storage.session_dir(), PathBuf::from("/tmp/shop/session"));

        Ok(())
    }

    #[test]
    fn global_options_follow_subcommands() -> TestResult {
        let config = AppConfig::try_parse_from([
            "comptoir",
            "cart",
            "show",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])?;

        assert!(matches!(config.logging.log_format, LogFormat::Json));
        assert_eq!(config.logging.log_level, "debug");

        Ok(())
    }
}
