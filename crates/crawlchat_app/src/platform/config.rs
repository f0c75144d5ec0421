//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use crawlchat_engine::{ClientSettings, ServiceError, DEFAULT_BASE_URL};
use engine_logging::LogDestination;
use log::LevelFilter;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "crawlchat",
    version,
    about = "Ingest websites into a retrieval service and chat about them"
)]
pub struct Cli {
    /// Base URL of the ingest/chat service.
    #[arg(long, env = "CRAWLCHAT_SERVER_URL", default_value = DEFAULT_BASE_URL)]
    pub server_url: String,

    #[arg(long, env = "CRAWLCHAT_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout. Deep crawls can take minutes.
    #[arg(long, env = "CRAWLCHAT_REQUEST_TIMEOUT_SECS", default_value_t = 300)]
    pub request_timeout_secs: u64,

    /// Where log output goes. The terminal is shared with the conversation,
    /// so the default is a file.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    #[arg(long, env = "CRAWLCHAT_LOG_FILE", default_value = "crawlchat.log")]
    pub log_file: PathBuf,

    #[arg(long, value_enum, env = "CRAWLCHAT_LOG_LEVEL", default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    pub fn client_settings(&self) -> Result<ClientSettings, ServiceError> {
        let mut settings = ClientSettings::with_base_url(&self.server_url)?;
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        settings.request_timeout = Duration::from_secs(self.request_timeout_secs);
        Ok(settings)
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogTarget::File => LogDestination::File(self.log_file.clone()),
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both(self.log_file.clone()),
            LogTarget::Off => LogDestination::Off,
        }
    }
}
