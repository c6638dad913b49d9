//! Process-level plumbing shared by the service binaries: layered
//! configuration, logging setup and signal handling.

pub mod config;
pub mod logging;
pub mod shutdown;

pub use config::{AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section, ServerConfig};
pub use logging::init_logging_from_config;
pub use shutdown::wait_for_shutdown;
