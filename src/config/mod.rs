#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, DateRangeArgs, OutputFormat};
pub use toml_config::HotelConfig;
