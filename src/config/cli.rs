use crate::config::toml_config::HotelConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "hotel-booking")]
#[command(about = "Find free rooms, report fully booked days and record bookings")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the data directory from the config file
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct DateRangeArgs {
    /// First night (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Last night, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all rooms
    Rooms,
    /// Add a room to the inventory
    AddRoom {
        #[arg(long)]
        description: String,
        /// Explicit id; the next free id is used otherwise
        #[arg(long)]
        id: Option<i32>,
    },
    /// Find the first room free for the whole range
    Find(DateRangeArgs),
    /// List the days on which every room is booked
    Occupied {
        #[command(flatten)]
        range: DateRangeArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Book the first free room for the range
    Book(DateRangeArgs),
    /// List bookings
    Bookings {
        /// Include cancelled bookings
        #[arg(long)]
        all: bool,
    },
    /// Cancel a booking (it stays on file as inactive)
    Cancel {
        #[arg(long)]
        id: i32,
    },
}

impl CliConfig {
    /// Loads the TOML file (if any), applies command line overrides and validates the result.
    pub fn resolve(&self) -> Result<HotelConfig> {
        let mut config = match &self.config {
            Some(path) => HotelConfig::from_file(path)?,
            None => HotelConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            tracing::debug!("Data directory overridden to: {}", dir);
            config.storage.data_dir = dir.clone();
        }
        if self.json_logs {
            config.logging.json = true;
        }

        config.validate()?;
        Ok(config)
    }
}
