pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::HotelConfig;

pub use adapters::{FixedClock, InMemoryRepository, JsonFileRepository, SystemClock};
pub use core::booking_manager::BookingManager;
pub use domain::model::{Booking, BookingId, Entity, Room, RoomId};
pub use domain::ports::{BookingService, Clock, Repository};
pub use utils::error::{BookingError, Result};
