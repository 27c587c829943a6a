pub mod availability;
pub mod booking_manager;

pub use crate::domain::model::{Booking, BookingId, Entity, Room, RoomId};
pub use crate::domain::ports::{BookingService, Clock, Repository};
pub use crate::utils::error::Result;
