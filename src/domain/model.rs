use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type RoomId = i32;
pub type BookingId = i32;

/// Anything a repository stores. An id of `0` means "not yet assigned".
pub trait Entity {
    const KIND: &'static str;

    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub description: String,
}

impl Room {
    pub fn new(id: RoomId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}

// Both ends of a booking are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default)]
    pub id: BookingId,
    #[serde(default)]
    pub room_id: RoomId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
}

impl Booking {
    /// A booking request: dates only, no room, not yet active.
    pub fn request(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: 0,
            room_id: 0,
            start_date,
            end_date,
            is_active: false,
        }
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

impl Entity for Room {
    const KIND: &'static str = "room";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl Entity for Booking {
    const KIND: &'static str = "booking";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}
