//! Availability and occupancy rules over in-memory snapshots.
//!
//! Nothing here touches a repository, so every rule can be checked against
//! plain slices of rooms and bookings.

use crate::domain::model::{Booking, Room, RoomId};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Inclusive interval overlap.
pub fn overlaps(booking: &Booking, start: NaiveDate, end: NaiveDate) -> bool {
    booking.start_date <= end && booking.end_date >= start
}

pub fn active_bookings(bookings: &[Booking]) -> impl Iterator<Item = &Booking> {
    bookings.iter().filter(|b| b.is_active)
}

pub fn is_room_free(room_id: RoomId, bookings: &[Booking], start: NaiveDate, end: NaiveDate) -> bool {
    !active_bookings(bookings).any(|b| b.room_id == room_id && overlaps(b, start, end))
}

/// First room, in the given order, with no active booking overlapping `[start, end]`.
pub fn first_available_room(
    rooms: &[Room],
    bookings: &[Booking],
    start: NaiveDate,
    end: NaiveDate,
) -> Option<RoomId> {
    rooms
        .iter()
        .find(|room| is_room_free(room.id, bookings, start, end))
        .map(|room| room.id)
}

/// Number of distinct rooms in `room_ids` that an active booking covers on `date`.
pub fn occupied_room_count(room_ids: &HashSet<RoomId>, bookings: &[Booking], date: NaiveDate) -> usize {
    active_bookings(bookings)
        .filter(|b| b.covers(date) && room_ids.contains(&b.room_id))
        .map(|b| b.room_id)
        .collect::<HashSet<_>>()
        .len()
}

/// Every day from `start` to `end`, both included. Empty when `start > end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

pub fn fully_occupied_dates(
    rooms: &[Room],
    bookings: &[Booking],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<NaiveDate> {
    let room_ids: HashSet<RoomId> = rooms.iter().map(|r| r.id).collect();
    if room_ids.is_empty() {
        return Vec::new();
    }

    date_range(start, end)
        .filter(|d| occupied_room_count(&room_ids, bookings, *d) == room_ids.len())
        .collect()
}
