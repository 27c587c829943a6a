use crate::adapters::clock::SystemClock;
use crate::core::availability;
use crate::domain::model::{Booking, Room, RoomId};
use crate::domain::ports::{BookingService, Clock, Repository};
use crate::utils::error::Result;
use crate::utils::validation::{validate_booking_range, validate_report_range};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Decides availability and occupancy from repository snapshots.
///
/// Holds no state of its own beyond its collaborators. Check-then-add in
/// [`BookingService::create_booking`] is not atomic across callers.
pub struct BookingManager<B, R, C = SystemClock> {
    booking_repo: B,
    room_repo: R,
    clock: C,
}

impl<B, R> BookingManager<B, R, SystemClock>
where
    B: Repository<Booking>,
    R: Repository<Room>,
{
    pub fn new(booking_repo: B, room_repo: R) -> Self {
        Self::with_clock(booking_repo, room_repo, SystemClock)
    }
}

impl<B, R, C> BookingManager<B, R, C>
where
    B: Repository<Booking>,
    R: Repository<Room>,
    C: Clock,
{
    pub fn with_clock(booking_repo: B, room_repo: R, clock: C) -> Self {
        Self {
            booking_repo,
            room_repo,
            clock,
        }
    }

    pub fn booking_repository(&self) -> &B {
        &self.booking_repo
    }

    pub fn room_repository(&self) -> &R {
        &self.room_repo
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// 讀取所有房間與有效訂單
    async fn load_snapshot(&self) -> Result<(Vec<Room>, Vec<Booking>)> {
        let rooms = self.room_repo.get_all().await?;
        let bookings: Vec<Booking> = self
            .booking_repo
            .get_all()
            .await?
            .into_iter()
            .filter(|b| b.is_active)
            .collect();

        tracing::debug!(
            "Loaded {} rooms and {} active bookings",
            rooms.len(),
            bookings.len()
        );
        Ok((rooms, bookings))
    }

    async fn find_room(&self, start: NaiveDate, end: NaiveDate) -> Result<Option<RoomId>> {
        validate_booking_range(start, end, self.clock.today())?;

        let (rooms, bookings) = self.load_snapshot().await?;
        let room = availability::first_available_room(&rooms, &bookings, start, end);

        match room {
            Some(id) => tracing::debug!("Room {} is free from {} to {}", id, start, end),
            None => tracing::debug!("No room is free from {} to {}", start, end),
        }
        Ok(room)
    }
}

#[async_trait]
impl<B, R, C> BookingService for BookingManager<B, R, C>
where
    B: Repository<Booking>,
    R: Repository<Room>,
    C: Clock,
{
    async fn find_available_room(&self, start: NaiveDate, end: NaiveDate) -> Result<Option<RoomId>> {
        self.find_room(start, end).await
    }

    async fn get_fully_occupied_dates(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
        validate_report_range(start, end)?;

        let (rooms, bookings) = self.load_snapshot().await?;
        let dates = availability::fully_occupied_dates(&rooms, &bookings, start, end);

        tracing::debug!(
            "{} fully occupied dates between {} and {}",
            dates.len(),
            start,
            end
        );
        Ok(dates)
    }

    async fn create_booking(&self, mut booking: Booking) -> Result<bool> {
        let Some(room_id) = self.find_room(booking.start_date, booking.end_date).await? else {
            tracing::warn!(
                "Booking from {} to {} rejected: no room available",
                booking.start_date,
                booking.end_date
            );
            return Ok(false);
        };

        booking.room_id = room_id;
        booking.is_active = true;
        let (start, end) = (booking.start_date, booking.end_date);
        self.booking_repo.add(booking).await?;

        tracing::info!("Booked room {} from {} to {}", room_id, start, end);
        Ok(true)
    }
}
