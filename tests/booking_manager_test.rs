use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use hotel_booking::{
    Booking, BookingError, BookingManager, BookingService, FixedClock, InMemoryRepository, Repository, Result, Room,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Wraps an in-memory store and records every `add` and `get_all` call.
struct RecordingRepository<T> {
    inner: InMemoryRepository<T>,
    added: Mutex<Vec<T>>,
    get_all_calls: AtomicUsize,
    fail_with: Option<&'static str>,
}

impl<T: Clone> RecordingRepository<T> {
    fn with_items(items: Vec<T>) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryRepository::with_items(items),
            added: Mutex::new(Vec::new()),
            get_all_calls: AtomicUsize::new(0),
            fail_with: None,
        })
    }

    fn failing(message: &'static str) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryRepository::new(),
            added: Mutex::new(Vec::new()),
            get_all_calls: AtomicUsize::new(0),
            fail_with: Some(message),
        })
    }

    fn added(&self) -> Vec<T> {
        self.added.lock().unwrap().clone()
    }

    fn get_all_calls(&self) -> usize {
        self.get_all_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T> Repository<T> for RecordingRepository<T>
where
    T: hotel_booking::Entity + Clone + Send + Sync + 'static,
{
    async fn get_all(&self) -> Result<Vec<T>> {
        self.get_all_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_with {
            return Err(BookingError::repository(message));
        }
        self.inner.get_all().await
    }

    async fn get(&self, id: i32) -> Result<T> {
        self.inner.get(id).await
    }

    async fn add(&self, entity: T) -> Result<()> {
        self.added.lock().unwrap().push(entity.clone());
        self.inner.add(entity).await
    }

    async fn edit(&self, entity: T) -> Result<()> {
        self.inner.edit(entity).await
    }

    async fn remove(&self, id: i32) -> Result<()> {
        self.inner.remove(id).await
    }
}

type TestManager =
    BookingManager<Arc<RecordingRepository<Booking>>, Arc<RecordingRepository<Room>>, FixedClock>;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn today() -> NaiveDate {
    date("2025-04-01")
}

fn days_from_today(n: u64) -> NaiveDate {
    today().checked_add_days(Days::new(n)).unwrap()
}

fn active(room_id: i32, start: NaiveDate, end: NaiveDate) -> Booking {
    Booking {
        id: 0,
        room_id,
        start_date: start,
        end_date: end,
        is_active: true,
    }
}

fn setup(
    rooms: Vec<Room>,
    bookings: Vec<Booking>,
) -> (TestManager, Arc<RecordingRepository<Booking>>, Arc<RecordingRepository<Room>>) {
    let booking_repo = RecordingRepository::with_items(bookings);
    let room_repo = RecordingRepository::with_items(rooms);
    let manager = BookingManager::with_clock(booking_repo.clone(), room_repo.clone(), FixedClock(today()));
    (manager, booking_repo, room_repo)
}

fn two_rooms() -> Vec<Room> {
    vec![Room::new(1, "Room A"), Room::new(2, "Room B")]
}

// Rooms 1 and 2, both taken from day 10 to day 20.
fn fully_booked_fixture() -> (TestManager, Arc<RecordingRepository<Booking>>, Arc<RecordingRepository<Room>>) {
    setup(
        two_rooms(),
        vec![
            Booking {
                id: 1,
                ..active(1, days_from_today(10), days_from_today(20))
            },
            Booking {
                id: 2,
                ..active(2, days_from_today(10), days_from_today(20))
            },
        ],
    )
}

#[tokio::test]
async fn test_find_available_room_start_date_not_in_future_is_invalid_argument() {
    let (manager, bookings, rooms) = setup(two_rooms(), vec![]);

    for d in [today(), date("2025-01-10"), date("2020-02-29")] {
        let err = manager.find_available_room(d, d).await.unwrap_err();
        assert!(err.is_invalid_argument(), "{} should be rejected", d);
    }

    // 驗證失敗時不可讀取任何 repository
    assert_eq!(bookings.get_all_calls(), 0);
    assert_eq!(rooms.get_all_calls(), 0);
}

#[tokio::test]
async fn test_find_available_room_start_after_end_is_invalid_argument() {
    let (manager, _, _) = setup(two_rooms(), vec![]);
    let err = manager
        .find_available_room(days_from_today(5), days_from_today(4))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_find_available_room_tomorrow_returns_room() {
    let (manager, _, _) = fully_booked_fixture();
    let tomorrow = days_from_today(1);
    let room_id = manager.find_available_room(tomorrow, tomorrow).await.unwrap();
    assert_eq!(room_id, Some(1));
}

#[tokio::test]
async fn test_find_available_room_returned_room_has_no_overlapping_booking() {
    let (manager, booking_repo, _) = setup(
        two_rooms(),
        vec![active(1, days_from_today(4), days_from_today(8))],
    );
    let (start, end) = (days_from_today(6), days_from_today(12));

    let room_id = manager.find_available_room(start, end).await.unwrap().unwrap();
    assert_eq!(room_id, 2);

    let clashes: Vec<_> = booking_repo
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .filter(|b| b.room_id == room_id && b.is_active && b.start_date <= end && b.end_date >= start)
        .collect();
    assert!(clashes.is_empty());
}

#[tokio::test]
async fn test_find_available_room_same_day_and_multi_day_ranges() {
    let (manager, _, _) = setup(two_rooms(), vec![active(1, days_from_today(4), days_from_today(8))]);

    for (start, end) in [(days_from_today(9), days_from_today(14)), (days_from_today(9), days_from_today(9))] {
        let room_id = manager.find_available_room(start, end).await.unwrap();
        assert!(room_id.is_some());
    }
}

#[tokio::test]
async fn test_find_available_room_fully_booked_range_returns_none() {
    let (manager, _, _) = fully_booked_fixture();
    // Touches the first booked day only.
    let result = manager
        .find_available_room(days_from_today(5), days_from_today(10))
        .await
        .unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn test_find_available_room_ignores_cancelled_booking() {
    let mut cancelled = active(1, days_from_today(2), days_from_today(6));
    cancelled.is_active = false;
    let (manager, _, _) = setup(vec![Room::new(1, "Only room")], vec![cancelled]);

    let result = manager
        .find_available_room(days_from_today(3), days_from_today(4))
        .await
        .unwrap();
    assert_eq!(result, Some(1));
}

#[tokio::test]
async fn test_get_fully_occupied_dates_returns_both_booked_days() {
    let (manager, _, _) = setup(
        two_rooms(),
        vec![
            active(1, date("2025-05-05"), date("2025-05-06")),
            active(2, date("2025-05-05"), date("2025-05-06")),
        ],
    );

    let dates = manager
        .get_fully_occupied_dates(date("2025-05-01"), date("2025-05-10"))
        .await
        .unwrap();
    assert_eq!(dates, vec![date("2025-05-05"), date("2025-05-06")]);

    let dates = manager
        .get_fully_occupied_dates(date("2025-06-01"), date("2025-06-05"))
        .await
        .unwrap();
    assert!(dates.is_empty());
}

#[tokio::test]
async fn test_get_fully_occupied_dates_is_ascending_and_within_range() {
    let (manager, _, _) = fully_booked_fixture();
    let (start, end) = (days_from_today(15), days_from_today(30));

    let dates = manager.get_fully_occupied_dates(start, end).await.unwrap();

    assert_eq!(dates.len(), 6);
    assert_eq!(dates.first(), Some(&start));
    assert_eq!(dates.last(), Some(&days_from_today(20)));
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert!(dates.iter().all(|d| *d >= start && *d <= end));
}

#[tokio::test]
async fn test_get_fully_occupied_dates_without_rooms_is_empty() {
    let (manager, _, _) = setup(vec![], vec![active(1, date("2025-05-05"), date("2025-05-06"))]);
    let dates = manager
        .get_fully_occupied_dates(date("2025-05-01"), date("2025-05-10"))
        .await
        .unwrap();
    assert!(dates.is_empty());
}

#[tokio::test]
async fn test_create_booking_with_free_room_adds_exactly_once() {
    let (manager, booking_repo, _) = setup(vec![Room::new(1, "Only room")], vec![]);
    let (start, end) = (days_from_today(2), days_from_today(5));

    let expected_room = manager.find_available_room(start, end).await.unwrap();
    let created = manager.create_booking(Booking::request(start, end)).await.unwrap();

    assert!(created);
    let added = booking_repo.added();
    assert_eq!(added.len(), 1);
    assert_eq!(Some(added[0].room_id), expected_room);
    assert!(added[0].is_active);
    assert_eq!((added[0].start_date, added[0].end_date), (start, end));
}

#[tokio::test]
async fn test_create_booking_without_rooms_returns_false_and_adds_nothing() {
    let (manager, booking_repo, _) = setup(vec![], vec![]);

    let created = manager
        .create_booking(Booking::request(days_from_today(2), days_from_today(5)))
        .await
        .unwrap();

    assert!(!created);
    assert!(booking_repo.added().is_empty());
}

#[tokio::test]
async fn test_create_booking_fills_rooms_in_order_then_refuses() {
    let (manager, booking_repo, _) = setup(two_rooms(), vec![]);
    let (start, end) = (days_from_today(3), days_from_today(4));

    assert!(manager.create_booking(Booking::request(start, end)).await.unwrap());
    assert!(manager.create_booking(Booking::request(start, end)).await.unwrap());
    assert!(!manager.create_booking(Booking::request(start, end)).await.unwrap());

    let rooms: Vec<_> = booking_repo.added().iter().map(|b| b.room_id).collect();
    assert_eq!(rooms, vec![1, 2]);

    let dates = manager.get_fully_occupied_dates(start, end).await.unwrap();
    assert_eq!(dates, vec![start, end]);
}

#[tokio::test]
async fn test_create_booking_invalid_range_surfaces_error() {
    let (manager, booking_repo, _) = setup(vec![Room::new(1, "Only room")], vec![]);

    let err = manager
        .create_booking(Booking::request(today(), days_from_today(3)))
        .await
        .unwrap_err();

    assert!(err.is_invalid_argument());
    assert!(booking_repo.added().is_empty());
}

#[tokio::test]
async fn test_repository_failure_propagates_unchanged() {
    let booking_repo = RecordingRepository::<Booking>::failing("connection refused");
    let room_repo = RecordingRepository::with_items(two_rooms());
    let manager = BookingManager::with_clock(booking_repo.clone(), room_repo, FixedClock(today()));

    let err = manager
        .create_booking(Booking::request(days_from_today(2), days_from_today(3)))
        .await
        .unwrap_err();

    match err {
        BookingError::RepositoryError { message } => assert_eq!(message, "connection refused"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(booking_repo.added().is_empty());
}

#[tokio::test]
async fn test_manager_behind_trait_object() {
    let (manager, _, _) = setup(two_rooms(), vec![]);
    let service: Arc<dyn BookingService> = Arc::new(manager);

    let room = service
        .find_available_room(days_from_today(1), days_from_today(2))
        .await
        .unwrap();
    assert_eq!(room, Some(1));
}
