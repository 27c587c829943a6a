use crate::domain::model::{Booking, RoomId};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

/// Storage collaborator for one entity type.
#[async_trait]
pub trait Repository<T: Send + 'static>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<T>>;
    async fn get(&self, id: i32) -> Result<T>;
    /// Assigns an id when the entity still has id `0`.
    async fn add(&self, entity: T) -> Result<()>;
    async fn edit(&self, entity: T) -> Result<()>;
    async fn remove(&self, id: i32) -> Result<()>;
}

#[async_trait]
impl<T, R> Repository<T> for Arc<R>
where
    T: Send + 'static,
    R: Repository<T> + ?Sized,
{
    async fn get_all(&self) -> Result<Vec<T>> {
        (**self).get_all().await
    }

    async fn get(&self, id: i32) -> Result<T> {
        (**self).get(id).await
    }

    async fn add(&self, entity: T) -> Result<()> {
        (**self).add(entity).await
    }

    async fn edit(&self, entity: T) -> Result<()> {
        (**self).edit(entity).await
    }

    async fn remove(&self, id: i32) -> Result<()> {
        (**self).remove(id).await
    }
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[async_trait]
pub trait BookingService: Send + Sync {
    /// `Ok(None)` means the range is valid but every room is taken.
    async fn find_available_room(&self, start: NaiveDate, end: NaiveDate) -> Result<Option<RoomId>>;
    async fn get_fully_occupied_dates(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>>;
    async fn create_booking(&self, booking: Booking) -> Result<bool>;
}
