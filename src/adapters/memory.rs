use crate::domain::model::Entity;
use crate::domain::ports::Repository;
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Keeps entities in insertion order behind a tokio `RwLock`.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    items: RwLock<Vec<T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn next_id<T: Entity>(items: &[T]) -> Result<i32> {
    items
        .iter()
        .map(Entity::id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| BookingError::repository(format!("{} id space exhausted", T::KIND)))
}

pub(crate) fn insert_entity<T: Entity>(items: &mut Vec<T>, mut entity: T) -> Result<i32> {
    if entity.id() == 0 {
        entity.set_id(next_id(items.as_slice())?);
    } else if items.iter().any(|e| e.id() == entity.id()) {
        return Err(BookingError::repository(format!(
            "{} with id {} already exists",
            T::KIND,
            entity.id()
        )));
    }
    let id = entity.id();
    items.push(entity);
    Ok(id)
}

pub(crate) fn replace_entity<T: Entity>(items: &mut [T], entity: T) -> Result<()> {
    let id = entity.id();
    let slot = items
        .iter_mut()
        .find(|e| e.id() == id)
        .ok_or(BookingError::NotFound { entity: T::KIND, id })?;
    *slot = entity;
    Ok(())
}

pub(crate) fn remove_entity<T: Entity>(items: &mut Vec<T>, id: i32) -> Result<()> {
    let pos = items
        .iter()
        .position(|e| e.id() == id)
        .ok_or(BookingError::NotFound { entity: T::KIND, id })?;
    items.remove(pos);
    Ok(())
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Entity + Clone + Send + Sync + 'static,
{
    async fn get_all(&self) -> Result<Vec<T>> {
        Ok(self.items.read().await.clone())
    }

    async fn get(&self, id: i32) -> Result<T> {
        self.items
            .read()
            .await
            .iter()
            .find(|e| e.id() == id)
            .cloned()
            .ok_or(BookingError::NotFound { entity: T::KIND, id })
    }

    async fn add(&self, entity: T) -> Result<()> {
        let mut items = self.items.write().await;
        let id = insert_entity(&mut *items, entity)?;
        tracing::debug!("Stored {} {} in memory", T::KIND, id);
        Ok(())
    }

    async fn edit(&self, entity: T) -> Result<()> {
        replace_entity(&mut *self.items.write().await, entity)
    }

    async fn remove(&self, id: i32) -> Result<()> {
        remove_entity(&mut *self.items.write().await, id)
    }
}
