use crate::adapters::memory::{insert_entity, remove_entity, replace_entity};
use crate::domain::model::Entity;
use crate::domain::ports::Repository;
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

/// Persists one entity type as a JSON array in a single file.
///
/// Every call re-reads the file, so edits made by other processes between
/// calls are picked up. Each write goes to its own uniquely named temp file
/// next to the target, which is then renamed over it. The mutex only
/// serializes callers inside this process.
#[derive(Debug)]
pub struct JsonFileRepository<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> JsonFileRepository<T>
where
    T: Entity + Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<T>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} does not exist yet, treating as empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&data).map_err(|e| {
            BookingError::repository(format!("{} is not a valid {} list: {}", self.path.display(), T::KIND, e))
        })
    }

    async fn write_all(&self, items: &[T]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&dir).await?;

        let data = serde_json::to_vec_pretty(items)?;
        let path = self.path.clone();
        // 每次寫入使用獨立的暫存檔，再 rename 覆蓋
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(&data)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| BookingError::IoError(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| BookingError::repository(format!("write task failed: {}", e)))??;

        tracing::debug!("Wrote {} {} records to {}", items.len(), T::KIND, self.path.display());
        Ok(())
    }
}

#[async_trait]
impl<T> Repository<T> for JsonFileRepository<T>
where
    T: Entity + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn get_all(&self) -> Result<Vec<T>> {
        self.read_all().await
    }

    async fn get(&self, id: i32) -> Result<T> {
        self.read_all()
            .await?
            .into_iter()
            .find(|e| e.id() == id)
            .ok_or(BookingError::NotFound { entity: T::KIND, id })
    }

    async fn add(&self, entity: T) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.read_all().await?;
        insert_entity(&mut items, entity)?;
        self.write_all(&items).await
    }

    async fn edit(&self, entity: T) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.read_all().await?;
        replace_entity(&mut items, entity)?;
        self.write_all(&items).await
    }

    async fn remove(&self, id: i32) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.read_all().await?;
        remove_entity(&mut items, id)?;
        self.write_all(&items).await
    }
}
