use crate::domain::model::Room;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_positive_id, validate_unique_ids, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotelConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Rooms inserted when the room store is empty.
    #[serde(default)]
    pub rooms: Vec<RoomConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    pub rooms_file: Option<String>,
    pub bookings_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    pub id: i32,
    pub description: String,
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            rooms_file: None,
            bookings_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl From<&RoomConfig> for Room {
    fn from(r: &RoomConfig) -> Self {
        Room::new(r.id, r.description.clone())
    }
}

impl HotelConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, |name| std::env::var(name).ok())
    }

    /// 同上，但變數值由 `lookup` 提供
    pub fn from_toml_str_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let processed_content = Self::substitute_vars(content, lookup)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換變數 (例如 ${HOTEL_DATA_DIR})，未設定的變數保留原樣
    fn substitute_vars<F>(content: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        if let Some(file) = &self.storage.rooms_file {
            validate_path("storage.rooms_file", file)?;
        }
        if let Some(file) = &self.storage.bookings_file {
            validate_path("storage.bookings_file", file)?;
        }

        validate_one_of(
            "logging.level",
            &self.logging.level,
            &["trace", "debug", "info", "warn", "error"],
        )?;

        for room in &self.rooms {
            validate_positive_id("rooms.id", room.id)?;
            validate_non_empty_string("rooms.description", &room.description)?;
        }
        let ids: Vec<i32> = self.rooms.iter().map(|r| r.id).collect();
        validate_unique_ids("rooms.id", &ids)?;

        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        Path::new(&self.storage.data_dir)
    }

    pub fn rooms_path(&self) -> PathBuf {
        self.data_dir()
            .join(self.storage.rooms_file.as_deref().unwrap_or("rooms.json"))
    }

    pub fn bookings_path(&self) -> PathBuf {
        self.data_dir()
            .join(self.storage.bookings_file.as_deref().unwrap_or("bookings.json"))
    }

    pub fn seed_rooms(&self) -> Vec<Room> {
        self.rooms.iter().map(Room::from).collect()
    }
}

impl Validate for HotelConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
