use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// A forward-looking range: starts strictly after `today` and does not end before it starts.
pub fn validate_booking_range(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Result<()> {
    if start <= today {
        return Err(BookingError::invalid_argument(format!(
            "start date {} must be later than today ({})",
            start, today
        )));
    }
    validate_report_range(start, end)
}

pub fn validate_report_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(BookingError::invalid_argument(format!(
            "start date {} cannot be later than end date {}",
            start, end
        )));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_id(field_name: &str, id: i32) -> Result<()> {
    if id < 1 {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: id.to_string(),
            reason: "Id must be at least 1".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique_ids(field_name: &str, ids: &[i32]) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(*id) {
            return Err(BookingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: id.to_string(),
                reason: "Duplicate id".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}
