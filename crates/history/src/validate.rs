use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::is_real_date;

pub const MIN_YEAR: i32 = 1900;

/// Input rejected before anything is written. The message is meant for the
/// user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingCarFields,

    #[error("Please enter a valid production year.")]
    InvalidYear,

    #[error("Please select a car.")]
    NoCarSelected,

    #[error("Car not found: {0}")]
    UnknownCar(String),

    #[error("Enter a valid date in DD-MM-YYYY format.")]
    InvalidDate,

    #[error("Enter a valid mileage (digits only).")]
    InvalidMileage,

    #[error("Please describe the work performed.")]
    MissingWorks,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CarDraft {
    #[serde(default)]
    pub vin: String,
    #[serde(default)]
    pub plate: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub features: Option<String>,
}

/// Preset entries offered by the "works performed" picker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorksPreset {
    #[default]
    EngineOilChange,
    FluidsChange,
    FiltersChange,
    ScheduledMaintenance,
}

impl WorksPreset {
    pub const ALL: [WorksPreset; 4] = [
        WorksPreset::EngineOilChange,
        WorksPreset::FluidsChange,
        WorksPreset::FiltersChange,
        WorksPreset::ScheduledMaintenance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorksPreset::EngineOilChange => "Engine oil change",
            WorksPreset::FluidsChange => "Fluids change",
            WorksPreset::FiltersChange => "Filters change",
            WorksPreset::ScheduledMaintenance => "Scheduled maintenance",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorksChoice {
    Preset(WorksPreset),
    Manual(String),
}

impl Default for WorksChoice {
    fn default() -> Self {
        WorksChoice::Preset(WorksPreset::default())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceDraft {
    #[serde(default)]
    pub car_id: String,
    #[serde(default)]
    pub date: String,             // DD-MM-YYYY
    #[serde(default)]
    pub mileage: String,
    #[serde(default)]
    pub works: WorksChoice,
    #[serde(default)]
    pub parts: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

pub fn validate_car(draft: &CarDraft, today: NaiveDate) -> Result<i32, ValidationError> {
    let required = [&draft.vin, &draft.plate, &draft.brand, &draft.model, &draft.year];
    if required.iter().any(|f| f.trim().is_empty()) {
        return Err(ValidationError::MissingCarFields);
    }
    let year: i32 = draft.year.trim().parse().map_err(|_| ValidationError::InvalidYear)?;
    if !(MIN_YEAR..=today.year() + 1).contains(&year) {
        return Err(ValidationError::InvalidYear);
    }
    Ok(year)
}

pub fn is_valid_mileage(mileage: &str) -> bool {
    !mileage.is_empty() && mileage.bytes().all(|b| b.is_ascii_digit())
}

/// Checks run in form order; the first failure wins. Returns the works text
/// to store.
pub fn validate_service(draft: &ServiceDraft) -> Result<String, ValidationError> {
    if draft.car_id.is_empty() {
        return Err(ValidationError::NoCarSelected);
    }
    if !is_real_date(&draft.date) {
        return Err(ValidationError::InvalidDate);
    }
    if !is_valid_mileage(&draft.mileage) {
        return Err(ValidationError::InvalidMileage);
    }
    match &draft.works {
        WorksChoice::Preset(p) => Ok(p.label().to_string()),
        WorksChoice::Manual(text) if text.trim().is_empty() => Err(ValidationError::MissingWorks),
        WorksChoice::Manual(text) => Ok(text.clone()),
    }
}
