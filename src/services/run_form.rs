// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Input boundary for creating and editing runs.
//!
//! A `RunForm` is what the client submits. Converting it into a
//! `RunRecord` is the only place run data is validated; the aggregator
//! trusts whatever reaches it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AppError;
use crate::format::pace_seconds_per_km;
use crate::models::{DistanceCategory, RunRecord, RunType};

/// Raw run input as submitted by the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RunForm {
    pub run_type: RunType,
    pub date: NaiveDate,
    pub distance_category: DistanceCategory,
    /// Only read for `CUSTOM` runs
    #[serde(default)]
    pub custom_distance_km: Option<f64>,
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    #[validate(range(max = 59))]
    pub minutes: u32,
    #[serde(default)]
    #[validate(range(max = 59))]
    pub seconds: u32,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub race_name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[serde(default)]
    pub is_overseas: bool,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub memo: Option<String>,
    #[serde(default)]
    #[validate(length(max = 3), custom(function = "validate_photo_urls"))]
    pub photos: Vec<String>,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

/// Media store URLs are opaque but must be plain http(s) links.
pub(crate) fn is_media_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn validate_photo_urls(photos: &[String]) -> Result<(), ValidationError> {
    if photos.iter().all(|url| is_media_url(url)) {
        Ok(())
    } else {
        Err(ValidationError::new("photo_url"))
    }
}

/// Errors rejecting a submitted run.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Invalid run form: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Run date {0} is in the future")]
    FutureDate(NaiveDate),

    #[error("Race name is required for races")]
    MissingRaceName,

    #[error("City is required for casual runs")]
    MissingCity,

    #[error("Country is required for overseas runs")]
    MissingCountry,

    #[error("Custom distance must be a positive number of kilometers")]
    InvalidDistance,
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Trimmed value, or `None` if blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RunForm {
    pub fn duration_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    fn distance_km(&self) -> Result<f64, FormError> {
        match self.distance_category.canonical_km() {
            Some(km) => Ok(km),
            None => self
                .custom_distance_km
                .filter(|km| km.is_finite() && *km > 0.0)
                .ok_or(FormError::InvalidDistance),
        }
    }

    /// Validate and build a new record.
    ///
    /// `today` is the owner's current date; runs cannot be logged ahead of it.
    pub fn into_record(
        self,
        user_id: &str,
        id: String,
        today: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<RunRecord, FormError> {
        self.validate()?;

        if self.date > today {
            return Err(FormError::FutureDate(self.date));
        }

        let distance_km = self.distance_km()?;
        let duration_seconds = self.duration_seconds();
        let pace = pace_seconds_per_km(distance_km, duration_seconds)
            .ok_or(FormError::InvalidDistance)?;

        let (race_name, location, city, country, is_overseas) = match self.run_type {
            RunType::Race => {
                let name = non_blank(self.race_name).ok_or(FormError::MissingRaceName)?;
                (Some(name), None, None, None, false)
            }
            RunType::Casual => {
                let city = non_blank(self.city).ok_or(FormError::MissingCity)?;
                if self.is_overseas {
                    let country = non_blank(self.country).ok_or(FormError::MissingCountry)?;
                    let location = format!("{}, {}", city, country);
                    (None, Some(location), Some(city), Some(country), true)
                } else {
                    (None, Some(city.clone()), Some(city), None, false)
                }
            }
        };

        Ok(RunRecord {
            id,
            user_id: user_id.to_string(),
            run_type: self.run_type,
            date: self.date,
            distance_category: self.distance_category,
            distance_km,
            duration_seconds,
            pace_seconds_per_km: pace,
            race_name,
            location,
            city,
            country,
            is_overseas,
            memo: non_blank(self.memo),
            photos: self.photos,
            is_public: self.is_public,
            created_at,
        })
    }

    /// Build the full replacement for `existing`, keeping its identity and
    /// creation time.
    pub fn replace(self, existing: &RunRecord, today: NaiveDate) -> Result<RunRecord, FormError> {
        self.into_record(
            &existing.user_id,
            existing.id.clone(),
            today,
            existing.created_at,
        )
    }
}
