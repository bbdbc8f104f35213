// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run record model for storage and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Whether a run was an organized race or a casual run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RunType {
    Race,
    Casual,
}

/// Distance category of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum DistanceCategory {
    #[serde(rename = "5K")]
    FiveK,
    #[serde(rename = "10K")]
    TenK,
    #[serde(rename = "HALF")]
    Half,
    #[serde(rename = "FULL")]
    Full,
    #[serde(rename = "CUSTOM")]
    Custom,
}

impl DistanceCategory {
    /// Categories that take part in record keeping, in display order.
    pub const RECORDED: [DistanceCategory; 4] = [
        DistanceCategory::FiveK,
        DistanceCategory::TenK,
        DistanceCategory::Half,
        DistanceCategory::Full,
    ];

    /// Canonical distance in kilometers, `None` for custom distances.
    pub fn canonical_km(self) -> Option<f64> {
        match self {
            DistanceCategory::FiveK => Some(5.0),
            DistanceCategory::TenK => Some(10.0),
            DistanceCategory::Half => Some(21.1),
            DistanceCategory::Full => Some(42.195),
            DistanceCategory::Custom => None,
        }
    }

    pub fn is_recorded(self) -> bool {
        self != DistanceCategory::Custom
    }

    /// Wire name ("5K", "HALF", ...).
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceCategory::FiveK => "5K",
            DistanceCategory::TenK => "10K",
            DistanceCategory::Half => "HALF",
            DistanceCategory::Full => "FULL",
            DistanceCategory::Custom => "CUSTOM",
        }
    }

    /// Short label shown next to a run: "HALF", "FULL" or "<km>km".
    pub fn label(self, distance_km: f64) -> String {
        match self {
            DistanceCategory::Half | DistanceCategory::Full => self.as_str().to_string(),
            _ => format!("{}km", distance_km),
        }
    }
}

/// Stored run record in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunRecord {
    /// Document ID (UUID assigned on creation)
    pub id: String,
    /// Owner identity
    pub user_id: String,
    pub run_type: RunType,
    /// Calendar date of the run
    pub date: NaiveDate,
    pub distance_category: DistanceCategory,
    pub distance_km: f64,
    /// Total elapsed time
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration_seconds: u64,
    /// Derived at entry time, never recomputed
    pub pace_seconds_per_km: f64,
    /// Race runs only
    #[serde(default)]
    pub race_name: Option<String>,
    /// Casual runs only: "city" or "city, country"
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub is_overseas: bool,
    #[serde(default)]
    pub memo: Option<String>,
    /// Media store URLs (at most 3)
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default = "default_public")]
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

fn default_public() -> bool {
    true
}

impl RunRecord {
    pub fn race_name_or_empty(&self) -> &str {
        self.race_name.as_deref().unwrap_or("")
    }

    pub fn location_or_empty(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    pub fn city_or_empty(&self) -> &str {
        self.city.as_deref().unwrap_or("")
    }

    pub fn distance_label(&self) -> String {
        self.distance_category.label(self.distance_km)
    }
}
