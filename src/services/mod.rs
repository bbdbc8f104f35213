// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod feed;
pub mod records;
pub mod rotation;
pub mod run_form;

pub use feed::{FeedFilter, FilterType};
pub use records::{distance_stats, personal_records, race_histories, run_counts};
pub use rotation::RecordRotation;
pub use run_form::{FormError, RunForm};
