// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod run;
pub mod stats;
pub mod user;

pub use run::{DistanceCategory, RunRecord, RunType};
pub use stats::{
    CategoryStats, DistanceStats, ParticipationSummary, PersonalRecord, RaceHistory, RunCounts,
};
pub use user::UserProfile;
