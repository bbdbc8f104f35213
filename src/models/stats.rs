//! Aggregated run statistics returned by the record aggregator.
//!
//! These are recomputed from the owner's run records on every request;
//! nothing here is persisted.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::format::format_improvement;
use crate::models::{DistanceCategory, RunRecord};

/// Fastest run within one distance category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PersonalRecord {
    pub category: DistanceCategory,
    pub record: RunRecord,
}

/// All races sharing one race name and distance category.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RaceHistory {
    pub race_name: String,
    pub distance_category: DistanceCategory,
    /// Most recent first
    pub all_records: Vec<RunRecord>,
    pub latest_record: RunRecord,
    pub best_record: RunRecord,
    pub count: u32,
    /// previous - latest; positive means the latest run was faster
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub improvement_seconds: Option<i64>,
}

impl RaceHistory {
    /// "↑M:SS" / "↓M:SS", or `None` when there is nothing to compare
    /// or the times are identical.
    pub fn improvement_label(&self) -> Option<String> {
        match self.improvement_seconds {
            Some(delta) if delta != 0 => Some(format_improvement(delta)),
            _ => None,
        }
    }

    /// Whether the personal best for this race is an older run.
    pub fn best_is_not_latest(&self) -> bool {
        self.best_record.id != self.latest_record.id
    }
}

/// Statistics for one recorded distance category.
///
/// `count == 0` marks a category the user has not run yet; `best` and
/// `average_seconds` are `None` in that case.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CategoryStats {
    pub category: DistanceCategory,
    pub count: u32,
    pub best: Option<RunRecord>,
    /// Mean duration rounded to the nearest second
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub average_seconds: Option<u64>,
    /// Most recent first
    pub all_runs: Vec<RunRecord>,
}

impl CategoryStats {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Participation counts per recorded category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ParticipationSummary {
    pub five_k: u32,
    pub ten_k: u32,
    pub half: u32,
    pub full: u32,
    pub total: u32,
}

impl ParticipationSummary {
    /// Count one run in `category`. Custom runs are ignored.
    pub fn add(&mut self, category: DistanceCategory) {
        let slot = match category {
            DistanceCategory::FiveK => &mut self.five_k,
            DistanceCategory::TenK => &mut self.ten_k,
            DistanceCategory::Half => &mut self.half,
            DistanceCategory::Full => &mut self.full,
            DistanceCategory::Custom => return,
        };
        *slot += 1;
        self.total += 1;
    }

    pub fn get(&self, category: DistanceCategory) -> u32 {
        match category {
            DistanceCategory::FiveK => self.five_k,
            DistanceCategory::TenK => self.ten_k,
            DistanceCategory::Half => self.half,
            DistanceCategory::Full => self.full,
            DistanceCategory::Custom => 0,
        }
    }
}

/// Per-category statistics plus the flat participation summary.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DistanceStats {
    /// Always one entry per recorded category, in `DistanceCategory::RECORDED` order
    pub categories: Vec<CategoryStats>,
    pub participation: ParticipationSummary,
}

/// Headline counts shown on the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunCounts {
    pub race_count: u32,
    pub casual_count: u32,
    pub has_full_marathon: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participation_ignores_custom() {
        let mut summary = ParticipationSummary::default();
        summary.add(DistanceCategory::FiveK);
        summary.add(DistanceCategory::FiveK);
        summary.add(DistanceCategory::Full);
        summary.add(DistanceCategory::Custom);

        assert_eq!(summary.five_k, 2);
        assert_eq!(summary.full, 1);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.get(DistanceCategory::Custom), 0);
    }
}
