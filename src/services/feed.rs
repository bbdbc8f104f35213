// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Feed filtering: run type tabs plus free-text search.

use serde::Deserialize;

use crate::models::{RunRecord, RunType};

/// Which runs the feed shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    All,
    Race,
    Casual,
}

impl FilterType {
    fn accepts(self, run_type: RunType) -> bool {
        match self {
            FilterType::All => true,
            FilterType::Race => run_type == RunType::Race,
            FilterType::Casual => run_type == RunType::Casual,
        }
    }
}

/// Feed filter parameters.
#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    filter_type: FilterType,
    /// Lower-cased search text
    needle: String,
}

impl FeedFilter {
    pub fn new(filter_type: FilterType, search_text: &str) -> Self {
        Self {
            filter_type,
            needle: search_text.to_lowercase(),
        }
    }

    /// Whether a single run passes the type filter and the search.
    ///
    /// Search is a case-insensitive substring match against the race name,
    /// location and city; missing fields match as the empty string.
    pub fn matches(&self, run: &RunRecord) -> bool {
        if !self.filter_type.accepts(run.run_type) {
            return false;
        }
        if self.needle.is_empty() {
            return true;
        }

        [run.race_name_or_empty(), run.location_or_empty(), run.city_or_empty()]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }

    /// Keep matching runs, preserving input order.
    pub fn apply<'a>(&self, runs: &'a [RunRecord]) -> Vec<&'a RunRecord> {
        runs.iter().filter(|run| self.matches(run)).collect()
    }
}
