// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record aggregation over a user's run records.
//!
//! Every function here is a pure transform of an in-memory snapshot:
//! callers fetch the runs, call in, and render the result. Nothing is
//! cached between calls.
//!
//! Ties on `duration_seconds` are broken by the earlier `created_at`; if
//! that also ties, the run encountered first in the input wins. Ties on
//! `date` when ordering a history put the later `created_at` first, then
//! keep input order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{
    CategoryStats, DistanceCategory, DistanceStats, ParticipationSummary, PersonalRecord,
    RaceHistory, RunCounts, RunRecord, RunType,
};

/// Whether `candidate` should replace `current` as the fastest run.
fn is_faster(candidate: &RunRecord, current: &RunRecord) -> bool {
    match candidate.duration_seconds.cmp(&current.duration_seconds) {
        Ordering::Less => true,
        Ordering::Equal => candidate.created_at < current.created_at,
        Ordering::Greater => false,
    }
}

fn fastest<'a, I>(runs: I) -> Option<&'a RunRecord>
where
    I: IntoIterator<Item = &'a RunRecord>,
{
    runs.into_iter()
        .reduce(|best, run| if is_faster(run, best) { run } else { best })
}

/// Most recent date first.
fn most_recent_first(a: &RunRecord, b: &RunRecord) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Fastest run per recorded distance category.
///
/// Custom-distance runs never hold a record. Entries come out in the order
/// each category was first seen in `runs`, so unchanged input always yields
/// the same sequence.
pub fn personal_records(runs: &[RunRecord]) -> Vec<PersonalRecord> {
    let mut records: Vec<PersonalRecord> = Vec::new();

    for run in runs.iter().filter(|r| r.distance_category.is_recorded()) {
        match records
            .iter_mut()
            .find(|pr| pr.category == run.distance_category)
        {
            Some(pr) => {
                if is_faster(run, &pr.record) {
                    pr.record = run.clone();
                }
            }
            None => records.push(PersonalRecord {
                category: run.distance_category,
                record: run.clone(),
            }),
        }
    }

    records
}

/// Race runs grouped by (race name, distance category).
///
/// Runs that are not races, or have no race name, are skipped. Groups are
/// ordered by participation count, most frequent first; equal counts keep
/// the order in which each group was first seen.
pub fn race_histories(runs: &[RunRecord]) -> Vec<RaceHistory> {
    let mut groups: Vec<(&str, DistanceCategory, Vec<&RunRecord>)> = Vec::new();
    let mut index: HashMap<(&str, DistanceCategory), usize> = HashMap::new();

    for run in runs {
        let name = run.race_name_or_empty();
        if run.run_type != RunType::Race || name.is_empty() {
            continue;
        }

        let slot = *index
            .entry((name, run.distance_category))
            .or_insert_with(|| {
                groups.push((name, run.distance_category, Vec::new()));
                groups.len() - 1
            });
        if let Some(group) = groups.get_mut(slot) {
            group.2.push(run);
        }
    }

    let mut histories: Vec<RaceHistory> = groups
        .into_iter()
        .filter_map(|(name, category, records)| build_history(name, category, &records))
        .collect();

    histories.sort_by(|a, b| b.count.cmp(&a.count));
    histories
}

fn build_history(
    race_name: &str,
    distance_category: DistanceCategory,
    records: &[&RunRecord],
) -> Option<RaceHistory> {
    let best_record = fastest(records.iter().copied())?.clone();

    let mut all_records: Vec<RunRecord> = records.iter().map(|r| (*r).clone()).collect();
    all_records.sort_by(most_recent_first);

    let latest_record = all_records.first()?.clone();
    let improvement_seconds = all_records
        .get(1)
        .map(|previous| previous.duration_seconds as i64 - latest_record.duration_seconds as i64);

    Some(RaceHistory {
        race_name: race_name.to_string(),
        distance_category,
        count: all_records.len() as u32,
        latest_record,
        best_record,
        improvement_seconds,
        all_records,
    })
}

/// Count, best and average time for each recorded distance category.
///
/// All four categories are always present; a category with no runs has
/// `count == 0`.
pub fn distance_stats(runs: &[RunRecord]) -> DistanceStats {
    let categories = DistanceCategory::RECORDED
        .iter()
        .map(|&category| category_stats(runs, category))
        .collect();

    let mut participation = ParticipationSummary::default();
    for run in runs {
        participation.add(run.distance_category);
    }

    DistanceStats {
        categories,
        participation,
    }
}

fn category_stats(runs: &[RunRecord], category: DistanceCategory) -> CategoryStats {
    let matching: Vec<&RunRecord> = runs
        .iter()
        .filter(|r| r.distance_category == category)
        .collect();

    let count = matching.len() as u32;
    let best = fastest(matching.iter().copied()).cloned();
    let average_seconds = if matching.is_empty() {
        None
    } else {
        let total: u64 = matching.iter().map(|r| r.duration_seconds).sum();
        Some((total as f64 / matching.len() as f64).round() as u64)
    };

    let mut all_runs: Vec<RunRecord> = matching.into_iter().cloned().collect();
    all_runs.sort_by(most_recent_first);

    CategoryStats {
        category,
        count,
        best,
        average_seconds,
        all_runs,
    }
}

/// Race/casual counts and whether a full marathon has been run.
pub fn run_counts(runs: &[RunRecord]) -> RunCounts {
    runs.iter().fold(RunCounts::default(), |mut counts, run| {
        match run.run_type {
            RunType::Race => counts.race_count += 1,
            RunType::Casual => counts.casual_count += 1,
        }
        counts.has_full_marathon |= run.distance_category == DistanceCategory::Full;
        counts
    })
}
