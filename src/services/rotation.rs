// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rotation schedule for cycling through personal records on display.
//!
//! The aggregator returns personal records in a stable order; this type
//! only decides which entry is showing at a given moment.

use std::time::Duration;

/// Time each personal record stays on screen.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(3);

/// Rotation over `len` entries at a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRotation {
    len: usize,
    interval: Duration,
}

impl RecordRotation {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            interval: ROTATION_INTERVAL,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// A single record (or none) never rotates.
    pub fn is_rotating(&self) -> bool {
        self.len > 1
    }

    /// Index showing after `elapsed` time since the display started.
    pub fn index_at(&self, elapsed: Duration) -> usize {
        if !self.is_rotating() {
            return 0;
        }
        let ticks = elapsed.as_millis() / self.interval.as_millis();
        (ticks % self.len as u128) as usize
    }

    /// Index after `current`, wrapping to the start.
    pub fn next_index(&self, current: usize) -> usize {
        if !self.is_rotating() {
            return 0;
        }
        (current + 1) % self.len
    }
}
