// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Runlog: personal running log with race records
//!
//! This crate provides the backend API for logging races and casual runs
//! and deriving personal bests, race-by-race history and per-distance
//! statistics from them.

pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
