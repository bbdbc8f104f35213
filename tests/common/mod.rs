// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, NaiveDate, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use runlog::config::Config;
use runlog::db::FirestoreDb;
use runlog::models::{DistanceCategory, RunRecord, RunType};
use runlog::routes::create_router;
use runlog::AppState;
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app with an offline database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: FirestoreDb::new_mock(),
    });

    (create_router(state.clone()), state)
}

/// Create a test app backed by the Firestore emulator.
#[allow(dead_code)]
pub async fn create_emulator_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: test_db().await,
    });

    (create_router(state.clone()), state)
}

/// Sign a session token for `user_id`, valid for a day.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
        iat: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 86400,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

/// Unique owner ID for test isolation.
#[allow(dead_code)]
pub fn unique_user_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("test-user-{}", nanos)
}

#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[allow(dead_code)]
pub fn parse_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

/// A race record with the given name, category, date and duration.
#[allow(dead_code)]
pub fn race(
    id: &str,
    race_name: &str,
    category: DistanceCategory,
    run_date: &str,
    duration_seconds: u64,
) -> RunRecord {
    let distance_km = category.canonical_km().unwrap_or(5.0);
    RunRecord {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        run_type: RunType::Race,
        date: date(run_date),
        distance_category: category,
        distance_km,
        duration_seconds,
        pace_seconds_per_km: duration_seconds as f64 / distance_km,
        race_name: Some(race_name.to_string()),
        location: None,
        city: None,
        country: None,
        is_overseas: false,
        memo: None,
        photos: vec![],
        is_public: true,
        created_at: parse_time(&format!("{}T12:00:00Z", run_date)),
    }
}

/// A casual run in `city`.
#[allow(dead_code)]
pub fn casual(
    id: &str,
    city: &str,
    category: DistanceCategory,
    distance_km: f64,
    run_date: &str,
    duration_seconds: u64,
) -> RunRecord {
    RunRecord {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        run_type: RunType::Casual,
        date: date(run_date),
        distance_category: category,
        distance_km,
        duration_seconds,
        pace_seconds_per_km: duration_seconds as f64 / distance_km,
        race_name: None,
        location: Some(city.to_string()),
        city: Some(city.to_string()),
        country: None,
        is_overseas: false,
        memo: None,
        photos: vec![],
        is_public: true,
        created_at: parse_time(&format!("{}T07:00:00Z", run_date)),
    }
}
