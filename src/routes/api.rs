// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::format::{
    format_date, format_date_short, format_duration, format_pace, format_utc_rfc3339,
};
use crate::middleware::auth::AuthUser;
use crate::models::{DistanceStats, PersonalRecord, RaceHistory, RunCounts, RunRecord, UserProfile};
use crate::services::run_form::is_media_url;
use crate::services::{
    distance_stats, personal_records, race_histories, run_counts, FeedFilter, FilterType,
    RecordRotation, RunForm,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_SEARCH_LEN: usize = 100;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).put(update_me))
        .route("/api/account", delete(delete_account))
        .route("/api/runs", get(list_runs).post(create_run))
        .route(
            "/api/runs/{id}",
            get(get_run).put(update_run).delete(delete_run),
        )
        .route("/api/records", get(get_records))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub user_id: String,
    pub nickname: String,
    pub photo_url: Option<String>,
    pub counts: RunCounts,
}

/// Get current user profile with race/casual counts.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let (profile, runs) = tokio::try_join!(
        state.db.get_user(&user.user_id),
        state.db.list_runs_for_user(&user.user_id),
    )?;

    let profile = profile
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(UserResponse {
        user_id: profile.user_id,
        nickname: profile.nickname,
        photo_url: profile.photo_url,
        counts: run_counts(&runs),
    }))
}

#[derive(Deserialize, Validate)]
struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 20))]
    nickname: Option<String>,
    #[validate(length(max = 2048))]
    photo_url: Option<String>,
    #[validate(email)]
    email: Option<String>,
}

impl UpdateProfileRequest {
    /// Trim text fields so length bounds apply to what gets stored.
    fn trimmed(self) -> Self {
        let trim = |value: Option<String>| value.map(|v| v.trim().to_string());
        Self {
            nickname: trim(self.nickname),
            photo_url: trim(self.photo_url),
            email: trim(self.email),
        }
    }

    fn checked(self) -> Result<Self> {
        let request = self.trimmed();
        request
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if let Some(url) = request.photo_url.as_deref() {
            if !is_media_url(url) {
                return Err(AppError::BadRequest(
                    "photo_url must be an http(s) URL".to_string(),
                ));
            }
        }
        Ok(request)
    }
}

/// Create or update the caller's profile.
///
/// A first call must carry a nickname; later calls may change either field.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    let request = request.checked()?;
    let nickname = request.nickname.as_deref();

    let mut profile = match state.db.get_user(&user.user_id).await? {
        Some(profile) => profile,
        None if nickname.is_some() => {
            tracing::info!(user_id = %user.user_id, "Creating user profile");
            UserProfile {
                user_id: user.user_id.clone(),
                nickname: String::new(),
                email: None,
                photo_url: None,
                created_at: format_utc_rfc3339(chrono::Utc::now()),
            }
        }
        None => {
            return Err(AppError::BadRequest(
                "nickname is required for a new profile".to_string(),
            ))
        }
    };

    if let Some(nickname) = nickname {
        if nickname != profile.nickname {
            if state.db.nickname_taken(nickname, &user.user_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Nickname '{}' is already in use",
                    nickname
                )));
            }
            profile.nickname = nickname.to_string();
        }
    }
    if let Some(url) = request.photo_url {
        profile.photo_url = Some(url);
    }
    if let Some(email) = request.email {
        profile.email = Some(email);
    }

    state.db.upsert_user(&profile).await?;
    let runs = state.db.list_runs_for_user(&user.user_id).await?;

    Ok(Json(UserResponse {
        user_id: profile.user_id,
        nickname: profile.nickname,
        photo_url: profile.photo_url,
        counts: run_counts(&runs),
    }))
}

// ─── Account Deletion ────────────────────────────────────────

/// Response for account deletion.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub deleted: u32,
}

/// Delete the caller's runs and profile.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!(user_id = %user.user_id, "User-initiated account deletion");

    let deleted = state.db.delete_user_data(&user.user_id).await?;

    Ok(Json(DeleteAccountResponse {
        success: true,
        deleted: deleted as u32,
    }))
}

// ─── Runs ────────────────────────────────────────────────────

/// A run with its display labels.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunView {
    #[serde(flatten)]
    pub run: RunRecord,
    pub distance_label: String,
    pub duration_label: String,
    pub pace_label: Option<String>,
    pub date_label: String,
    pub date_short_label: String,
}

impl From<RunRecord> for RunView {
    fn from(run: RunRecord) -> Self {
        Self {
            distance_label: run.distance_label(),
            duration_label: format_duration(run.duration_seconds),
            pace_label: format_pace(run.distance_km, run.duration_seconds),
            date_label: format_date(run.date),
            date_short_label: format_date_short(run.date),
            run,
        }
    }
}

#[derive(Deserialize)]
struct FeedQuery {
    /// all | race | casual
    #[serde(default, rename = "type")]
    filter_type: FilterType,
    /// Free-text search over race name, location and city
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunsResponse {
    pub runs: Vec<RunView>,
    pub total: u32,
}

/// The caller's feed, filtered by type and search text.
async fn list_runs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<FeedQuery>,
) -> Result<Json<RunsResponse>> {
    if params.q.chars().count() > MAX_SEARCH_LEN {
        return Err(AppError::BadRequest(format!(
            "Search text must be at most {} characters",
            MAX_SEARCH_LEN
        )));
    }

    tracing::debug!(
        user_id = %user.user_id,
        filter_type = ?params.filter_type,
        q = %params.q,
        "Fetching feed"
    );

    let runs = state.db.list_runs_for_user(&user.user_id).await?;
    let filter = FeedFilter::new(params.filter_type, &params.q);

    let views: Vec<RunView> = filter
        .apply(&runs)
        .into_iter()
        .cloned()
        .map(RunView::from)
        .collect();

    Ok(Json(RunsResponse {
        total: views.len() as u32,
        runs: views,
    }))
}

/// Load a run, treating other owners' runs as missing.
async fn fetch_owned_run(state: &AppState, user: &AuthUser, run_id: &str) -> Result<RunRecord> {
    match state.db.get_run(run_id).await? {
        Some(run) if run.user_id == user.user_id => Ok(run),
        Some(_) => {
            tracing::warn!(user_id = %user.user_id, run_id, "Run requested by non-owner");
            Err(AppError::run_not_found(run_id))
        }
        None => Err(AppError::run_not_found(run_id)),
    }
}

async fn get_run(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(run_id): Path<String>,
) -> Result<Json<RunView>> {
    let run = fetch_owned_run(&state, &user, &run_id).await?;
    Ok(Json(RunView::from(run)))
}

async fn create_run(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(form): Json<RunForm>,
) -> Result<(StatusCode, Json<RunView>)> {
    let now = chrono::Utc::now();
    let run = form.into_record(
        &user.user_id,
        uuid::Uuid::new_v4().to_string(),
        now.date_naive(),
        now,
    )?;

    state.db.set_run(&run).await?;
    tracing::info!(
        user_id = %user.user_id,
        run_id = %run.id,
        run_type = ?run.run_type,
        category = run.distance_category.as_str(),
        "Run created"
    );

    Ok((StatusCode::CREATED, Json(RunView::from(run))))
}

/// Replace a run with a resubmitted form.
async fn update_run(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(run_id): Path<String>,
    Json(form): Json<RunForm>,
) -> Result<Json<RunView>> {
    let existing = fetch_owned_run(&state, &user, &run_id).await?;
    let run = form.replace(&existing, chrono::Utc::now().date_naive())?;

    state.db.set_run(&run).await?;
    tracing::info!(user_id = %user.user_id, run_id = %run.id, "Run updated");

    Ok(Json(RunView::from(run)))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteRunResponse {
    pub success: bool,
}

async fn delete_run(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(run_id): Path<String>,
) -> Result<Json<DeleteRunResponse>> {
    let run = fetch_owned_run(&state, &user, &run_id).await?;
    state.db.delete_run(&run.id).await?;
    tracing::info!(user_id = %user.user_id, run_id = %run.id, "Run deleted");

    Ok(Json(DeleteRunResponse { success: true }))
}

// ─── Records ─────────────────────────────────────────────────

/// Race history with its rendered improvement.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RaceHistoryView {
    #[serde(flatten)]
    pub history: RaceHistory,
    pub improvement_label: Option<String>,
    /// The personal best for this race is not the latest run
    pub best_is_older: bool,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecordsResponse {
    /// First-seen category order; stable for unchanged data
    pub personal_records: Vec<PersonalRecord>,
    /// Seconds each personal record stays on screen when rotating
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub rotation_interval_secs: u64,
    /// False when there is at most one record to show
    pub rotating: bool,
    /// All groups, most-run races first
    pub race_histories: Vec<RaceHistoryView>,
    pub distance_stats: DistanceStats,
}

/// Personal records, race histories and per-distance statistics.
///
/// Recomputed from the caller's runs on every request.
async fn get_records(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<RecordsResponse>> {
    let runs = state.db.list_runs_for_user(&user.user_id).await?;

    let personal_records = personal_records(&runs);
    let rotation = RecordRotation::new(personal_records.len());
    let race_histories = race_histories(&runs)
        .into_iter()
        .map(|history| RaceHistoryView {
            improvement_label: history.improvement_label(),
            best_is_older: history.best_is_not_latest(),
            history,
        })
        .collect();

    tracing::debug!(
        user_id = %user.user_id,
        runs = runs.len(),
        personal_records = personal_records.len(),
        "Computed records"
    );

    Ok(Json(RecordsResponse {
        personal_records,
        rotation_interval_secs: rotation.interval().as_secs(),
        rotating: rotation.is_rotating(),
        race_histories,
        distance_stats: distance_stats(&runs),
    }))
}
