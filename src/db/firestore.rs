// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile documents)
//! - Runs (one document per logged run, owned by a single user)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{RunRecord, UserProfile};

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // The emulator accepts any bearer token; hand it an unsigned one.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user profile by owner identity.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user profile.
    pub async fn upsert_user(&self, user: &UserProfile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.user_id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Whether another user already uses `nickname`.
    pub async fn nickname_taken(&self, nickname: &str, user_id: &str) -> Result<bool, AppError> {
        let users: Vec<UserProfile> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field("nickname").eq(nickname)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.iter().any(|u| u.user_id != user_id))
    }

    // ─── Run Operations ──────────────────────────────────────────

    /// All runs owned by a user, most recent date first.
    ///
    /// The aggregator does its own ordering; this order only serves the feed.
    pub async fn list_runs_for_user(&self, user_id: &str) -> Result<Vec<RunRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::RUNS)
            .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
            .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a run by ID, regardless of owner.
    pub async fn get_run(&self, run_id: &str) -> Result<Option<RunRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::RUNS)
            .obj()
            .one(run_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a run, replacing any existing document with the same ID.
    pub async fn set_run(&self, run: &RunRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::RUNS)
            .document_id(&run.id)
            .object(run)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a single run.
    pub async fn delete_run(&self, run_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::RUNS)
            .document_id(run_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Helper Methods ────────────────────────────────────────────

    /// Delete documents by ID in chunks, one transaction per chunk.
    async fn batch_delete(&self, collection: &str, doc_ids: &[String]) -> Result<(), AppError> {
        let client = self.get_client()?;

        for chunk in doc_ids.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for doc_id in chunk {
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }

    // ─── Account Deletion ──────────────────────────────────────────

    /// Delete every run and the profile of a user.
    ///
    /// Returns the number of documents deleted.
    pub async fn delete_user_data(&self, user_id: &str) -> Result<usize, AppError> {
        let run_ids: Vec<String> = self
            .list_runs_for_user(user_id)
            .await?
            .into_iter()
            .map(|run| run.id)
            .collect();

        self.batch_delete(collections::RUNS, &run_ids).await?;
        tracing::debug!(user_id, count = run_ids.len(), "Deleted runs");

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(user_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        tracing::debug!(user_id, "Deleted user profile");

        let deleted_count = run_ids.len() + 1;
        tracing::info!(user_id, deleted_count, "User data deletion complete");

        Ok(deleted_count)
    }
}
