//! User profile model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owner identity (also used as document ID)
    pub user_id: String,
    /// Display name, unique across users
    pub nickname: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    /// Profile picture URL (media store)
    pub photo_url: Option<String>,
    /// When the profile was created (ISO 8601)
    pub created_at: String,
}
