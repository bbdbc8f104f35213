//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// User profiles (keyed by user_id)
    pub const USERS: &str = "users";
    /// Run records (keyed by run id)
    pub const RUNS: &str = "runs";
}
