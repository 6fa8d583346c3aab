//! Persistence contract for published profiles.
//!
//! A single table keyed by slug (UNIQUE) plus a read-only public view.
//! The backend enforces slug uniqueness; the slug resolver's pre-check
//! is only a UX hint on top of this.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::profile::{DraftProfile, Visibility};

/// A persisted published profile, as stored in `provider_profiles`.
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub id: Uuid,
    pub slug: String,
    pub user_id: String,
    pub profile: DraftProfile,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The subset of columns safe for public display.
///
/// Excludes direct contact identifiers (email, phone, license number and
/// state) and the owner id, matching the `provider_profiles_public` view.
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfile {
    pub id: Uuid,
    pub slug: String,
    pub full_name: String,
    pub specialty: String,
    pub preferred_locations: String,
    pub availability: String,
    pub years_experience: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub session_types: Vec<String>,
    pub languages: Vec<String>,
    pub therapeutic_approaches: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepts_insurance: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Backend-agnostic store for published profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Run all pending schema migrations.
    async fn run_migrations(&self) -> Result<(), DatabaseError>;

    /// Look up a profile by slug, public or not (owner path).
    async fn select_by_slug(&self, slug: &str) -> Result<Option<ProfileRecord>, DatabaseError>;

    /// Look up a profile through the public view. Returns `None` for
    /// both unknown slugs and private profiles, so callers cannot tell
    /// the two apart.
    async fn select_public_by_slug(&self, slug: &str)
    -> Result<Option<PublicProfile>, DatabaseError>;

    /// Insert a new published profile. Fails with
    /// [`DatabaseError::Constraint`] if the slug is already taken.
    async fn insert(
        &self,
        draft: &DraftProfile,
        slug: &str,
        visibility: Visibility,
        user_id: &str,
    ) -> Result<ProfileRecord, DatabaseError>;

    /// Update an existing record in place with new profile fields and
    /// visibility. The slug and id are unchanged.
    async fn update_by_id(
        &self,
        id: Uuid,
        draft: &DraftProfile,
        visibility: Visibility,
    ) -> Result<ProfileRecord, DatabaseError>;
}
