//! Publish coordinator: turns a draft into a publicly addressable
//! profile.
//!
//! Decides insert-vs-update against the store and sets visibility.
//! Exactly one write per successful call; every failure path happens
//! before any write, so the draft is never half-published.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthProvider;
use crate::error::{DatabaseError, PublishError};
use crate::profile::{DraftProfile, Visibility};
use crate::slug;
use crate::store::ProfileStore;

/// Result of a successful publish.
#[derive(Debug, Clone, Serialize)]
pub struct PublishReceipt {
    /// The persisted record's identifier.
    pub id: Uuid,
    /// The slug the profile was published under (post-normalization).
    pub slug: String,
    /// The externally reachable URL.
    pub url: String,
}

/// Coordinates the publish workflow against the store and the auth
/// collaborator.
pub struct PublishCoordinator {
    store: Arc<dyn ProfileStore>,
    auth: Arc<dyn AuthProvider>,
    public_base_url: String,
}

impl PublishCoordinator {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        auth: Arc<dyn AuthProvider>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            auth,
            public_base_url: public_base_url.into(),
        }
    }

    /// Publish `draft` under `slug` with the requested visibility.
    ///
    /// Inserts on a fresh slug, updates in place when the slug already
    /// belongs to the current user's profile, and refuses to touch a
    /// slug owned by someone else. The store's UNIQUE constraint
    /// backstops the lookup; a constraint violation on insert is
    /// reported as `SlugTaken`, not a store failure.
    pub async fn publish(
        &self,
        draft: &DraftProfile,
        slug: &str,
        visibility: Visibility,
    ) -> Result<PublishReceipt, PublishError> {
        let slug = slug::normalize(slug);
        if slug.is_empty() {
            return Err(PublishError::InvalidSlug);
        }

        let user_id = self
            .auth
            .current_user()
            .ok_or(PublishError::Unauthenticated)?;

        let record = match self.store.select_by_slug(&slug).await? {
            None => match self.store.insert(draft, &slug, visibility, &user_id).await {
                Ok(record) => record,
                Err(DatabaseError::Constraint(_)) => {
                    // Lost the check-then-write race to another session.
                    warn!(%slug, "Slug taken between check and insert");
                    return Err(PublishError::SlugTaken { slug });
                }
                Err(e) => return Err(e.into()),
            },
            Some(existing) if existing.user_id == user_id => {
                self.store
                    .update_by_id(existing.id, draft, visibility)
                    .await?
            }
            Some(_) => {
                return Err(PublishError::SlugTaken { slug });
            }
        };

        let url = self.public_url(&record.slug);
        info!(slug = %record.slug, id = %record.id, public = record.is_public, "Profile published");
        Ok(PublishReceipt {
            id: record.id,
            slug: record.slug,
            url,
        })
    }

    /// The public URL for a slug.
    pub fn public_url(&self, slug: &str) -> String {
        format!("{}/p/{slug}", self.public_base_url.trim_end_matches('/'))
    }
}
