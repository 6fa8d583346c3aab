//! Slug derivation, normalization, and availability checks.
//!
//! A slug is the URL-safe public identifier of a published profile.
//! The availability pre-check here is a UX hint only; the store's
//! UNIQUE constraint is the authoritative guard against the
//! check-then-write race (single-editor assumption, no transaction
//! across sessions).

use std::sync::Arc;

use serde::Serialize;

use crate::error::DatabaseError;
use crate::profile::DraftProfile;
use crate::store::ProfileStore;

/// Normalize arbitrary user text into slug form.
///
/// Lowercases, collapses whitespace runs to single hyphens, strips
/// everything outside `[a-z0-9-]`, collapses hyphen runs, and trims
/// leading/trailing hyphens. Idempotent.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        }
        // Everything else is stripped.
    }
    if out.ends_with('-') {
        out.pop();
    }
    out
}

/// Derive the default slug candidate from the draft's name.
pub fn derive_candidate(draft: &DraftProfile) -> String {
    normalize(draft.full_name.as_deref().unwrap_or_default())
}

/// Verdict of a slug availability pre-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlugAvailability {
    /// No published profile uses this slug.
    Available,
    /// This slug is used by the current user's own published profile
    /// (republish path).
    OwnedBySelf,
    /// Another owner holds this slug.
    TakenByOther,
}

/// Checks candidate slugs against the published-profile store.
pub struct SlugResolver {
    store: Arc<dyn ProfileStore>,
}

impl SlugResolver {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Check who, if anyone, holds `slug`. `user_id` identifies the
    /// current editing session's owner.
    pub async fn check_availability(
        &self,
        slug: &str,
        user_id: &str,
    ) -> Result<SlugAvailability, DatabaseError> {
        match self.store.select_by_slug(slug).await? {
            None => Ok(SlugAvailability::Available),
            Some(record) if record.user_id == user_id => Ok(SlugAvailability::OwnedBySelf),
            Some(_) => Ok(SlugAvailability::TakenByOther),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Visibility;
    use crate::store::LibSqlBackend;

    #[test]
    fn normalize_lowercases_and_hyphenates() {
        assert_eq!(normalize("Jane Doe"), "jane-doe");
        assert_eq!(normalize("Dr. Jane Q. Doe III"), "dr-jane-q-doe-iii");
    }

    #[test]
    fn normalize_collapses_whitespace_runs() {
        assert_eq!(normalize("Jane \t  Doe"), "jane-doe");
    }

    #[test]
    fn normalize_strips_disallowed_characters() {
        assert_eq!(normalize("jane_doe!@#"), "janedoe");
        assert_eq!(normalize("café corner"), "caf-corner");
    }

    #[test]
    fn normalize_collapses_hyphen_runs_and_trims_edges() {
        assert_eq!(normalize("--jane---doe--"), "jane-doe");
        assert_eq!(normalize(" - "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["Jane Doe", "  --Weird__ Input!! 42  ", "already-a-slug"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn normalize_keeps_digits() {
        assert_eq!(normalize("Suite 42 Care"), "suite-42-care");
    }

    #[test]
    fn derive_candidate_is_deterministic() {
        let draft = DraftProfile {
            full_name: Some("Jane Doe".into()),
            ..Default::default()
        };
        assert_eq!(derive_candidate(&draft), "jane-doe");
        assert_eq!(derive_candidate(&draft), derive_candidate(&draft));
    }

    #[test]
    fn derive_candidate_on_empty_draft_is_empty() {
        assert_eq!(derive_candidate(&DraftProfile::default()), "");
    }

    #[tokio::test]
    async fn availability_verdicts() {
        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        let draft = DraftProfile {
            full_name: Some("Jane Doe".into()),
            ..Default::default()
        };
        store
            .insert(&draft, "jane-doe", Visibility::Public, "user-1")
            .await
            .unwrap();

        let resolver = SlugResolver::new(store);
        assert_eq!(
            resolver.check_availability("free-slug", "user-1").await.unwrap(),
            SlugAvailability::Available
        );
        assert_eq!(
            resolver.check_availability("jane-doe", "user-1").await.unwrap(),
            SlugAvailability::OwnedBySelf
        );
        assert_eq!(
            resolver.check_availability("jane-doe", "user-2").await.unwrap(),
            SlugAvailability::TakenByOther
        );
    }
}
