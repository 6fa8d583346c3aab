//! Session-local draft cache.
//!
//! Lets the in-progress draft survive navigating away from the wizard
//! and back within one session. A plain snapshot under a fixed key,
//! last write wins. Not a durable store.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::profile::DraftProfile;
use crate::wizard::aggregator::CompletedSteps;
use crate::wizard::controller::Wizard;
use crate::wizard::steps::WizardStep;

/// Cache key for the wizard snapshot.
pub const DRAFT_KEY: &str = "provider_form_data";

/// Serialized wizard state: navigation plus the draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub current: WizardStep,
    pub completed: CompletedSteps,
    pub draft: DraftProfile,
}

impl WizardSnapshot {
    pub fn capture(wizard: &Wizard) -> Self {
        Self {
            current: wizard.current_step(),
            completed: *wizard.completed_steps(),
            draft: wizard.draft().clone(),
        }
    }

    pub fn into_wizard(self) -> Wizard {
        Wizard::restore(self.current, self.completed, self.draft)
    }
}

/// Session-local key-value snapshot store.
///
/// Saving is best-effort: a failed write logs a warning and is dropped,
/// it never interrupts the wizard.
pub trait DraftCache: Send + Sync {
    fn save(&self, snapshot: &WizardSnapshot);
    fn load(&self) -> Option<WizardSnapshot>;
    fn clear(&self);
}

/// In-memory cache scoped to one editing session.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftCache for MemoryCache {
    fn save(&self, snapshot: &WizardSnapshot) {
        let json = match serde_json::to_string(snapshot) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize wizard snapshot: {e}");
                return;
            }
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(DRAFT_KEY.to_string(), json);
        }
    }

    fn load(&self) -> Option<WizardSnapshot> {
        let entries = self.entries.lock().ok()?;
        let json = entries.get(DRAFT_KEY)?;
        match serde_json::from_str(json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Discarding corrupt wizard snapshot: {e}");
                None
            }
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(DRAFT_KEY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::controller::StepForm;
    use crate::wizard::validate::BasicInfoForm;

    fn wizard_past_step_one() -> Wizard {
        let mut w = Wizard::new();
        w.advance(StepForm::BasicInfo(BasicInfoForm {
            full_name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: "5551234567".into(),
            specialty: "Neurosciences".into(),
            license_number: "NE-12345".into(),
            ..Default::default()
        }))
        .unwrap();
        w
    }

    #[test]
    fn save_and_load_restores_the_wizard() {
        let cache = MemoryCache::new();
        let wizard = wizard_past_step_one();
        cache.save(&WizardSnapshot::capture(&wizard));

        let restored = cache.load().unwrap().into_wizard();
        assert_eq!(restored.current_step(), WizardStep::Preferences);
        assert!(restored.completed_steps().contains(WizardStep::BasicInfo));
        assert_eq!(restored.draft().full_name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn load_on_empty_cache_is_none() {
        assert!(MemoryCache::new().load().is_none());
    }

    #[test]
    fn last_write_wins() {
        let cache = MemoryCache::new();
        cache.save(&WizardSnapshot::capture(&Wizard::new()));
        cache.save(&WizardSnapshot::capture(&wizard_past_step_one()));

        let restored = cache.load().unwrap();
        assert_eq!(restored.current, WizardStep::Preferences);
    }

    #[test]
    fn clear_removes_the_snapshot() {
        let cache = MemoryCache::new();
        cache.save(&WizardSnapshot::capture(&Wizard::new()));
        cache.clear();
        assert!(cache.load().is_none());
    }
}
