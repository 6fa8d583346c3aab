//! Step aggregator: merges validated per-step data into the cumulative
//! draft and tracks completed steps.

use serde::{Deserialize, Serialize};

use crate::profile::DraftProfile;
use crate::wizard::steps::{STEP_COUNT, WizardStep};
use crate::wizard::validate::{BasicInfo, Preferences};

/// Validated data produced by one data-bearing step.
#[derive(Debug, Clone)]
pub enum StepData {
    BasicInfo(BasicInfo),
    Preferences(Preferences),
}

impl StepData {
    /// The step that produced this data.
    pub fn step(&self) -> WizardStep {
        match self {
            Self::BasicInfo(_) => WizardStep::BasicInfo,
            Self::Preferences(_) => WizardStep::Preferences,
        }
    }
}

/// Shallow-merge one step's validated data into the draft.
///
/// Fields owned by the step overwrite any previous values; fields the
/// step does not touch are preserved. Revisiting an earlier step after a
/// later one overwrites forward: the last validated submission wins.
pub fn merge(draft: &mut DraftProfile, data: StepData) {
    match data {
        StepData::BasicInfo(info) => {
            draft.full_name = Some(info.full_name);
            draft.email = Some(info.email);
            draft.phone = Some(info.phone);
            draft.specialty = Some(info.specialty);
            draft.license_number = Some(info.license_number);
            draft.license_state = info.license_state;
        }
        StepData::Preferences(prefs) => {
            draft.preferred_locations = Some(prefs.preferred_locations);
            draft.availability = Some(prefs.availability);
            draft.years_experience = Some(prefs.years_experience);
            draft.notes = prefs.notes;
            draft.session_types = prefs.session_types;
            draft.languages = prefs.languages;
            draft.therapeutic_approaches = prefs.therapeutic_approaches;
            draft.accepts_insurance = prefs.accepts_insurance;
        }
    }
}

/// Set of completed step numbers, as a fixed-size boolean array indexed
/// by step. Steps complete in any order and need not be contiguous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSteps([bool; STEP_COUNT]);

impl CompletedSteps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a step complete. Idempotent.
    pub fn insert(&mut self, step: WizardStep) {
        self.0[step.index() - 1] = true;
    }

    pub fn contains(&self, step: WizardStep) -> bool {
        self.0[step.index() - 1]
    }

    /// 1-based indices of completed steps, in order.
    pub fn indices(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, done)| done.then_some(i + 1))
            .collect()
    }

    /// 1-based indices of data-bearing steps not yet completed.
    /// The terminal step carries no data and is excluded.
    pub fn missing_before_terminal(&self) -> Vec<usize> {
        WizardStep::all()
            .into_iter()
            .filter(|s| !s.is_terminal() && !self.contains(*s))
            .map(|s| s.index())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Availability;
    use crate::wizard::validate::{
        BasicInfoForm, PreferencesForm, validate_basic_info, validate_preferences,
    };

    fn basic_info(name: &str, email: &str) -> BasicInfo {
        validate_basic_info(&BasicInfoForm {
            full_name: name.into(),
            email: email.into(),
            phone: "5551234567".into(),
            specialty: "Neurosciences".into(),
            license_number: "NE-12345".into(),
            ..Default::default()
        })
        .unwrap()
    }

    fn preferences() -> Preferences {
        validate_preferences(&PreferencesForm {
            preferred_locations: "Lakeside".into(),
            availability: "full-time".into(),
            years_experience: "10".into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn merge_sets_only_the_steps_fields() {
        let mut draft = DraftProfile::default();
        merge(&mut draft, StepData::BasicInfo(basic_info("Jane Doe", "jane@x.com")));
        assert_eq!(draft.full_name.as_deref(), Some("Jane Doe"));
        assert!(draft.preferred_locations.is_none());
        assert!(draft.availability.is_none());
    }

    #[test]
    fn merge_preserves_fields_from_other_steps() {
        let mut draft = DraftProfile::default();
        merge(&mut draft, StepData::BasicInfo(basic_info("Jane Doe", "jane@x.com")));
        merge(&mut draft, StepData::Preferences(preferences()));
        assert_eq!(draft.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(draft.availability, Some(Availability::FullTime));
    }

    #[test]
    fn last_validated_write_wins() {
        let mut draft = DraftProfile::default();
        merge(&mut draft, StepData::BasicInfo(basic_info("Jane Doe", "a@x.com")));
        merge(&mut draft, StepData::Preferences(preferences()));
        // User returns to step 1 and resubmits with a new email.
        merge(&mut draft, StepData::BasicInfo(basic_info("Jane Doe", "b@x.com")));
        assert_eq!(draft.email.as_deref(), Some("b@x.com"));
        // Preferences fields untouched by the resubmission.
        assert_eq!(draft.preferred_locations.as_deref(), Some("Lakeside"));
    }

    #[test]
    fn completed_steps_insert_is_idempotent() {
        let mut completed = CompletedSteps::new();
        completed.insert(WizardStep::BasicInfo);
        completed.insert(WizardStep::BasicInfo);
        assert!(completed.contains(WizardStep::BasicInfo));
        assert_eq!(completed.indices(), vec![1]);
    }

    #[test]
    fn completed_steps_need_not_be_contiguous() {
        let mut completed = CompletedSteps::new();
        completed.insert(WizardStep::Confirm);
        assert_eq!(completed.indices(), vec![3]);
        assert_eq!(completed.missing_before_terminal(), vec![1, 2]);
    }

    #[test]
    fn missing_before_terminal_empties_out() {
        let mut completed = CompletedSteps::new();
        completed.insert(WizardStep::BasicInfo);
        assert_eq!(completed.missing_before_terminal(), vec![2]);
        completed.insert(WizardStep::Preferences);
        assert!(completed.missing_before_terminal().is_empty());
    }

    #[test]
    fn step_data_reports_its_step() {
        assert_eq!(
            StepData::BasicInfo(basic_info("Jane Doe", "jane@x.com")).step(),
            WizardStep::BasicInfo
        );
        assert_eq!(
            StepData::Preferences(preferences()).step(),
            WizardStep::Preferences
        );
    }
}
