//! Wizard controller: the state machine governing step transitions.
//!
//! The machine has one state per step and nothing else. Validation
//! failure keeps it on the current step and surfaces field errors; it
//! never discards the draft.

use tracing::debug;

use crate::error::WizardError;
use crate::profile::DraftProfile;
use crate::wizard::aggregator::{CompletedSteps, StepData, merge};
use crate::wizard::steps::WizardStep;
use crate::wizard::validate::{
    BasicInfoForm, FieldErrors, PreferencesForm, validate_basic_info, validate_preferences,
};

/// Raw input handed to [`Wizard::advance`] for the active step.
#[derive(Debug, Clone)]
pub enum StepForm {
    BasicInfo(BasicInfoForm),
    Preferences(PreferencesForm),
    /// The Confirm step carries no data.
    Confirm,
}

/// What `advance` did.
#[derive(Debug, Clone)]
pub enum AdvanceOutcome {
    /// Input validated and merged; moved to the next step.
    Advanced(WizardStep),
    /// Validation failed; the machine stayed put. Contains exactly the
    /// invalid fields.
    Invalid(FieldErrors),
    /// Terminal transition: the finished draft, ready for the
    /// wizard-complete collaborator. The machine stays on Confirm.
    Complete(DraftProfile),
}

/// The multi-step wizard: navigation state plus the draft under edit.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    current: WizardStep,
    completed: CompletedSteps,
    draft: DraftProfile,
}

impl Wizard {
    /// Start a fresh wizard at step 1 with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a wizard from previously captured state (draft cache
    /// restore path).
    pub fn restore(current: WizardStep, completed: CompletedSteps, draft: DraftProfile) -> Self {
        Self {
            current,
            completed,
            draft,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.current
    }

    pub fn completed_steps(&self) -> &CompletedSteps {
        &self.completed
    }

    pub fn draft(&self) -> &DraftProfile {
        &self.draft
    }

    /// Whether a step can be navigated to directly: already completed,
    /// or earlier than the current step.
    pub fn is_reachable(&self, step: WizardStep) -> bool {
        self.completed.contains(step) || step.index() < self.current.index()
    }

    /// Validate the active step's input and move forward.
    ///
    /// On the terminal step this is the exit transition: it requires all
    /// prior data steps completed and returns the finished draft instead
    /// of changing state.
    pub fn advance(&mut self, form: StepForm) -> Result<AdvanceOutcome, WizardError> {
        let data = match (self.current, form) {
            (WizardStep::BasicInfo, StepForm::BasicInfo(form)) => {
                match validate_basic_info(&form) {
                    Ok(data) => StepData::BasicInfo(data),
                    Err(errors) => return Ok(AdvanceOutcome::Invalid(errors)),
                }
            }
            (WizardStep::Preferences, StepForm::Preferences(form)) => {
                match validate_preferences(&form) {
                    Ok(data) => StepData::Preferences(data),
                    Err(errors) => return Ok(AdvanceOutcome::Invalid(errors)),
                }
            }
            (WizardStep::Confirm, StepForm::Confirm) => {
                let missing = self.completed.missing_before_terminal();
                if !missing.is_empty() {
                    return Err(WizardError::StepsIncomplete { missing });
                }
                debug!("Wizard complete, handing off draft");
                return Ok(AdvanceOutcome::Complete(self.draft.clone()));
            }
            (current, _) => return Err(WizardError::WrongForm { expected: current }),
        };

        merge(&mut self.draft, data);
        self.completed.insert(self.current);
        // Data steps always have a successor (Confirm is handled above).
        let next = self
            .current
            .next()
            .ok_or(WizardError::WrongForm { expected: self.current })?;
        debug!(from = %self.current, to = %next, "Wizard advanced");
        self.current = next;
        Ok(AdvanceOutcome::Advanced(next))
    }

    /// Move back one step without validation. Completion flags are not
    /// touched.
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        let prev = self.current.prev().ok_or(WizardError::AtFirstStep)?;
        debug!(from = %self.current, to = %prev, "Wizard retreated");
        self.current = prev;
        Ok(prev)
    }

    /// Jump directly to a reachable step without validation. Edits made
    /// there must go through `advance` again to re-validate and
    /// re-merge.
    pub fn jump_to(&mut self, step: WizardStep) -> Result<WizardStep, WizardError> {
        if !self.is_reachable(step) {
            return Err(WizardError::StepNotReachable {
                current: self.current,
                target: step,
            });
        }
        debug!(from = %self.current, to = %step, "Wizard jumped");
        self.current = step;
        Ok(step)
    }

    /// Explicit "start over": empty draft, step 1, nothing completed.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
