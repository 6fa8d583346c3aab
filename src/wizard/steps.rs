//! Step definitions: the fixed ordered list of wizard pages.

use serde::{Deserialize, Serialize};

/// Number of steps in the flow.
pub const STEP_COUNT: usize = 3;

/// One page of the wizard.
///
/// The flow is fixed: BasicInfo → Preferences → Confirm. Confirm is the
/// terminal step; advancing from it hands the finished draft to the
/// caller instead of moving further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    BasicInfo,
    Preferences,
    Confirm,
}

impl WizardStep {
    /// 1-based step number, matching the "Step i of N" UI convention.
    pub fn index(&self) -> usize {
        match self {
            Self::BasicInfo => 1,
            Self::Preferences => 2,
            Self::Confirm => 3,
        }
    }

    /// Look up a step by its 1-based number.
    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            1 => Some(Self::BasicInfo),
            2 => Some(Self::Preferences),
            3 => Some(Self::Confirm),
            _ => None,
        }
    }

    /// The next step in the flow, or `None` at the terminal step.
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The previous step, or `None` at the first step.
    pub fn prev(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Whether this is the terminal step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirm)
    }

    /// Human-readable page title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::Preferences => "Preferences",
            Self::Confirm => "Confirmation",
        }
    }

    /// All steps in order.
    pub fn all() -> [Self; STEP_COUNT] {
        [Self::BasicInfo, Self::Preferences, Self::Confirm]
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::BasicInfo
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.index(), self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_one_based_and_dense() {
        for (i, step) in WizardStep::all().into_iter().enumerate() {
            assert_eq!(step.index(), i + 1);
            assert_eq!(WizardStep::from_index(i + 1), Some(step));
        }
        assert_eq!(WizardStep::from_index(0), None);
        assert_eq!(WizardStep::from_index(STEP_COUNT + 1), None);
    }

    #[test]
    fn next_walks_the_flow() {
        assert_eq!(WizardStep::BasicInfo.next(), Some(WizardStep::Preferences));
        assert_eq!(WizardStep::Preferences.next(), Some(WizardStep::Confirm));
        assert_eq!(WizardStep::Confirm.next(), None);
    }

    #[test]
    fn prev_walks_backward() {
        assert_eq!(WizardStep::BasicInfo.prev(), None);
        assert_eq!(WizardStep::Preferences.prev(), Some(WizardStep::BasicInfo));
        assert_eq!(WizardStep::Confirm.prev(), Some(WizardStep::Preferences));
    }

    #[test]
    fn only_confirm_is_terminal() {
        assert!(WizardStep::Confirm.is_terminal());
        assert!(!WizardStep::BasicInfo.is_terminal());
        assert!(!WizardStep::Preferences.is_terminal());
    }
}
