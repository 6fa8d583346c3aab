//! Multi-step profile wizard: step definitions, validators, the data
//! aggregator, the state machine, and the session-local draft cache.

pub mod aggregator;
pub mod cache;
pub mod controller;
pub mod steps;
pub mod validate;

pub use aggregator::{CompletedSteps, StepData, merge};
pub use cache::{DraftCache, MemoryCache, WizardSnapshot};
pub use controller::{AdvanceOutcome, StepForm, Wizard};
pub use steps::{STEP_COUNT, WizardStep};
pub use validate::{BasicInfoForm, FieldErrors, PreferencesForm};
