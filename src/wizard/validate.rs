//! Per-step field validators.
//!
//! Each validator takes the raw form for one step and returns either a
//! normalized typed record or a field → message error map. Validators
//! have no side effects and never panic past their boundary.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::profile::Availability;

/// Field name → human-readable error message.
///
/// BTreeMap keeps the error order deterministic for display and tests.
pub type FieldErrors = BTreeMap<String, String>;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

// ── Basic Info ──────────────────────────────────────────────────────

/// Raw user input for the Basic Info step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasicInfoForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub license_state: String,
}

/// Validated Basic Info data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub specialty: String,
    pub license_number: String,
    pub license_state: Option<String>,
}

/// Validate the Basic Info step. All fields except license state are
/// required.
pub fn validate_basic_info(form: &BasicInfoForm) -> Result<BasicInfo, FieldErrors> {
    let mut errors = FieldErrors::new();

    let full_name = form.full_name.trim();
    if full_name.chars().count() < 2 {
        errors.insert(
            "full_name".into(),
            "Name must be at least 2 characters".into(),
        );
    } else if full_name.chars().count() > 100 {
        errors.insert(
            "full_name".into(),
            "Name must be at most 100 characters".into(),
        );
    }

    let email = form.email.trim();
    if !EMAIL_RE.is_match(email) {
        errors.insert("email".into(), "Enter a valid email address".into());
    }

    let phone = form.phone.trim();
    if !(10..=15).contains(&phone.chars().count()) {
        errors.insert(
            "phone".into(),
            "Phone must be between 10 and 15 characters".into(),
        );
    }

    let specialty = form.specialty.trim();
    if specialty.chars().count() < 2 {
        errors.insert(
            "specialty".into(),
            "Specialty must be at least 2 characters".into(),
        );
    }

    let license_number = form.license_number.trim();
    if license_number.chars().count() < 5 {
        errors.insert(
            "license_number".into(),
            "License number must be at least 5 characters".into(),
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let license_state = form.license_state.trim();
    Ok(BasicInfo {
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        specialty: specialty.to_string(),
        license_number: license_number.to_string(),
        license_state: (!license_state.is_empty()).then(|| license_state.to_string()),
    })
}

// ── Preferences ─────────────────────────────────────────────────────

/// Raw user input for the Preferences step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesForm {
    #[serde(default)]
    pub preferred_locations: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub years_experience: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub session_types: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub therapeutic_approaches: Vec<String>,
    #[serde(default)]
    pub accepts_insurance: String,
}

/// Validated Preferences data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub preferred_locations: String,
    pub availability: Availability,
    pub years_experience: String,
    pub notes: Option<String>,
    pub session_types: Vec<String>,
    pub languages: Vec<String>,
    pub therapeutic_approaches: Vec<String>,
    pub accepts_insurance: Option<String>,
}

/// Validate the Preferences step. Notes and the practice attribute lists
/// are optional and unrestricted.
pub fn validate_preferences(form: &PreferencesForm) -> Result<Preferences, FieldErrors> {
    let mut errors = FieldErrors::new();

    let preferred_locations = form.preferred_locations.trim();
    if preferred_locations.is_empty() {
        errors.insert(
            "preferred_locations".into(),
            "Preferred locations are required".into(),
        );
    }

    let availability = Availability::parse(&form.availability);
    if availability.is_none() {
        errors.insert(
            "availability".into(),
            "Availability must be full-time, part-time, or flexible".into(),
        );
    }

    let years_experience = form.years_experience.trim();
    if years_experience.is_empty() {
        errors.insert(
            "years_experience".into(),
            "Years of experience is required".into(),
        );
    }

    let Some(availability) = availability else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    let notes = form.notes.trim();
    let accepts_insurance = form.accepts_insurance.trim();
    Ok(Preferences {
        preferred_locations: preferred_locations.to_string(),
        availability,
        years_experience: years_experience.to_string(),
        notes: (!notes.is_empty()).then(|| notes.to_string()),
        session_types: form.session_types.clone(),
        languages: form.languages.clone(),
        therapeutic_approaches: form.therapeutic_approaches.clone(),
        accepts_insurance: (!accepts_insurance.is_empty()).then(|| accepts_insurance.to_string()),
    })
}
