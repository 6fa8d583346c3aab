//! Provider profile data models.

use serde::{Deserialize, Serialize};

/// Weekly availability commitment, a closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    FullTime,
    PartTime,
    Flexible,
}

impl Availability {
    /// Parse the wire form ("full-time" / "part-time" / "flexible").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "full-time" => Some(Self::FullTime),
            "part-time" => Some(Self::PartTime),
            "flexible" => Some(Self::Flexible),
            _ => None,
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::FullTime => "full-time",
            Self::PartTime => "part-time",
            Self::Flexible => "flexible",
        };
        write!(f, "{s}")
    }
}

/// Whether a published profile is visible to non-owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }

    pub fn from_is_public(is_public: bool) -> Self {
        if is_public { Self::Public } else { Self::Private }
    }
}

/// The cumulative provider record built up by the wizard.
///
/// Created empty when the wizard starts. Required fields stay `None`
/// until the owning step passes validation; re-submitting a step
/// overwrites its fields (last validated write wins).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftProfile {
    // Basic Info step
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub license_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_state: Option<String>,

    // Preferences step
    pub preferred_locations: Option<String>,
    pub availability: Option<Availability>,
    pub years_experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub session_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub therapeutic_approaches: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepts_insurance: Option<String>,
}

impl DraftProfile {
    /// Whether every required field has passed its step's validator.
    pub fn is_complete(&self) -> bool {
        self.full_name.is_some()
            && self.email.is_some()
            && self.phone.is_some()
            && self.specialty.is_some()
            && self.license_number.is_some()
            && self.preferred_locations.is_some()
            && self.availability.is_some()
            && self.years_experience.is_some()
    }

    /// Reset to the empty draft (explicit "start over").
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
