//! Error types for the provider profile service.

use crate::wizard::steps::WizardStep;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Wizard navigation errors.
///
/// Validation failures are not errors; they come back as a
/// [`FieldErrors`](crate::wizard::validate::FieldErrors) verdict and the
/// machine stays on the current step.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Step {target} is not reachable from step {current}")]
    StepNotReachable {
        current: WizardStep,
        target: WizardStep,
    },

    #[error("Wrong form for step {expected}")]
    WrongForm { expected: WizardStep },

    #[error("Cannot confirm: steps {missing:?} are incomplete")]
    StepsIncomplete { missing: Vec<usize> },

    #[error("Already at the first step")]
    AtFirstStep,
}

/// Errors from the publish workflow.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Slug is empty after normalization")]
    InvalidSlug,

    #[error("Slug '{slug}' is already taken by another profile")]
    SlugTaken { slug: String },

    #[error("Publishing requires a signed-in user")]
    Unauthenticated,

    #[error("Persistence failure: {0}")]
    Persistence(#[from] DatabaseError),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
