//! Runtime-level errors: registration and connection configuration.

use thiserror::Error;

use camunda_connector_core::DefinitionError;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid connector definition: {0}")]
    Definition(#[from] DefinitionError),

    #[error("environment variable '{name}' is not set")]
    MissingEnvVar { name: String },

    #[error("invalid value for environment variable '{name}': {reason}")]
    InvalidEnvVar { name: String, reason: String },

    #[error("unknown connection type '{value}' (expected CAMUNDA_CLOUD, INSECURE or SECURE)")]
    UnknownConnectionType { value: String },
}

impl RuntimeError {
    pub fn missing_env_var(name: impl Into<String>) -> Self {
        Self::MissingEnvVar { name: name.into() }
    }

    pub fn invalid_env_var(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidEnvVar { name: name.into(), reason: reason.to_string() }
    }
}
