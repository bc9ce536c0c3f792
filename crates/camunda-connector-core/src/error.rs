//! Error types for the connector definition and invocation layers.
//!
//! Errors split into two classes by timing: [`DefinitionError`] is fatal and
//! aborts construction of a connector type entirely, while
//! [`InvocationError`] is scoped to a single job and is reported back to the
//! engine, which owns the retry policy.

use thiserror::Error;

use crate::contract::ReturnKind;

/// Errors raised while validating a connector type declaration.
///
/// These abort registration of the connector type; the declaration must be
/// fixed and the process restarted. No retry is meaningful.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("connector '{connector}' is missing its config declaration")]
    MissingConfig { connector: String },

    #[error(
        "connector '{connector}' config field '{field}': expected {expected}, got {actual}"
    )]
    InvalidConfigField { connector: String, field: String, expected: String, actual: String },

    #[error(
        "connector '{connector}' does not declare a return type; \
         connectors that return nothing must declare it explicitly"
    )]
    MissingReturnAnnotation { connector: String },

    #[error("connector '{connector}' declares an unsupported return type '{declared}'")]
    UnsupportedReturnType { connector: String, declared: String },
}

impl DefinitionError {
    pub fn missing_config(connector: impl Into<String>) -> Self {
        Self::MissingConfig { connector: connector.into() }
    }

    pub fn invalid_config_field(
        connector: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidConfigField {
            connector: connector.into(),
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Failure raised by user connector logic.
///
/// Connector `run`/`poll` implementations return this to signal a business
/// failure; the adapter wraps it with the connector name before handing it to
/// the engine.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ConnectorError(String);

impl ConnectorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<String> for ConnectorError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for ConnectorError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

/// Failure while publishing a correlation message through the client
/// collaborator.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct PublishError(String);

impl PublishError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors raised while handling a single job activation.
///
/// These propagate through the handler's failure path to the external engine
/// with enough context (connector name, expected vs. actual) to diagnose
/// without inspecting internals.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("failed to validate arguments for connector '{connector}': {reason}")]
    ArgumentValidation { connector: String, reason: String },

    #[error("connector '{connector}' declared return type {expected} but returned {actual}")]
    ReturnTypeMismatch { connector: String, expected: ReturnKind, actual: ReturnKind },

    #[error("connector '{connector}' failed: {source}")]
    Connector {
        connector: String,
        #[source]
        source: ConnectorError,
    },

    #[error(
        "inbound connector '{connector}' resolved to an invalid value: \
         expected an object, got {actual}"
    )]
    InvalidProbeResult { connector: String, actual: ReturnKind },

    #[error("failed to publish message '{message_name}' for connector '{connector}': {source}")]
    Publish {
        connector: String,
        message_name: String,
        #[source]
        source: PublishError,
    },
}

impl InvocationError {
    pub fn argument_validation(connector: impl Into<String>, reason: impl ToString) -> Self {
        Self::ArgumentValidation { connector: connector.into(), reason: reason.to_string() }
    }

    pub fn connector(connector: impl Into<String>, source: ConnectorError) -> Self {
        Self::Connector { connector: connector.into(), source }
    }
}

/// Result alias for definition-time operations.
pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// Result alias for per-job operations.
pub type InvocationResult<T> = Result<T, InvocationError>;
