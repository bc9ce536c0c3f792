//! The connector capability traits.
//!
//! A connector is a unit of user logic invoked as a service-task handler.
//! Its input fields are the fields of the implementing struct, deserialized
//! from the job's variables; its shape (config, inputs, return type) is
//! described by [`ConnectorDeclaration`] and validated once at registration.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::config::ConnectorConfig;
use crate::declaration::ConnectorDeclaration;
use crate::error::ConnectorError;

/// Result of user connector logic.
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Single-invocation connector: call, get result, done.
///
/// `run` returns the produced value as JSON; a connector whose declared
/// return type is `none` returns `JsonValue::Null`. The actual value is
/// checked against the declared contract by the task adapter on every
/// invocation.
#[async_trait]
pub trait OutboundConnector: DeserializeOwned + Send + Sync + 'static {
    /// The declared shape of this connector type.
    fn declaration() -> ConnectorDeclaration;

    /// The connector logic, invoked once per job.
    async fn run(&self, config: &ConnectorConfig) -> ConnectorResult<JsonValue>;
}

/// Polling connector: repeatedly probes until a result is available, then a
/// correlation message is emitted on its behalf.
///
/// `poll` returning `Ok(None)` means "not yet available"; the adapter waits
/// for the configured cycle duration and probes again. Only a `Some` value
/// resolves the loop, so falsy values such as `false` or `0` inside the
/// returned object do resolve it.
#[async_trait]
pub trait InboundConnector: DeserializeOwned + Send + Sync + 'static {
    /// The declared shape of this connector type.
    fn declaration() -> ConnectorDeclaration;

    /// One probe attempt. The resolved value must be a JSON object; its
    /// entries become the variables of the published message.
    async fn poll(&self, config: &ConnectorConfig) -> ConnectorResult<Option<JsonValue>>;
}
