//! Boundary trait for the correlation-message publish call.
//!
//! The actual gRPC client is owned by the external worker library; the
//! inbound adapter only needs this one call.

use async_trait::async_trait;

use camunda_connector_core::PublishError;

use crate::handler::OutputVariables;

/// Publishes a correlation message to the engine.
///
/// The correlation key is what the engine uses to match the message to a
/// waiting process instance.
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    async fn publish_message(
        &self,
        message_name: &str,
        correlation_key: &str,
        variables: OutputVariables,
    ) -> Result<(), PublishError>;
}
