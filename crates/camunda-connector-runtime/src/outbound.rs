//! Outbound task adapter.
//!
//! Wraps a validated outbound definition into a single-invocation handler
//! matching the engine's job-handler calling convention. The adapter has no
//! side effects beyond the returned variables; it never talks to the engine
//! directly.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use camunda_connector_core::{
    ConnectorDefinition, InvocationError, InvocationResult, Job, OutboundConnector,
    OutboundDefinition,
};

use crate::handler::{JobHandler, OutputVariables};

/// Handler produced by [`to_task`].
pub struct OutboundTask<C> {
    definition: Arc<OutboundDefinition<C>>,
}

impl<C: OutboundConnector> OutboundTask<C> {
    pub fn new(definition: Arc<OutboundDefinition<C>>) -> Self {
        Self { definition }
    }
}

/// Adapt a validated outbound definition into a job handler.
pub fn to_task<C: OutboundConnector>(definition: Arc<OutboundDefinition<C>>) -> Arc<dyn JobHandler> {
    Arc::new(OutboundTask::new(definition))
}

#[async_trait]
impl<C: OutboundConnector> JobHandler for OutboundTask<C> {
    async fn handle(&self, job: Job) -> InvocationResult<Option<OutputVariables>> {
        let definition = &self.definition;
        let config = definition.config();

        // The instance lives for this invocation only; a validation failure
        // aborts before any user logic runs.
        let connector = definition.instantiate(&job.variables)?;

        debug!(connector = %config.name, job_key = job.key, "executing outbound connector");

        let value = connector
            .run(config)
            .await
            .map_err(|e| InvocationError::connector(&config.name, e))?;

        definition.returns().check(&config.name, &value)?;

        // Structured records are already plain JSON mappings at this point;
        // the declared-unit contract yields an explicit null.
        let target = job
            .result_variable()
            .map(str::to_string)
            .or_else(|| config.output_variable_name.clone());

        Ok(target.map(|name| {
            let mut variables = OutputVariables::new();
            variables.insert(name, value);
            variables
        }))
    }
}
