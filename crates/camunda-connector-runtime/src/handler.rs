//! The job-handler calling convention shared with the worker library.

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};

use camunda_connector_core::{InvocationResult, Job};

/// Output variables produced by a handler, keyed by variable name.
pub type OutputVariables = Map<String, JsonValue>;

/// A service-task handler in the calling convention the worker expects:
/// receive a job, return either nothing or a mapping of output-variable
/// names to values. Failures propagate to the engine, which owns retry.
#[async_trait]
pub trait JobHandler: Send + Sync {
    async fn handle(&self, job: Job) -> InvocationResult<Option<OutputVariables>>;
}
