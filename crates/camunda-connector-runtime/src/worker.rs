//! Boundary trait for the job worker.
//!
//! The polling loop against the engine is owned by the external worker
//! library; the runtime only subscribes handlers to task types.

use std::sync::Arc;
use std::time::Duration;

use crate::handler::JobHandler;

/// Subscribes connector handlers to service-task types.
pub trait JobWorker {
    fn subscribe(&mut self, task_type: &str, timeout: Duration, handler: Arc<dyn JobHandler>);
}
