//! In-memory worker and client fakes.
//!
//! Useful for tests and for running connectors without a live engine: the
//! worker records subscriptions and lets callers activate jobs directly, the
//! publisher records every published message.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use camunda_connector_core::{InvocationResult, Job, PublishError};

use crate::handler::{JobHandler, OutputVariables};
use crate::publish::MessagePublisher;
use crate::worker::JobWorker;

/// One recorded correlation message.
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub message_name: String,
    pub correlation_key: String,
    pub variables: OutputVariables,
}

/// Client fake that records published messages instead of sending them.
#[derive(Default)]
pub struct MemoryMessagePublisher {
    messages: Mutex<Vec<PublishedMessage>>,
}

impl MemoryMessagePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages published so far, in order.
    pub async fn messages(&self) -> Vec<PublishedMessage> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl MessagePublisher for MemoryMessagePublisher {
    async fn publish_message(
        &self,
        message_name: &str,
        correlation_key: &str,
        variables: OutputVariables,
    ) -> Result<(), PublishError> {
        self.messages.lock().await.push(PublishedMessage {
            message_name: message_name.to_string(),
            correlation_key: correlation_key.to_string(),
            variables,
        });
        Ok(())
    }
}

struct Subscription {
    timeout: Duration,
    handler: Arc<dyn JobHandler>,
}

/// Worker fake that holds subscriptions and dispatches jobs on demand.
#[derive(Default)]
pub struct MemoryJobWorker {
    subscriptions: HashMap<String, Subscription>,
}

impl MemoryJobWorker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task_types(&self) -> Vec<&str> {
        self.subscriptions.keys().map(String::as_str).collect()
    }

    pub fn timeout(&self, task_type: &str) -> Option<Duration> {
        self.subscriptions.get(task_type).map(|s| s.timeout)
    }

    /// Dispatch a job to the handler subscribed for the task type.
    ///
    /// `None` when no handler is subscribed for the task type.
    pub async fn activate(
        &self,
        task_type: &str,
        job: Job,
    ) -> Option<InvocationResult<Option<OutputVariables>>> {
        let subscription = self.subscriptions.get(task_type)?;
        Some(subscription.handler.handle(job).await)
    }
}

impl JobWorker for MemoryJobWorker {
    fn subscribe(&mut self, task_type: &str, timeout: Duration, handler: Arc<dyn JobHandler>) {
        self.subscriptions.insert(task_type.to_string(), Subscription { timeout, handler });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn activate_without_subscription_returns_none() {
        let worker = MemoryJobWorker::new();
        let result = worker.activate("unknown", Job::default()).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn publisher_records_messages_in_order() {
        let publisher = MemoryMessagePublisher::new();
        publisher
            .publish_message("first", "k1", OutputVariables::new())
            .await
            .unwrap();
        publisher
            .publish_message("second", "k2", OutputVariables::new())
            .await
            .unwrap();

        let messages = publisher.messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message_name, "first");
        assert_eq!(messages[1].correlation_key, "k2");
    }
}
