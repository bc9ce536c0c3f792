//! Inbound task adapter and poll loop.
//!
//! Activating an inbound connector is fire-and-forget: the handler validates
//! the activation, spawns a background task and returns immediately with no
//! output variables. The background task probes the connector until a value
//! is available, then publishes a correlation message through the client
//! collaborator.
//!
//! Each activation moves through `Idle -> Polling -> Resolved -> Published`;
//! a loop that errors out ends at `Failed`. Poll attempts within one
//! activation are strictly sequential; attempt N+1 never starts before
//! attempt N returned and the cycle interval elapsed. There is no timeout:
//! the loop ends only when a probe resolves. The spawned handle is kept in
//! [`InboundTaskRegistry`] keyed by correlation key until the activation is
//! joined, which evicts the entry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use camunda_connector_core::{
    ConnectorConfig, InboundConnector, InboundDefinition, InvocationError, InvocationResult, Job,
    PublishError, ReturnKind, CORRELATION_KEY_VARIABLE, MESSAGE_NAME_VARIABLE,
};

use crate::handler::{JobHandler, OutputVariables};
use crate::publish::MessagePublisher;

/// Lifecycle of one inbound activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
    Resolved,
    Published,
    /// The poll loop ended with an error before publishing.
    Failed,
}

struct Activation {
    handle: Option<JoinHandle<()>>,
    state: Arc<RwLock<PollState>>,
}

/// Tracks running inbound activations by correlation key.
#[derive(Clone, Default)]
pub struct InboundTaskRegistry {
    inner: Arc<Mutex<HashMap<String, Activation>>>,
}

impl InboundTaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    async fn insert(
        &self,
        correlation_key: String,
        handle: JoinHandle<()>,
        state: Arc<RwLock<PollState>>,
    ) {
        let mut inner = self.inner.lock().await;
        if inner.contains_key(&correlation_key) {
            warn!(
                correlation_key = %correlation_key,
                "replacing an existing inbound activation; the old poll loop keeps running detached"
            );
        }
        inner.insert(correlation_key, Activation { handle: Some(handle), state });
    }

    /// Current state of the activation registered under the key.
    pub async fn state(&self, correlation_key: &str) -> Option<PollState> {
        let inner = self.inner.lock().await;
        match inner.get(correlation_key) {
            Some(activation) => Some(*activation.state.read().await),
            None => None,
        }
    }

    pub async fn contains(&self, correlation_key: &str) -> bool {
        self.inner.lock().await.contains_key(correlation_key)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Wait for the activation's poll loop to finish and evict its entry,
    /// returning the final state. `None` when no activation is registered
    /// under the key.
    pub async fn join(&self, correlation_key: &str) -> Option<PollState> {
        let activation = self.inner.lock().await.remove(correlation_key)?;
        if let Some(handle) = activation.handle {
            let _ = handle.await;
        }
        let state = *activation.state.read().await;
        Some(state)
    }
}

/// Handler produced by [`to_task`].
pub struct InboundTask<C> {
    definition: Arc<InboundDefinition<C>>,
    client: Arc<dyn MessagePublisher>,
    registry: InboundTaskRegistry,
}

impl<C: InboundConnector> InboundTask<C> {
    pub fn new(
        definition: Arc<InboundDefinition<C>>,
        client: Arc<dyn MessagePublisher>,
        registry: InboundTaskRegistry,
    ) -> Self {
        Self { definition, client, registry }
    }
}

/// Adapt a validated inbound definition into a job handler that registers
/// its poll loops with the given registry.
pub fn to_task<C: InboundConnector>(
    definition: Arc<InboundDefinition<C>>,
    client: Arc<dyn MessagePublisher>,
    registry: InboundTaskRegistry,
) -> Arc<dyn JobHandler> {
    Arc::new(InboundTask::new(definition, client, registry))
}

#[async_trait]
impl<C: InboundConnector> JobHandler for InboundTask<C> {
    async fn handle(&self, job: Job) -> InvocationResult<Option<OutputVariables>> {
        let config = self.definition.shared_config();

        let correlation_key =
            require_string_variable(&config.name, &job.variables, CORRELATION_KEY_VARIABLE)?;
        let message_name =
            require_string_variable(&config.name, &job.variables, MESSAGE_NAME_VARIABLE)?;

        let connector = self.definition.instantiate(&job.variables)?;

        debug!(
            connector = %config.name,
            correlation_key = %correlation_key,
            message_name = %message_name,
            "starting inbound poll loop"
        );

        let state = Arc::new(RwLock::new(PollState::Idle));
        let cycle = PollCycle {
            connector,
            config: Arc::clone(&config),
            client: Arc::clone(&self.client),
            correlation_key: correlation_key.clone(),
            message_name,
            state: Arc::clone(&state),
        };

        let task_state = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            if let Err(e) = cycle.run().await {
                error!(error = %e, "inbound poll loop failed");
                *task_state.write().await = PollState::Failed;
            }
        });
        self.registry.insert(correlation_key, handle, state).await;

        // Fire-and-forget: the activating job itself produces no result.
        Ok(None)
    }
}

struct PollCycle<C> {
    connector: C,
    config: Arc<ConnectorConfig>,
    client: Arc<dyn MessagePublisher>,
    correlation_key: String,
    message_name: String,
    state: Arc<RwLock<PollState>>,
}

impl<C: InboundConnector> PollCycle<C> {
    async fn run(self) -> InvocationResult<()> {
        self.transition(PollState::Polling).await;

        let mut attempt: u64 = 0;
        let value = loop {
            attempt += 1;
            let probed = self
                .connector
                .poll(&self.config)
                .await
                .map_err(|e| InvocationError::connector(&self.config.name, e))?;

            match probed {
                Some(value) => break value,
                None => {
                    trace!(
                        connector = %self.config.name,
                        correlation_key = %self.correlation_key,
                        attempt,
                        "probe returned nothing, waiting for next cycle"
                    );
                    tokio::time::sleep(self.config.cycle_duration).await;
                }
            }
        };

        // Structured records arrive as plain mappings; anything else is an
        // invalid resolution and goes through the failure path.
        let variables = match value {
            JsonValue::Object(map) => map,
            other => {
                return Err(InvocationError::InvalidProbeResult {
                    connector: self.config.name.clone(),
                    actual: ReturnKind::of_value(&other),
                })
            }
        };

        self.transition(PollState::Resolved).await;

        self.client
            .publish_message(&self.message_name, &self.correlation_key, variables)
            .await
            .map_err(|source: PublishError| InvocationError::Publish {
                connector: self.config.name.clone(),
                message_name: self.message_name.clone(),
                source,
            })?;

        self.transition(PollState::Published).await;

        info!(
            connector = %self.config.name,
            correlation_key = %self.correlation_key,
            message_name = %self.message_name,
            attempts = attempt,
            "inbound connector resolved and message published"
        );

        Ok(())
    }

    async fn transition(&self, state: PollState) {
        *self.state.write().await = state;
    }
}

fn require_string_variable(
    connector: &str,
    variables: &Map<String, JsonValue>,
    name: &str,
) -> InvocationResult<String> {
    match variables.get(name) {
        Some(JsonValue::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(_) => Err(InvocationError::argument_validation(
            connector,
            format!("variable '{name}' must be a non-empty string"),
        )),
        None => Err(InvocationError::argument_validation(
            connector,
            format!("missing required variable '{name}'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryMessagePublisher;
    use async_trait::async_trait;
    use camunda_connector_core::{
        ConnectorDeclaration, ConnectorResult, InputField, ReturnTypeDecl,
    };
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn activation_job() -> Job {
        Job::with_variables(json!({
            "correlation_key": "key_x",
            "message_name": "test_message",
        }))
    }

    fn setup<C: InboundConnector>(
    ) -> (Arc<dyn JobHandler>, Arc<MemoryMessagePublisher>, InboundTaskRegistry) {
        let definition = Arc::new(InboundDefinition::<C>::new().unwrap());
        let client = Arc::new(MemoryMessagePublisher::new());
        let registry = InboundTaskRegistry::new();
        let handler = to_task(definition, client.clone() as Arc<dyn MessagePublisher>, registry.clone());
        (handler, client, registry)
    }

    static SECOND_TRY_ATTEMPTS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Deserialize)]
    struct SecondTry {}

    // Resolves on the second probe attempt.
    #[async_trait]
    impl InboundConnector for SecondTry {
        fn declaration() -> ConnectorDeclaration {
            ConnectorDeclaration::new()
                .config(json!({"name": "SecondTry", "type": "second_try", "cycle_duration": 5}))
                .returns(ReturnTypeDecl::record())
        }

        async fn poll(&self, _config: &ConnectorConfig) -> ConnectorResult<Option<JsonValue>> {
            if SECOND_TRY_ATTEMPTS.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(None)
            } else {
                Ok(Some(json!({"x": 42})))
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_after_two_attempts_separated_by_one_cycle() {
        let (handler, client, registry) = setup::<SecondTry>();
        let started = tokio::time::Instant::now();

        let output = handler.handle(activation_job()).await.unwrap();
        assert!(output.is_none(), "activation must not produce a result");

        assert_eq!(registry.join("key_x").await, Some(PollState::Published));

        assert_eq!(SECOND_TRY_ATTEMPTS.load(Ordering::SeqCst), 2);
        assert_eq!(started.elapsed(), Duration::from_secs(5));

        let messages = client.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message_name, "test_message");
        assert_eq!(messages[0].correlation_key, "key_x");
        assert_eq!(messages[0].variables.get("x"), Some(&json!(42)));
    }

    #[derive(Deserialize)]
    struct Scalar {}

    // Resolves to a bare number instead of an object.
    #[async_trait]
    impl InboundConnector for Scalar {
        fn declaration() -> ConnectorDeclaration {
            ConnectorDeclaration::new()
                .config(json!({"name": "Scalar", "type": "scalar"}))
                .returns(ReturnTypeDecl::record())
        }

        async fn poll(&self, _config: &ConnectorConfig) -> ConnectorResult<Option<JsonValue>> {
            Ok(Some(json!(42)))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn non_object_resolution_publishes_nothing() {
        let (handler, client, registry) = setup::<Scalar>();

        handler.handle(activation_job()).await.unwrap();
        assert_eq!(registry.join("key_x").await, Some(PollState::Failed));

        assert!(client.messages().await.is_empty());
    }

    #[derive(Deserialize)]
    struct WithInput {
        #[allow(dead_code)]
        counter: i64,
    }

    #[async_trait]
    impl InboundConnector for WithInput {
        fn declaration() -> ConnectorDeclaration {
            ConnectorDeclaration::new()
                .config(json!({"name": "WithInput", "type": "with_input"}))
                .input(InputField::new("counter"))
                .returns(ReturnTypeDecl::record())
        }

        async fn poll(&self, _config: &ConnectorConfig) -> ConnectorResult<Option<JsonValue>> {
            Ok(Some(json!({"done": true})))
        }
    }

    #[tokio::test]
    async fn missing_correlation_key_aborts_activation() {
        let (handler, client, registry) = setup::<WithInput>();

        let job = Job::with_variables(json!({"message_name": "m", "counter": 1}));
        let err = handler.handle(job).await.unwrap_err();
        assert!(matches!(err, InvocationError::ArgumentValidation { .. }));

        assert!(registry.is_empty().await);
        assert!(client.messages().await.is_empty());
    }

    #[tokio::test]
    async fn invalid_input_aborts_before_spawning() {
        let (handler, _client, registry) = setup::<WithInput>();

        let job = Job::with_variables(json!({
            "correlation_key": "key_x",
            "message_name": "m",
            "counter": "not a number",
        }));
        let err = handler.handle(job).await.unwrap_err();
        assert!(matches!(err, InvocationError::ArgumentValidation { .. }));
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn join_on_unknown_key_returns_none() {
        let registry = InboundTaskRegistry::new();
        assert_eq!(registry.join("nope").await, None);
        assert_eq!(registry.state("nope").await, None);
    }

    #[tokio::test]
    async fn joined_activations_are_evicted() {
        let (handler, _client, registry) = setup::<WithInput>();

        for key in ["a", "b", "c"] {
            let job = Job::with_variables(json!({
                "correlation_key": key,
                "message_name": "m",
                "counter": 1,
            }));
            handler.handle(job).await.unwrap();
        }
        assert_eq!(registry.len().await, 3);

        for key in ["a", "b", "c"] {
            assert_eq!(registry.join(key).await, Some(PollState::Published));
        }
        assert!(registry.is_empty().await);
    }
}
