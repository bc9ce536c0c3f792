//! The runtime registry.
//!
//! Holds the set of registered connector types and binds each one to the
//! worker through the adapters. Definition-time validation runs eagerly when
//! a connector is added, so a malformed declaration fails construction of
//! the runtime rather than surfacing on the first job.

use std::sync::Arc;

use tracing::info;

use camunda_connector_core::{
    generate_template, ConnectorConfig, ConnectorKind, InboundConnector, InboundDefinition,
    OutboundConnector, OutboundDefinition, Template,
};

use crate::connection::ConnectionConfig;
use crate::error::RuntimeResult;
use crate::handler::JobHandler;
use crate::inbound::InboundTaskRegistry;
use crate::publish::MessagePublisher;
use crate::worker::JobWorker;
use crate::{inbound, outbound};

struct Registration {
    kind: ConnectorKind,
    config: Arc<ConnectorConfig>,
    template: Template,
    handler: Arc<dyn JobHandler>,
}

/// Registry of connector types bound to one engine connection.
pub struct ConnectorRuntime {
    connection: ConnectionConfig,
    client: Arc<dyn MessagePublisher>,
    inbound_tasks: InboundTaskRegistry,
    registrations: Vec<Registration>,
}

impl ConnectorRuntime {
    pub fn new(connection: ConnectionConfig, client: Arc<dyn MessagePublisher>) -> Self {
        Self {
            connection,
            client,
            inbound_tasks: InboundTaskRegistry::new(),
            registrations: Vec::new(),
        }
    }

    /// Build a runtime with the connection configured from the environment.
    pub fn from_env(client: Arc<dyn MessagePublisher>) -> RuntimeResult<Self> {
        Ok(Self::new(ConnectionConfig::from_env()?, client))
    }

    /// Register an outbound connector type, validating its declaration now.
    pub fn with_outbound<C: OutboundConnector>(mut self) -> RuntimeResult<Self> {
        let definition = Arc::new(OutboundDefinition::<C>::new()?);
        let template = generate_template(&*definition);
        let config = definition.shared_config();
        let handler = outbound::to_task(definition);

        info!(
            connector = %config.name,
            task_type = %config.task_type,
            "registered outbound connector"
        );

        self.registrations.push(Registration {
            kind: ConnectorKind::Outbound,
            config,
            template,
            handler,
        });
        Ok(self)
    }

    /// Register an inbound connector type, validating its declaration now.
    pub fn with_inbound<C: InboundConnector>(mut self) -> RuntimeResult<Self> {
        let definition = Arc::new(InboundDefinition::<C>::new()?);
        let template = generate_template(&*definition);
        let config = definition.shared_config();
        let handler =
            inbound::to_task(definition, Arc::clone(&self.client), self.inbound_tasks.clone());

        info!(
            connector = %config.name,
            task_type = %config.task_type,
            "registered inbound connector"
        );

        self.registrations.push(Registration {
            kind: ConnectorKind::Inbound,
            config,
            template,
            handler,
        });
        Ok(self)
    }

    /// Subscribe every registered connector with the worker.
    pub fn bind(&self, worker: &mut dyn JobWorker) {
        for registration in &self.registrations {
            info!(
                connector = %registration.config.name,
                task_type = %registration.config.task_type,
                kind = registration.kind.as_str(),
                "binding connector to worker"
            );
            worker.subscribe(
                &registration.config.task_type,
                registration.config.timeout,
                Arc::clone(&registration.handler),
            );
        }
    }

    /// Element templates for every registered connector.
    pub fn templates(&self) -> Vec<&Template> {
        self.registrations.iter().map(|r| &r.template).collect()
    }

    pub fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    /// Running inbound activations, keyed by correlation key.
    pub fn inbound_tasks(&self) -> &InboundTaskRegistry {
        &self.inbound_tasks
    }
}
