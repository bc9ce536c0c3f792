//! Validated connector definitions.
//!
//! A definition is the result of running the schema validator and the
//! return-type contract checker over a connector type's declaration. It is
//! built exactly once per type and shared read-only across every activation,
//! so no locking is needed at invocation time.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::config::{ConnectorConfig, ConnectorKind};
use crate::connector::{InboundConnector, OutboundConnector};
use crate::contract::ReturnKind;
use crate::declaration::InputField;
use crate::error::{DefinitionResult, InvocationError, InvocationResult};

/// Read-only view over a validated definition, shared by both variants.
///
/// The template synthesizer and the registry select behavior through this
/// interface instead of downcasting.
pub trait ConnectorDefinition {
    fn kind(&self) -> ConnectorKind;
    fn config(&self) -> &ConnectorConfig;
    fn inputs(&self) -> &[InputField];
    fn returns(&self) -> ReturnKind;
}

/// A validated outbound connector type.
#[derive(Debug)]
pub struct OutboundDefinition<C> {
    config: Arc<ConnectorConfig>,
    inputs: Vec<InputField>,
    returns: ReturnKind,
    _connector: PhantomData<fn() -> C>,
}

impl<C: OutboundConnector> OutboundDefinition<C> {
    /// Validate the connector's declaration and synthesize its config.
    pub fn new() -> DefinitionResult<Self> {
        let declaration = C::declaration();
        let label = connector_label::<C>();

        let config = ConnectorConfig::synthesize(
            ConnectorKind::Outbound,
            label,
            declaration.config.as_ref(),
        )?;
        let returns = ReturnKind::from_declaration(&config.name, declaration.returns.as_ref())?;

        debug!(
            connector = %config.name,
            task_type = %config.task_type,
            "validated outbound connector definition"
        );

        Ok(Self {
            config: Arc::new(config),
            inputs: declaration.inputs,
            returns,
            _connector: PhantomData,
        })
    }

    /// Shared handle to the synthesized config.
    pub fn shared_config(&self) -> Arc<ConnectorConfig> {
        Arc::clone(&self.config)
    }

    /// Build the per-activation connector instance from job variables.
    pub fn instantiate(&self, variables: &Map<String, JsonValue>) -> InvocationResult<C> {
        instantiate(&self.config.name, variables)
    }
}

impl<C: OutboundConnector> ConnectorDefinition for OutboundDefinition<C> {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Outbound
    }

    fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    fn inputs(&self) -> &[InputField] {
        &self.inputs
    }

    fn returns(&self) -> ReturnKind {
        self.returns
    }
}

/// A validated inbound connector type.
#[derive(Debug)]
pub struct InboundDefinition<C> {
    config: Arc<ConnectorConfig>,
    inputs: Vec<InputField>,
    returns: ReturnKind,
    _connector: PhantomData<fn() -> C>,
}

impl<C: InboundConnector> InboundDefinition<C> {
    /// Validate the connector's declaration and synthesize its config.
    pub fn new() -> DefinitionResult<Self> {
        let declaration = C::declaration();
        let label = connector_label::<C>();

        let config = ConnectorConfig::synthesize(
            ConnectorKind::Inbound,
            label,
            declaration.config.as_ref(),
        )?;
        let returns = ReturnKind::from_declaration(&config.name, declaration.returns.as_ref())?;

        debug!(
            connector = %config.name,
            task_type = %config.task_type,
            cycle_duration = ?config.cycle_duration,
            "validated inbound connector definition"
        );

        Ok(Self {
            config: Arc::new(config),
            inputs: declaration.inputs,
            returns,
            _connector: PhantomData,
        })
    }

    /// Shared handle to the synthesized config.
    pub fn shared_config(&self) -> Arc<ConnectorConfig> {
        Arc::clone(&self.config)
    }

    /// Build the per-activation connector instance from job variables.
    pub fn instantiate(&self, variables: &Map<String, JsonValue>) -> InvocationResult<C> {
        instantiate(&self.config.name, variables)
    }
}

impl<C: InboundConnector> ConnectorDefinition for InboundDefinition<C> {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Inbound
    }

    fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    fn inputs(&self) -> &[InputField] {
        &self.inputs
    }

    fn returns(&self) -> ReturnKind {
        self.returns
    }
}

fn instantiate<C: serde::de::DeserializeOwned>(
    connector: &str,
    variables: &Map<String, JsonValue>,
) -> InvocationResult<C> {
    serde_json::from_value(JsonValue::Object(variables.clone()))
        .map_err(|e| InvocationError::argument_validation(connector, e))
}

/// Short type name used in errors raised before the config name is known.
fn connector_label<C>() -> &'static str {
    let full = std::any::type_name::<C>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::ConnectorResult;
    use crate::contract::ReturnTypeDecl;
    use crate::declaration::ConnectorDeclaration;
    use crate::error::DefinitionError;
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Dummy {
        flag: bool,
    }

    #[async_trait]
    impl OutboundConnector for Dummy {
        fn declaration() -> ConnectorDeclaration {
            ConnectorDeclaration::new()
                .config(json!({"name": "dummy", "type": "dummy", "timeout": 10}))
                .input(InputField::new("flag"))
                .returns(ReturnTypeDecl::boolean())
        }

        async fn run(&self, _config: &ConnectorConfig) -> ConnectorResult<JsonValue> {
            Ok(json!(self.flag))
        }
    }

    #[derive(Debug, Deserialize)]
    struct NoConfig {}

    #[async_trait]
    impl OutboundConnector for NoConfig {
        fn declaration() -> ConnectorDeclaration {
            ConnectorDeclaration::new().returns(ReturnTypeDecl::unit())
        }

        async fn run(&self, _config: &ConnectorConfig) -> ConnectorResult<JsonValue> {
            Ok(JsonValue::Null)
        }
    }

    #[derive(Debug, Deserialize)]
    struct NoReturn {}

    #[async_trait]
    impl OutboundConnector for NoReturn {
        fn declaration() -> ConnectorDeclaration {
            ConnectorDeclaration::new().config(json!({"name": "dummy", "type": "dummy"}))
        }

        async fn run(&self, _config: &ConnectorConfig) -> ConnectorResult<JsonValue> {
            Ok(JsonValue::Null)
        }
    }

    #[test]
    fn valid_declaration_builds_definition() {
        let definition = OutboundDefinition::<Dummy>::new().unwrap();
        assert_eq!(definition.config().name, "dummy");
        assert_eq!(definition.config().task_type, "dummy");
        assert_eq!(definition.returns(), ReturnKind::Bool);
        assert_eq!(definition.kind(), ConnectorKind::Outbound);
    }

    #[test]
    fn missing_config_fails_with_type_label() {
        let err = OutboundDefinition::<NoConfig>::new().unwrap_err();
        match err {
            DefinitionError::MissingConfig { connector } => assert_eq!(connector, "NoConfig"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_return_annotation_fails() {
        let err = OutboundDefinition::<NoReturn>::new().unwrap_err();
        assert!(matches!(err, DefinitionError::MissingReturnAnnotation { .. }));
    }

    #[test]
    fn instantiate_validates_variables() {
        let definition = OutboundDefinition::<Dummy>::new().unwrap();

        let variables = json!({"flag": true});
        let instance = definition
            .instantiate(variables.as_object().unwrap())
            .unwrap();
        assert!(instance.flag);

        let bad = json!({"flag": "yes"});
        let err = definition.instantiate(bad.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, InvocationError::ArgumentValidation { .. }));
    }
}
