//! Core definition layer of the Camunda 8 connector SDK.
//!
//! A connector is a unit of user logic invoked as a service-task handler by
//! the workflow engine. This crate owns everything that happens at
//! definition time — config synthesis, declaration validation, the
//! return-type contract — plus the element-template synthesizer that
//! describes a connector to the modeler. The task adapters and the worker
//! binding live in `camunda-connector-runtime`.

pub mod config;
pub mod connector;
pub mod contract;
pub mod declaration;
pub mod definition;
pub mod error;
pub mod job;
pub mod template;

pub use config::{ConnectorConfig, ConnectorKind, DEFAULT_CYCLE_DURATION, DEFAULT_TIMEOUT};
pub use connector::{ConnectorResult, InboundConnector, OutboundConnector};
pub use contract::{ReturnKind, ReturnTypeDecl};
pub use declaration::{ConnectorDeclaration, InputField};
pub use definition::{ConnectorDefinition, InboundDefinition, OutboundDefinition};
pub use error::{
    ConnectorError, DefinitionError, DefinitionResult, InvocationError, InvocationResult,
    PublishError,
};
pub use job::{Job, CORRELATION_KEY_VARIABLE, MESSAGE_NAME_VARIABLE, RESULT_VARIABLE_HEADER};
pub use template::{generate_template, Template};
