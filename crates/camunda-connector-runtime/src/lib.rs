//! Runtime layer of the Camunda 8 connector SDK.
//!
//! Adapts validated connector definitions into the engine's job-handler
//! calling convention: outbound connectors become single-invocation
//! handlers, inbound connectors become fire-and-forget poll loops that
//! publish a correlation message once resolved. The transport itself (gRPC
//! channel, polling, publishing) stays behind the [`worker::JobWorker`] and
//! [`publish::MessagePublisher`] boundary traits.

pub mod connection;
pub mod error;
pub mod handler;
pub mod inbound;
pub mod memory;
pub mod outbound;
pub mod publish;
pub mod runtime;
pub mod worker;

pub use connection::ConnectionConfig;
pub use error::{RuntimeError, RuntimeResult};
pub use handler::{JobHandler, OutputVariables};
pub use inbound::{InboundTask, InboundTaskRegistry, PollState};
pub use memory::{MemoryJobWorker, MemoryMessagePublisher, PublishedMessage};
pub use outbound::OutboundTask;
pub use publish::MessagePublisher;
pub use runtime::ConnectorRuntime;
pub use worker::JobWorker;
