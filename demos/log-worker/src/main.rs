//! Demo worker: a `Log` outbound connector and a `Sleep` inbound connector
//! registered with the runtime and driven through the in-memory worker fake.
//!
//! With `--template-dir` the demo writes the element templates of both
//! connectors instead of running the simulated activations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tracing::info;

use camunda_connector_core::{
    ConnectorConfig, ConnectorDeclaration, ConnectorResult, InboundConnector, InputField, Job,
    OutboundConnector, ReturnTypeDecl, RESULT_VARIABLE_HEADER,
};
use camunda_connector_runtime::{
    ConnectionConfig, ConnectorRuntime, MemoryJobWorker, MemoryMessagePublisher,
};

#[derive(Deserialize)]
struct Log {
    message: String,
}

#[async_trait]
impl OutboundConnector for Log {
    fn declaration() -> ConnectorDeclaration {
        ConnectorDeclaration::new()
            .config(json!({"name": "Log", "type": "log", "timeout": 10}))
            .input(InputField::new("message").description("Message to log"))
            .returns(ReturnTypeDecl::record())
    }

    async fn run(&self, _config: &ConnectorConfig) -> ConnectorResult<JsonValue> {
        info!(message = %self.message, "LogConnector");
        Ok(json!({"status": "ok"}))
    }
}

#[derive(Deserialize)]
struct Sleep {
    duration: u64,
}

#[async_trait]
impl InboundConnector for Sleep {
    fn declaration() -> ConnectorDeclaration {
        ConnectorDeclaration::new()
            .config(json!({"name": "Sleep", "type": "sleep", "cycle_duration": 1}))
            .input(InputField::new("duration").description("Duration of sleep in seconds"))
            .returns(ReturnTypeDecl::record())
    }

    async fn poll(&self, _config: &ConnectorConfig) -> ConnectorResult<Option<JsonValue>> {
        tokio::time::sleep(Duration::from_secs(self.duration)).await;
        Ok(Some(json!({"slept": self.duration})))
    }
}

#[derive(Parser)]
#[command(about = "Run the demo connectors against in-memory engine fakes")]
struct Args {
    /// Write the connectors' element templates to this directory and exit.
    #[arg(long)]
    template_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let connection = ConnectionConfig::from_env().unwrap_or(ConnectionConfig::Insecure {
        hostname: "127.0.0.1".to_string(),
        port: 26500,
    });

    let client = Arc::new(MemoryMessagePublisher::new());
    let runtime = ConnectorRuntime::new(connection, client.clone())
        .with_outbound::<Log>()?
        .with_inbound::<Sleep>()?;

    if let Some(dir) = args.template_dir {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating {}", dir.display()))?;
        for template in runtime.templates() {
            let path = dir.join(format!("{}.json", template.name.to_lowercase()));
            std::fs::write(&path, template.to_json_pretty()?)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(template = %template.name, path = %path.display(), "template written");
        }
        return Ok(());
    }

    let mut worker = MemoryJobWorker::new();
    runtime.bind(&mut worker);

    // One outbound activation.
    let job = Job::with_variables(json!({"message": "hi"}))
        .with_header(RESULT_VARIABLE_HEADER, "status");
    let output = worker
        .activate("log", job)
        .await
        .context("no subscription for task type 'log'")??;
    info!(?output, "log connector completed");

    // One inbound activation; wait for the poll loop to publish.
    let job = Job::with_variables(json!({
        "correlation_key": "demo-1",
        "message_name": "slept",
        "duration": 1,
    }));
    worker
        .activate("sleep", job)
        .await
        .context("no subscription for task type 'sleep'")??;
    let state = runtime.inbound_tasks().join("demo-1").await;
    info!(?state, "inbound activation finished");

    for message in client.messages().await {
        info!(
            message_name = %message.message_name,
            correlation_key = %message.correlation_key,
            variables = %JsonValue::Object(message.variables.clone()),
            "correlation message published"
        );
    }

    Ok(())
}
