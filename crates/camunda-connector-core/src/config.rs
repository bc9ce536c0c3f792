//! Connector configuration synthesis and validation.
//!
//! A connector type carries a raw JSON config declaration. At registration
//! time the declaration is validated against the base contract for the
//! connector's variant and assembled into exactly one immutable
//! [`ConnectorConfig`]. This runs once per connector type, never per job,
//! which keeps per-activation overhead flat.

use std::time::Duration;

use serde_json::{Map, Value as JsonValue};
use tracing::warn;

use crate::error::{DefinitionError, DefinitionResult};

/// Default timeout applied when the declaration omits one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default wait interval between inbound poll attempts.
pub const DEFAULT_CYCLE_DURATION: Duration = Duration::from_secs(1);

/// The two task-adapter dispatch strategies a connector can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    /// Single invocation: call, get result, done.
    Outbound,
    /// Repeatedly probes until a result is available, then emits a
    /// correlation message.
    Inbound,
}

impl ConnectorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outbound => "outbound",
            Self::Inbound => "inbound",
        }
    }
}

/// Immutable configuration shared by all instances of a connector type.
///
/// Built once by [`ConnectorConfig::synthesize`]; `name` and `task_type` are
/// always present, their absence is a definition-time error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    /// Display name; also the name of the generated element template.
    pub name: String,
    /// Service-task type identifier the engine dispatches on.
    pub task_type: String,
    /// Job timeout reported to the engine at subscription time.
    pub timeout: Duration,
    /// Wait interval between poll attempts. Only meaningful for inbound
    /// connectors.
    pub cycle_duration: Duration,
    /// Fallback output variable name used when the job header does not name
    /// one.
    pub output_variable_name: Option<String>,
}

impl ConnectorConfig {
    /// Validate a raw config declaration and assemble the config value.
    ///
    /// Steps: require the declaration to be present, copy declared fields,
    /// apply base-contract defaults for absent ones, and type-check the
    /// result. A missing declaration fails with
    /// [`DefinitionError::MissingConfig`]; a malformed field fails with
    /// [`DefinitionError::InvalidConfigField`] naming the field.
    pub fn synthesize(
        kind: ConnectorKind,
        connector: &str,
        declaration: Option<&JsonValue>,
    ) -> DefinitionResult<Self> {
        let declared = declaration.ok_or_else(|| DefinitionError::missing_config(connector))?;

        let fields = declared.as_object().ok_or_else(|| {
            DefinitionError::invalid_config_field(
                connector,
                "config",
                "an object",
                json_type_name(declared),
            )
        })?;

        // Only the applicable subset of fields is copied; anything else in
        // the declaration is left alone.
        for key in fields.keys() {
            if !is_known_field(kind, key) {
                warn!(connector, field = %key, "ignoring unknown config field");
            }
        }

        let name = require_string(connector, fields, "name")?;
        let task_type = require_string(connector, fields, "type")?;

        let timeout = optional_seconds(connector, fields, "timeout")?.unwrap_or(DEFAULT_TIMEOUT);

        let cycle_duration = match kind {
            ConnectorKind::Inbound => optional_seconds(connector, fields, "cycle_duration")?
                .unwrap_or(DEFAULT_CYCLE_DURATION),
            ConnectorKind::Outbound => DEFAULT_CYCLE_DURATION,
        };

        let output_variable_name = optional_string(connector, fields, "output_variable_name")?;

        Ok(Self { name, task_type, timeout, cycle_duration, output_variable_name })
    }
}

fn is_known_field(kind: ConnectorKind, key: &str) -> bool {
    match key {
        "name" | "type" | "timeout" | "output_variable_name" => true,
        "cycle_duration" => kind == ConnectorKind::Inbound,
        _ => false,
    }
}

fn require_string(
    connector: &str,
    fields: &Map<String, JsonValue>,
    key: &str,
) -> DefinitionResult<String> {
    match fields.get(key) {
        Some(JsonValue::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(JsonValue::String(_)) => Err(DefinitionError::invalid_config_field(
            connector,
            key,
            "a non-empty string",
            "an empty string",
        )),
        Some(other) => Err(DefinitionError::invalid_config_field(
            connector,
            key,
            "a string",
            json_type_name(other),
        )),
        None => Err(DefinitionError::invalid_config_field(
            connector,
            key,
            "a string",
            "nothing",
        )),
    }
}

fn optional_string(
    connector: &str,
    fields: &Map<String, JsonValue>,
    key: &str,
) -> DefinitionResult<Option<String>> {
    match fields.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(DefinitionError::invalid_config_field(
            connector,
            key,
            "a string",
            json_type_name(other),
        )),
    }
}

/// Parse a duration field declared in whole seconds.
///
/// Accepts a positive integer or a string that parses as one, matching the
/// coercion the original declarations rely on.
fn optional_seconds(
    connector: &str,
    fields: &Map<String, JsonValue>,
    key: &str,
) -> DefinitionResult<Option<Duration>> {
    let value = match fields.get(key) {
        None | Some(JsonValue::Null) => return Ok(None),
        Some(value) => value,
    };

    let seconds = match value {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::String(s) => s.parse::<u64>().ok(),
        _ => None,
    };

    match seconds {
        Some(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(DefinitionError::invalid_config_field(
            connector,
            key,
            "a positive integer number of seconds",
            value.to_string(),
        )),
    }
}

pub(crate) fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
