//! The job activation handed to a connector handler.
//!
//! The job itself is owned by the external worker library; the core only
//! reads its input variables and header map.

use std::collections::HashMap;

use serde_json::{Map, Value as JsonValue};

/// Header key carrying the name of the process variable the result should be
/// written to.
pub const RESULT_VARIABLE_HEADER: &str = "resultVariable";

/// Variable carrying the correlation key of an inbound activation.
pub const CORRELATION_KEY_VARIABLE: &str = "correlation_key";

/// Variable carrying the message name of an inbound activation.
pub const MESSAGE_NAME_VARIABLE: &str = "message_name";

/// A single service-task activation.
#[derive(Debug, Clone, Default)]
pub struct Job {
    pub key: i64,
    /// Input variables of the activation.
    pub variables: Map<String, JsonValue>,
    /// Custom headers configured on the service task.
    pub custom_headers: HashMap<String, String>,
}

impl Job {
    pub fn new(variables: Map<String, JsonValue>) -> Self {
        Self { key: 0, variables, custom_headers: HashMap::new() }
    }

    /// Build a job from any JSON value; non-object values yield an empty
    /// variable map.
    pub fn with_variables(variables: JsonValue) -> Self {
        match variables {
            JsonValue::Object(map) => Self::new(map),
            _ => Self::new(Map::new()),
        }
    }

    pub fn with_key(mut self, key: i64) -> Self {
        self.key = key;
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(key.into(), value.into());
        self
    }

    /// The result-variable name from the job headers, if configured.
    pub fn result_variable(&self) -> Option<&str> {
        self.custom_headers.get(RESULT_VARIABLE_HEADER).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn result_variable_reads_header() {
        let job = Job::with_variables(json!({})).with_header(RESULT_VARIABLE_HEADER, "ret");
        assert_eq!(job.result_variable(), Some("ret"));

        let bare = Job::with_variables(json!({}));
        assert_eq!(bare.result_variable(), None);
    }
}
