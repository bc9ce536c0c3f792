//! Authored connector declarations.
//!
//! A declaration is the raw shape a connector author writes down: the config
//! block, the input fields, and the declared return type. It is validated
//! exactly once when the connector type is registered; see
//! [`crate::definition`].

use serde_json::Value as JsonValue;

use crate::contract::ReturnTypeDecl;

/// One declared input field of a connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    pub name: String,
    /// Human-readable description; used as the template property label,
    /// falling back to the field name.
    pub description: Option<String>,
}

impl InputField {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), description: None }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Label shown in the generated template.
    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }
}

/// Raw declaration attached to a connector type.
#[derive(Debug, Clone, Default)]
pub struct ConnectorDeclaration {
    /// The config block as declared, prior to validation.
    pub config: Option<JsonValue>,
    pub inputs: Vec<InputField>,
    pub returns: Option<ReturnTypeDecl>,
}

impl ConnectorDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: JsonValue) -> Self {
        self.config = Some(config);
        self
    }

    pub fn input(mut self, field: InputField) -> Self {
        self.inputs.push(field);
        self
    }

    pub fn returns(mut self, decl: ReturnTypeDecl) -> Self {
        self.returns = Some(decl);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn label_falls_back_to_field_name() {
        let plain = InputField::new("message");
        assert_eq!(plain.label(), "message");

        let described = InputField::new("message").description("Message to log");
        assert_eq!(described.label(), "Message to log");
    }

    #[test]
    fn builder_collects_parts() {
        let declaration = ConnectorDeclaration::new()
            .config(json!({"name": "Log", "type": "log"}))
            .input(InputField::new("message"))
            .returns(ReturnTypeDecl::record());

        assert!(declaration.config.is_some());
        assert_eq!(declaration.inputs.len(), 1);
        assert_eq!(declaration.returns, Some(ReturnTypeDecl::record()));
    }
}
