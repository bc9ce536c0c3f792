//! Template synthesis.
//!
//! Derives an element template from a validated connector definition: one
//! input property per declared field, an output property when the connector
//! produces a value, a hidden task-type property, and for inbound connectors
//! the correlation configuration properties.

use crate::config::ConnectorKind;
use crate::definition::ConnectorDefinition;
use crate::job::{CORRELATION_KEY_VARIABLE, MESSAGE_NAME_VARIABLE, RESULT_VARIABLE_HEADER};

use super::model::{Binding, Group, Property, Template};

/// Field names owned by the SDK; never emitted as connector inputs.
const RESERVED_FIELDS: [&str; 2] = [CORRELATION_KEY_VARIABLE, MESSAGE_NAME_VARIABLE];

/// Generate the element template describing a connector definition.
///
/// Pure function of the definition's config, input fields and return
/// contract; no side effects.
pub fn generate_template(definition: &dyn ConnectorDefinition) -> Template {
    let config = definition.config();

    let mut properties: Vec<Property> = definition
        .inputs()
        .iter()
        .filter(|field| !RESERVED_FIELDS.contains(&field.name.as_str()))
        .map(|field| Property {
            binding: Binding::input(field.name.clone()),
            label: Some(field.label().to_string()),
            property_type: Some("String".to_string()),
            value: None,
            group: Some("input".to_string()),
            feel: Some("optional".to_string()),
        })
        .collect();

    if definition.returns().produces_value() {
        properties.push(Property {
            binding: Binding::task_header(RESULT_VARIABLE_HEADER),
            label: Some("Result variable".to_string()),
            property_type: Some("String".to_string()),
            value: None,
            group: Some("output".to_string()),
            feel: None,
        });
    }

    // Wires the generated UI to the correct handler.
    properties.push(Property {
        binding: Binding::task_definition_type(),
        label: None,
        property_type: Some("Hidden".to_string()),
        value: Some(config.task_type.clone()),
        group: None,
        feel: None,
    });

    let mut groups = vec![Group::new("input", "Input"), Group::new("output", "Output")];

    if definition.kind() == ConnectorKind::Inbound {
        properties.push(correlation_property(CORRELATION_KEY_VARIABLE, "Correlation key"));
        properties.push(correlation_property(MESSAGE_NAME_VARIABLE, "Message name"));
        groups.push(Group::new("config", "Configuration"));
    }

    Template::new(config.name.clone(), properties, groups)
}

fn correlation_property(name: &str, label: &str) -> Property {
    Property {
        binding: Binding::input(name),
        label: Some(label.to_string()),
        property_type: Some("String".to_string()),
        value: None,
        group: Some("config".to_string()),
        feel: Some("optional".to_string()),
    }
}
