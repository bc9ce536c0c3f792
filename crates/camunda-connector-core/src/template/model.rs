//! Element-template value objects.
//!
//! These follow (incompletely) the official Camunda element-template JSON
//! schema. They are produced fresh per synthesis call and never mutated
//! afterwards; serialization skips absent fields.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed schema URL emitted in every template.
pub const TEMPLATE_SCHEMA: &str = "https://unpkg.com/@camunda/zeebe-element-templates-json-schema\
                                   @0.9.0/resources/schema.json";

/// Element kinds the generated template applies to.
pub const APPLIES_TO_SERVICE_TASK: &str = "bpmn:ServiceTask";

/// The closed set of binding kinds a property may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingType {
    #[serde(rename = "zeebe:input")]
    Input,
    #[serde(rename = "zeebe:taskHeader")]
    TaskHeader,
    #[serde(rename = "zeebe:taskDefinition:type")]
    TaskDefinitionType,
}

/// How one displayed property maps onto the service task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    #[serde(rename = "type")]
    pub binding_type: BindingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Binding {
    /// Binding to an input variable of the task.
    pub fn input(name: impl Into<String>) -> Self {
        Self {
            binding_type: BindingType::Input,
            name: Some(name.into()),
            source: None,
            key: None,
        }
    }

    /// Binding to a task header entry.
    pub fn task_header(key: impl Into<String>) -> Self {
        Self {
            binding_type: BindingType::TaskHeader,
            name: None,
            source: None,
            key: Some(key.into()),
        }
    }

    /// Binding carrying the service-task type identifier.
    pub fn task_definition_type() -> Self {
        Self { binding_type: BindingType::TaskDefinitionType, name: None, source: None, key: None }
    }
}

/// One displayed property of the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub binding: Binding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feel: Option<String>,
}

/// Visual grouping of properties in the modeler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub label: String,
}

impl Group {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into() }
    }
}

/// A generated element template, ready to serialize for the modeler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    pub id: String,
    #[serde(rename = "appliesTo")]
    pub applies_to: Vec<String>,
    pub properties: Vec<Property>,
    pub groups: Vec<Group>,
}

impl Template {
    /// Assemble a template with a freshly generated id and the fixed schema
    /// and element-kind defaults.
    pub fn new(name: impl Into<String>, properties: Vec<Property>, groups: Vec<Group>) -> Self {
        Self {
            schema: TEMPLATE_SCHEMA.to_string(),
            name: name.into(),
            id: Uuid::new_v4().to_string(),
            applies_to: vec![APPLIES_TO_SERVICE_TASK.to_string()],
            properties,
            groups,
        }
    }

    /// Serialize as the JSON document the modeler imports.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
