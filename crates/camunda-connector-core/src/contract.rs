//! Return-type contract checking.
//!
//! A connector declares the kind of value its operation produces. The
//! declaration is resolved into a [`ReturnKind`] once, at definition time,
//! and every execution's actual result is tag-checked against it before any
//! output variables are emitted.

use std::fmt;

use serde_json::Value as JsonValue;

use crate::error::{DefinitionError, DefinitionResult, InvocationError};

/// Declared result type of a connector operation.
///
/// Connectors that return nothing must declare it explicitly with
/// [`ReturnTypeDecl::unit`]; an absent declaration is a definition error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTypeDecl(String);

impl ReturnTypeDecl {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The connector produces no value.
    pub fn unit() -> Self {
        Self::new("none")
    }

    pub fn boolean() -> Self {
        Self::new("boolean")
    }

    pub fn integer() -> Self {
        Self::new("integer")
    }

    pub fn number() -> Self {
        Self::new("number")
    }

    pub fn string() -> Self {
        Self::new("string")
    }

    pub fn list() -> Self {
        Self::new("list")
    }

    pub fn object() -> Self {
        Self::new("object")
    }

    /// A structured record type; flattened to a plain mapping when emitted.
    pub fn record() -> Self {
        Self::new("record")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Runtime tag for the value categories a connector may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// No value (JSON null).
    Unit,
    Bool,
    Integer,
    Float,
    String,
    List,
    /// A plain mapping or a structured record flattened to one.
    Object,
}

impl ReturnKind {
    /// Resolve a declared return type into a runtime kind.
    ///
    /// `declaration == None` means the author declared nothing at all, which
    /// is rejected; "returns no value" must be spelled out as `none`.
    pub fn from_declaration(
        connector: &str,
        declaration: Option<&ReturnTypeDecl>,
    ) -> DefinitionResult<Self> {
        let decl = declaration.ok_or_else(|| DefinitionError::MissingReturnAnnotation {
            connector: connector.to_string(),
        })?;

        match decl.as_str() {
            "none" | "unit" => Ok(Self::Unit),
            "bool" | "boolean" => Ok(Self::Bool),
            "int" | "integer" => Ok(Self::Integer),
            "float" | "number" => Ok(Self::Float),
            "str" | "string" => Ok(Self::String),
            "list" | "array" => Ok(Self::List),
            "object" | "map" | "record" => Ok(Self::Object),
            other => Err(DefinitionError::UnsupportedReturnType {
                connector: connector.to_string(),
                declared: other.to_string(),
            }),
        }
    }

    /// Classify an actual runtime value.
    pub fn of_value(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Unit,
            JsonValue::Bool(_) => Self::Bool,
            JsonValue::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            JsonValue::Number(_) => Self::Float,
            JsonValue::String(_) => Self::String,
            JsonValue::Array(_) => Self::List,
            JsonValue::Object(_) => Self::Object,
        }
    }

    /// Check an actual result against this declared contract.
    ///
    /// An integer satisfies a declared `Float` contract; everything else must
    /// match exactly. A mismatch names both sides so the author can tell
    /// "declared X but returned Y" apart from definition-time errors.
    pub fn check(&self, connector: &str, value: &JsonValue) -> Result<(), InvocationError> {
        let actual = Self::of_value(value);
        let matches = match (self, actual) {
            (Self::Float, ReturnKind::Integer) => true,
            (expected, actual) => *expected == actual,
        };

        if matches {
            Ok(())
        } else {
            Err(InvocationError::ReturnTypeMismatch {
                connector: connector.to_string(),
                expected: *self,
                actual,
            })
        }
    }

    /// Whether this contract produces a value at all.
    pub fn produces_value(&self) -> bool {
        !matches!(self, Self::Unit)
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unit => "none",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Float => "number",
            Self::String => "string",
            Self::List => "list",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_declaration_is_rejected() {
        let err = ReturnKind::from_declaration("dummy", None).unwrap_err();
        assert!(matches!(err, DefinitionError::MissingReturnAnnotation { .. }));
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let decl = ReturnTypeDecl::new("complex128");
        let err = ReturnKind::from_declaration("dummy", Some(&decl)).unwrap_err();
        match err {
            DefinitionError::UnsupportedReturnType { declared, .. } => {
                assert_eq!(declared, "complex128");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn record_resolves_to_object() {
        let decl = ReturnTypeDecl::record();
        let kind = ReturnKind::from_declaration("dummy", Some(&decl)).unwrap();
        assert_eq!(kind, ReturnKind::Object);
    }

    #[test]
    fn unit_contract_accepts_null_only() {
        let kind = ReturnKind::Unit;
        assert!(kind.check("dummy", &JsonValue::Null).is_ok());
        assert!(kind.check("dummy", &json!(true)).is_err());
    }

    #[test]
    fn integer_satisfies_float_contract() {
        assert!(ReturnKind::Float.check("dummy", &json!(3)).is_ok());
        assert!(ReturnKind::Integer.check("dummy", &json!(3.5)).is_err());
    }

    #[test]
    fn mismatch_names_both_kinds() {
        let err = ReturnKind::Integer.check("dummy", &json!({"foo": 1})).unwrap_err();
        match err {
            InvocationError::ReturnTypeMismatch { expected, actual, connector } => {
                assert_eq!(connector, "dummy");
                assert_eq!(expected, ReturnKind::Integer);
                assert_eq!(actual, ReturnKind::Object);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
