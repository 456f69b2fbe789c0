//! Core error types for Inventario RS

use std::collections::BTreeMap;
use thiserror::Error;

/// Validation errors collection, keyed by field name
#[derive(Error, Debug, Default, Clone, PartialEq)]
#[error("{}", self.full_messages().join(", "))]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(source: validator::ValidationErrors) -> Self {
        let mut errors = ValidationErrors::new();
        collect(&mut errors, "", &source);
        errors
    }
}

/// Flatten nested errors into `parent.child` / `list[i].child` field names
fn collect(into: &mut ValidationErrors, prefix: &str, source: &validator::ValidationErrors) {
    use validator::ValidationErrorsKind;

    for (field, kind) in source.errors() {
        let name = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| describe_code(&error.code));
                    into.add(name.clone(), message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(into, &name, nested),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(into, &format!("{}[{}]", name, index), nested);
                }
            }
        }
    }
}

fn describe_code(code: &str) -> String {
    match code {
        "length" => "has an invalid length".to_string(),
        "email" => "is not a valid email address".to_string(),
        "range" => "is out of range".to_string(),
        "required" => "is required".to_string(),
        other => format!("is invalid ({})", other),
    }
}
