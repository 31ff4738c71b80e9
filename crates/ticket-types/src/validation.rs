//! Configuration validation utilities for the ticket system.
//!
//! This module provides a small framework for validating TOML configuration
//! tables before a gateway backend is constructed: schemas of required and
//! optional typed fields with detailed error reporting.

use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// Error that occurs when a required field is missing.
	#[error("Missing required field: {0}")]
	MissingField(String),
	/// Error that occurs when a field has an invalid value.
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	/// Error that occurs when field type is incorrect.
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// Represents the type of a configuration field.
#[derive(Debug, Clone)]
pub enum FieldType {
	/// A string value.
	String,
	/// An integer value with optional minimum and maximum bounds.
	Integer {
		/// Minimum allowed value (inclusive).
		min: Option<i64>,
		/// Maximum allowed value (inclusive).
		max: Option<i64>,
	},
	/// A boolean value (true/false).
	Boolean,
}

/// Represents a field in a configuration schema.
#[derive(Debug, Clone)]
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
}

impl Field {
	/// Creates a new field with the given name and type.
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
		}
	}
}

/// Defines a validation schema for a TOML table.
///
/// A schema consists of required fields that must be present and optional
/// fields that may be present. Each field has an expected type.
#[derive(Debug, Clone, Default)]
pub struct Schema {
	required: Vec<Field>,
	optional: Vec<Field>,
}

impl Schema {
	/// Creates a schema from required and optional field lists.
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML value against this schema.
	///
	/// The value must be a table; required fields must be present with the
	/// declared type, optional fields are type checked when present. Fields
	/// not named in the schema are ignored.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config
			.as_table()
			.ok_or_else(|| ValidationError::TypeMismatch {
				field: "<root>".into(),
				expected: "table".into(),
				actual: toml_type_name(config).into(),
			})?;

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			Self::validate_field(field, value)?;
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				Self::validate_field(field, value)?;
			}
		}

		Ok(())
	}

	fn validate_field(field: &Field, value: &toml::Value) -> Result<(), ValidationError> {
		let mismatch = |expected: &str| ValidationError::TypeMismatch {
			field: field.name.clone(),
			expected: expected.into(),
			actual: toml_type_name(value).into(),
		};

		match &field.field_type {
			FieldType::String => {
				value.as_str().ok_or_else(|| mismatch("string"))?;
			}
			FieldType::Integer { min, max } => {
				let number = value.as_integer().ok_or_else(|| mismatch("integer"))?;
				if let Some(min) = min {
					if number < *min {
						return Err(ValidationError::InvalidValue {
							field: field.name.clone(),
							message: format!("{} is below the minimum of {}", number, min),
						});
					}
				}
				if let Some(max) = max {
					if number > *max {
						return Err(ValidationError::InvalidValue {
							field: field.name.clone(),
							message: format!("{} is above the maximum of {}", number, max),
						});
					}
				}
			}
			FieldType::Boolean => {
				value.as_bool().ok_or_else(|| mismatch("boolean"))?;
			}
		}

		Ok(())
	}
}

/// Returns the TOML type name of a value for error reporting.
fn toml_type_name(value: &toml::Value) -> &'static str {
	match value {
		toml::Value::String(_) => "string",
		toml::Value::Integer(_) => "integer",
		toml::Value::Float(_) => "float",
		toml::Value::Boolean(_) => "boolean",
		toml::Value::Datetime(_) => "datetime",
		toml::Value::Array(_) => "array",
		toml::Value::Table(_) => "table",
	}
}

/// Trait implemented by gateway backends to expose their configuration schema.
///
/// The schema is used to validate the backend's TOML table at wiring time,
/// before the backend handles any request.
pub trait ConfigSchema: Send + Sync {
	/// Validates the given configuration table.
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(raw: &str) -> toml::Value {
		raw.parse().unwrap()
	}

	#[test]
	fn accepts_valid_table() {
		let schema = Schema::new(
			vec![Field::new("path", FieldType::String)],
			vec![Field::new(
				"retries",
				FieldType::Integer {
					min: Some(0),
					max: Some(10),
				},
			)],
		);

		schema
			.validate(&parse("path = \"./data\"\nretries = 3"))
			.unwrap();
		schema.validate(&parse("path = \"./data\"")).unwrap();
	}

	#[test]
	fn rejects_missing_required_field() {
		let schema = Schema::new(vec![Field::new("path", FieldType::String)], vec![]);
		let err = schema.validate(&parse("other = 1")).unwrap_err();
		assert!(matches!(err, ValidationError::MissingField(name) if name == "path"));
	}

	#[test]
	fn rejects_wrong_type() {
		let schema = Schema::new(vec![Field::new("path", FieldType::String)], vec![]);
		let err = schema.validate(&parse("path = 7")).unwrap_err();
		assert!(matches!(err, ValidationError::TypeMismatch { .. }));
	}

	#[test]
	fn rejects_out_of_bounds_integer() {
		let schema = Schema::new(
			vec![Field::new(
				"retries",
				FieldType::Integer {
					min: Some(0),
					max: Some(10),
				},
			)],
			vec![],
		);
		let err = schema.validate(&parse("retries = 11")).unwrap_err();
		assert!(matches!(err, ValidationError::InvalidValue { .. }));
	}

	#[test]
	fn empty_schema_accepts_empty_table() {
		let schema = Schema::new(vec![], vec![]);
		schema.validate(&parse("")).unwrap();
	}
}
