// std
use std::iter::IntoIterator;
// self
use crate::{
	_prelude::*,
	id::SchemaId,
	schema::{FieldSpec, OutputSpec, Schema, SchemaError},
	value::ValueKind,
};

/// Builder for [`Schema`] values.
#[derive(Debug)]
pub struct SchemaBuilder {
	/// Identifier for the schema being constructed.
	pub id: SchemaId,
	/// Optional human-readable description.
	pub description: Option<String>,
	/// Field specifications in declaration order.
	pub fields: Vec<FieldSpec>,
	/// Declared resource outputs.
	pub outputs: Vec<OutputSpec>,
}
impl SchemaBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: SchemaId) -> Self {
		Self { id, description: None, fields: Vec::new(), outputs: Vec::new() }
	}

	/// Sets the schema description.
	pub fn describe(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Appends a field specification.
	pub fn field(mut self, spec: FieldSpec) -> Self {
		self.fields.push(spec);

		self
	}

	/// Appends multiple field specifications.
	pub fn fields<I>(mut self, specs: I) -> Self
	where
		I: IntoIterator<Item = FieldSpec>,
	{
		self.fields.extend(specs);

		self
	}

	/// Declares an output of the provisioned resource.
	pub fn output(mut self, spec: OutputSpec) -> Self {
		self.outputs.push(spec);

		self
	}

	/// Declares multiple outputs.
	pub fn outputs<I>(mut self, specs: I) -> Self
	where
		I: IntoIterator<Item = OutputSpec>,
	{
		self.outputs.extend(specs);

		self
	}

	/// Consumes the builder and validates the resulting schema.
	pub fn build(self) -> Result<Schema, SchemaError> {
		let mut index = BTreeMap::new();

		for (position, spec) in self.fields.iter().enumerate() {
			if index.insert(spec.name.clone(), position).is_some() {
				return Err(SchemaError::DuplicateField {
					schema: self.id.clone(),
					field: spec.name.clone(),
				});
			}

			validate_field(&self.id, spec)?;
		}
		for (position, spec) in self.outputs.iter().enumerate() {
			if self.outputs[..position].iter().any(|earlier| earlier.name == spec.name) {
				return Err(SchemaError::DuplicateOutput {
					schema: self.id.clone(),
					output: spec.name.clone(),
				});
			}
		}

		Ok(Schema {
			id: self.id,
			description: self.description,
			fields: self.fields,
			outputs: self.outputs,
			index,
		})
	}
}

fn validate_field(schema: &SchemaId, spec: &FieldSpec) -> Result<(), SchemaError> {
	if spec.required && spec.default.is_some() {
		return Err(SchemaError::RequiredWithDefault {
			schema: schema.clone(),
			field: spec.name.clone(),
		});
	}
	if let Some(default) = spec.default.as_ref()
		&& !default.conforms_to(&spec.kind)
	{
		return Err(SchemaError::DefaultKindMismatch {
			schema: schema.clone(),
			field: spec.name.clone(),
			expected: spec.kind.clone(),
			found: default.kind_label(),
		});
	}

	let Some(range) = spec.range else {
		return Ok(());
	};

	if spec.kind != ValueKind::INT {
		return Err(SchemaError::RangeOnNonInt {
			schema: schema.clone(),
			field: spec.name.clone(),
			kind: spec.kind.clone(),
		});
	}
	if range.min > range.max {
		return Err(SchemaError::EmptyRange {
			schema: schema.clone(),
			field: spec.name.clone(),
			min: range.min,
			max: range.max,
		});
	}
	if let Some(value) = spec.default.as_ref().and_then(|default| default.as_int())
		&& !range.contains(value)
	{
		return Err(SchemaError::DefaultOutOfRange {
			schema: schema.clone(),
			field: spec.name.clone(),
			value,
			min: range.min,
			max: range.max,
		});
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::value::ScalarKind;

	fn schema_id() -> SchemaId {
		SchemaId::new("test:index:Role").expect("Schema identifier fixture should be valid.")
	}

	fn optional(name: &str, kind: ValueKind) -> FieldSpec {
		FieldSpec::optional(name, kind).expect("Field name fixture should be valid.")
	}

	#[test]
	fn build_preserves_declaration_order() {
		let schema = Schema::builder(schema_id())
			.describe("IAM role.")
			.field(optional("path", ValueKind::STRING).with_default("/"))
			.field(optional("name", ValueKind::STRING))
			.field(FieldSpec::required("trusted", ValueKind::STRING_LIST).expect("Valid name."))
			.build()
			.expect("Schema fixture should validate.");
		let names = schema.fields().iter().map(|spec| spec.name.as_str()).collect::<Vec<_>>();

		assert_eq!(names, ["path", "name", "trusted"]);
		assert_eq!(schema.description(), Some("IAM role."));
		assert_eq!(schema.required_fields().count(), 1);
		assert!(schema.contains("name"));
		assert!(!schema.contains("tags"));
		assert_eq!(
			schema.field("path").and_then(|spec| spec.default.as_ref()),
			Some(&"/".into())
		);
	}

	#[test]
	fn duplicate_names_are_rejected() {
		let err = Schema::builder(schema_id())
			.fields([optional("name", ValueKind::STRING), optional("name", ValueKind::BOOL)])
			.build()
			.expect_err("Duplicate field names must be rejected.");

		assert!(
			matches!(err, SchemaError::DuplicateField { ref field, .. } if field.as_str() == "name")
		);

		let arn = OutputSpec::new("arn", ValueKind::STRING).expect("Output name should be valid.");
		let err = Schema::builder(schema_id())
			.outputs([arn.clone(), arn])
			.build()
			.expect_err("Duplicate outputs must be rejected.");

		assert_eq!(
			err.to_string(),
			"Schema `test:index:Role` declares output `arn` more than once."
		);
	}

	#[test]
	fn outputs_are_looked_up_by_name() {
		let schema = Schema::builder(schema_id())
			.field(optional("name", ValueKind::STRING))
			.output(
				OutputSpec::new("arn", ValueKind::STRING).expect("Output name should be valid."),
			)
			.output(
				OutputSpec::new("stsExternalIds", ValueKind::STRING_LIST)
					.expect("Output name should be valid."),
			)
			.build()
			.expect("Schema fixture should validate.");

		assert_eq!(schema.outputs().len(), 2);
		assert_eq!(
			schema.output("stsExternalIds").map(|spec| &spec.kind),
			Some(&ValueKind::STRING_LIST)
		);
		assert!(schema.output("name").is_none());
	}

	#[test]
	fn required_fields_cannot_have_defaults() {
		let spec = FieldSpec::required("attach", ValueKind::BOOL)
			.expect("Field name fixture should be valid.")
			.with_default(false);
		let err = Schema::builder(schema_id())
			.field(spec)
			.build()
			.expect_err("Required fields with defaults must be rejected.");

		assert!(matches!(err, SchemaError::RequiredWithDefault { .. }));
	}

	#[test]
	fn defaults_must_match_the_field_kind() {
		let err = Schema::builder(schema_id())
			.field(optional("requiresMfa", ValueKind::BOOL).with_default("true"))
			.build()
			.expect_err("String default for a bool field must be rejected.");

		assert_eq!(
			err,
			SchemaError::DefaultKindMismatch {
				schema: schema_id(),
				field: "requiresMfa".parse().expect("Field name should parse."),
				expected: ValueKind::BOOL,
				found: "string".into(),
			}
		);

		let err = Schema::builder(schema_id())
			.field(
				optional("policyArns", ValueKind::STRING_LIST)
					.with_default(vec![1_i64, 2_i64]),
			)
			.build()
			.expect_err("Integer list default for a string list must be rejected.");

		assert!(matches!(err, SchemaError::DefaultKindMismatch { .. }));
	}

	#[test]
	fn ranges_are_validated() {
		let err = Schema::builder(schema_id())
			.field(optional("path", ValueKind::STRING).with_range(1, 2))
			.build()
			.expect_err("Ranges on strings must be rejected.");

		assert!(matches!(err, SchemaError::RangeOnNonInt { .. }));

		let err = Schema::builder(schema_id())
			.field(optional("mfaAge", ValueKind::INT).with_range(10, 1))
			.build()
			.expect_err("Empty ranges must be rejected.");

		assert!(matches!(err, SchemaError::EmptyRange { min: 10, max: 1, .. }));

		let err = Schema::builder(schema_id())
			.field(
				optional("maxSessionDuration", ValueKind::Scalar(ScalarKind::Int))
					.with_default(60_i64)
					.with_range(3600, 43200),
			)
			.build()
			.expect_err("Defaults outside the range must be rejected.");

		assert!(matches!(err, SchemaError::DefaultOutOfRange { value: 60, .. }));
	}
}
