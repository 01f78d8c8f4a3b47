// self
use crate::{
	_prelude::*,
	id::{FieldName, SchemaId},
	schema::{FieldSpec, IntRange, OutputSpec, Schema, SchemaError},
	value::{Value, ValueKind},
};

/// Serialized form of a schema, as loaded from JSON.
///
/// ```json
/// {
///   "id": "aws-iam:index:Policy",
///   "fields": [
///     { "name": "name", "kind": "string", "required": true },
///     { "name": "path", "kind": "string", "default": "/" }
///   ],
///   "outputs": [{ "name": "arn", "kind": "string" }]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDefinition {
	/// Schema type token.
	pub id: SchemaId,
	/// Optional description.
	#[serde(default)]
	pub description: Option<String>,
	/// Field definitions in declaration order.
	pub fields: Vec<FieldDefinition>,
	/// Outputs of the provisioned resource.
	#[serde(default)]
	pub outputs: Vec<OutputSpec>,
}
impl SchemaDefinition {
	/// Converts the definition into a validated [`Schema`].
	pub fn into_schema(self) -> Result<Schema, SchemaError> {
		let mut builder = Schema::builder(self.id.clone());

		if let Some(description) = self.description {
			builder = builder.describe(description);
		}

		for field in self.fields {
			builder = builder.field(field.into_spec(&self.id)?);
		}

		builder.outputs(self.outputs).build()
	}
}

/// Serialized form of one field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
	/// Field name.
	pub name: FieldName,
	/// Kind label, e.g. `list<string>`.
	pub kind: ValueKind,
	/// Whether the field is required.
	#[serde(default)]
	pub required: bool,
	/// JSON literal for the default.
	#[serde(default)]
	pub default: Option<serde_json::Value>,
	/// Integer bounds.
	#[serde(default)]
	pub range: Option<IntRange>,
	/// Optional description.
	#[serde(default)]
	pub description: Option<String>,
}
impl FieldDefinition {
	fn into_spec(self, schema: &SchemaId) -> Result<FieldSpec, SchemaError> {
		let default = match self.default {
			Some(literal) => Some(Value::from_json(&self.kind, &literal).ok_or_else(|| {
				SchemaError::DefaultKindMismatch {
					schema: schema.clone(),
					field: self.name.clone(),
					expected: self.kind.clone(),
					found: literal.to_string(),
				}
			})?),
			None => None,
		};

		Ok(FieldSpec {
			name: self.name,
			kind: self.kind,
			required: self.required,
			default,
			range: self.range,
			description: self.description,
		})
	}
}

impl Schema {
	/// Parses and validates a schema from its JSON definition.
	///
	/// Parse failures carry the JSON path of the offending element.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let mut deserializer = serde_json::Deserializer::from_str(json);
		let definition: SchemaDefinition = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::Definition { source })?;

		Ok(definition.into_schema()?)
	}
}
