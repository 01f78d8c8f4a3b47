//! Declarative schemas: the ordered field specifications a builder validates against.
//!
//! `field` exposes [`FieldSpec`] (name, kind, requiredness, default, integer range) and
//! [`OutputSpec`] (what a provisioned resource exposes).
//! `builder` assembles and validates a [`Schema`]; `definition` loads one from JSON so schema
//! tables can live outside the binary.

/// Schema builder and validation.
pub mod builder;
/// JSON schema definitions.
pub mod definition;
/// Field specifications.
pub mod field;

pub use builder::*;
pub use definition::*;
pub use field::*;

// self
use crate::{
	_prelude::*,
	id::{FieldName, SchemaId},
	value::ValueKind,
};

/// Errors raised while validating a schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum SchemaError {
	/// Two outputs share a name.
	#[error("Schema `{schema}` declares output `{output}` more than once.")]
	DuplicateOutput {
		/// Schema being validated.
		schema: SchemaId,
		/// Repeated output name.
		output: FieldName,
	},
	/// Two fields share a name.
	#[error("Schema `{schema}` declares field `{field}` more than once.")]
	DuplicateField {
		/// Schema being validated.
		schema: SchemaId,
		/// Repeated field name.
		field: FieldName,
	},
	/// Required fields cannot carry defaults.
	#[error("Required field `{field}` of schema `{schema}` cannot declare a default.")]
	RequiredWithDefault {
		/// Schema being validated.
		schema: SchemaId,
		/// Offending field.
		field: FieldName,
	},
	/// A default does not match the field's kind.
	#[error("Default for field `{field}` of schema `{schema}` is {found}, expected {expected}.")]
	DefaultKindMismatch {
		/// Schema being validated.
		schema: SchemaId,
		/// Offending field.
		field: FieldName,
		/// Declared kind.
		expected: ValueKind,
		/// Description of the supplied default.
		found: String,
	},
	/// Integer ranges only apply to integer scalars.
	#[error("Field `{field}` of schema `{schema}` has kind {kind} and cannot declare a range.")]
	RangeOnNonInt {
		/// Schema being validated.
		schema: SchemaId,
		/// Offending field.
		field: FieldName,
		/// Declared kind.
		kind: ValueKind,
	},
	/// The declared range contains no values.
	#[error("Field `{field}` of schema `{schema}` declares an empty range {min}..={max}.")]
	EmptyRange {
		/// Schema being validated.
		schema: SchemaId,
		/// Offending field.
		field: FieldName,
		/// Lower bound.
		min: i64,
		/// Upper bound.
		max: i64,
	},
	/// An integer default falls outside the declared range.
	#[error("Default {value} for field `{field}` of schema `{schema}` is outside {min}..={max}.")]
	DefaultOutOfRange {
		/// Schema being validated.
		schema: SchemaId,
		/// Offending field.
		field: FieldName,
		/// Declared default.
		value: i64,
		/// Lower bound.
		min: i64,
		/// Upper bound.
		max: i64,
	},
}

/// Validated, ordered set of field specifications for one resource or input type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Schema {
	id: SchemaId,
	#[serde(skip_serializing_if = "Option::is_none")]
	description: Option<String>,
	fields: Vec<FieldSpec>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	outputs: Vec<OutputSpec>,
	#[serde(skip)]
	index: BTreeMap<FieldName, usize>,
}
impl Schema {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: SchemaId) -> SchemaBuilder {
		SchemaBuilder::new(id)
	}

	/// Type token identifying this schema.
	pub fn id(&self) -> &SchemaId {
		&self.id
	}

	/// Human-readable description, if any.
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Field specifications in declaration order.
	pub fn fields(&self) -> &[FieldSpec] {
		&self.fields
	}

	/// Looks up a field by name.
	pub fn field(&self, name: &str) -> Option<&FieldSpec> {
		self.position(name).map(|i| &self.fields[i])
	}

	/// Outputs the provisioned resource exposes, in declaration order.
	///
	/// Empty for nested input types.
	pub fn outputs(&self) -> &[OutputSpec] {
		&self.outputs
	}

	/// Looks up a declared output by name.
	pub fn output(&self, name: &str) -> Option<&OutputSpec> {
		self.outputs.iter().find(|spec| spec.name.as_str() == name)
	}

	/// Returns `true` if the schema declares `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.index.contains_key(name)
	}

	/// Iterator over required fields in declaration order.
	pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
		self.fields.iter().filter(|spec| spec.required)
	}

	/// Number of declared fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns `true` if no fields are declared.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub(crate) fn position(&self, name: &str) -> Option<usize> {
		self.index.get(name).copied()
	}
}
impl Display for Schema {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		writeln!(f, "{}", self.id)?;

		for spec in &self.fields {
			writeln!(f, "  {spec}")?;
		}
		for spec in &self.outputs {
			writeln!(f, "  -> {spec}")?;
		}

		Ok(())
	}
}
