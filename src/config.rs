//! Configuration builders: accumulate field values, then finalize into an immutable result.
//!
//! A [`PendingConfiguration`] is created empty for one [`Schema`](crate::schema::Schema),
//! populated through [`set`](PendingConfiguration::set) in any order (last write per field
//! wins), and consumed once by [`finalize`](PendingConfiguration::finalize). Finalization keeps
//! every set value, fills unset optional fields from their declared defaults, and fails, naming
//! every missing required field, when any required field was never set.

/// Accumulating builder.
pub mod pending;
/// Immutable finalized configuration.
pub mod resolved;

pub use pending::*;
pub use resolved::*;

// self
use crate::{
	_prelude::*,
	id::{FieldName, SchemaId},
	value::ValueKind,
};

/// Errors raised while populating or finalizing a configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum BuildError {
	/// Field is not declared by the schema.
	#[error("Schema `{schema}` has no field named `{field}`.")]
	UnknownField {
		/// Schema the builder was created for.
		schema: SchemaId,
		/// Requested field name.
		field: String,
	},
	/// Supplied value does not match the declared kind.
	#[error("Field `{field}` of schema `{schema}` expects {expected}, got {found}.")]
	TypeMismatch {
		/// Schema the builder was created for.
		schema: SchemaId,
		/// Offending field.
		field: FieldName,
		/// Declared kind.
		expected: ValueKind,
		/// Description of the supplied value.
		found: String,
	},
	/// Supplied integer falls outside the declared range.
	#[error("Field `{field}` of schema `{schema}` must be within {min}..={max}, got {value}.")]
	OutOfRange {
		/// Schema the builder was created for.
		schema: SchemaId,
		/// Offending field.
		field: FieldName,
		/// Supplied value.
		value: i64,
		/// Lower bound.
		min: i64,
		/// Upper bound.
		max: i64,
	},
	/// One or more required fields were never set.
	#[error("Schema `{schema}` is missing required fields: {}.", join(.fields))]
	MissingRequiredFields {
		/// Schema the builder was created for.
		schema: SchemaId,
		/// Every missing required field, in declaration order.
		fields: Vec<FieldName>,
	},
}
impl BuildError {
	/// Missing field names, when this is a [`BuildError::MissingRequiredFields`].
	pub fn missing_fields(&self) -> &[FieldName] {
		match self {
			BuildError::MissingRequiredFields { fields, .. } => fields,
			_ => &[],
		}
	}
}

fn join(fields: &[FieldName]) -> String {
	fields.iter().map(FieldName::as_str).collect::<Vec<_>>().join(", ")
}
