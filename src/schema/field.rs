// self
use crate::{
	_prelude::*,
	id::{FieldName, IdentifierError},
	value::{Value, ValueKind},
};

/// Inclusive bounds for an integer field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
	/// Smallest accepted value.
	pub min: i64,
	/// Largest accepted value.
	pub max: i64,
}
impl IntRange {
	/// Returns `true` if `value` lies within the bounds.
	pub fn contains(self, value: i64) -> bool {
		self.min <= value && value <= self.max
	}
}
impl Display for IntRange {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}..={}", self.min, self.max)
	}
}

/// Output a provisioned resource exposes once the engine has resolved it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSpec {
	/// Output property name; nested outputs use dotted paths such as `role.arn`.
	pub name: FieldName,
	/// Kind the output resolves to.
	pub kind: ValueKind,
}
impl OutputSpec {
	/// Declares an output.
	pub fn new(name: impl AsRef<str>, kind: ValueKind) -> Result<Self, IdentifierError> {
		Ok(Self { name: FieldName::new(name)?, kind })
	}
}
impl Display for OutputSpec {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}: {}", self.name, self.kind)
	}
}

/// Static description of one configuration field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
	/// Field name, unique within its schema.
	pub name: FieldName,
	/// Declared value kind.
	pub kind: ValueKind,
	/// Whether the caller must supply a value.
	pub required: bool,
	/// Value used when an optional field is never set.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default: Option<Value>,
	/// Accepted bounds for integer fields.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub range: Option<IntRange>,
	/// Human-readable description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}
impl FieldSpec {
	/// Declares a required field.
	pub fn required(name: impl AsRef<str>, kind: ValueKind) -> Result<Self, IdentifierError> {
		Self::new(name, kind, true)
	}

	/// Declares an optional field with no default.
	pub fn optional(name: impl AsRef<str>, kind: ValueKind) -> Result<Self, IdentifierError> {
		Self::new(name, kind, false)
	}

	fn new(
		name: impl AsRef<str>,
		kind: ValueKind,
		required: bool,
	) -> Result<Self, IdentifierError> {
		Ok(Self {
			name: FieldName::new(name)?,
			kind,
			required,
			default: None,
			range: None,
			description: None,
		})
	}

	/// Sets the default applied when the field is never set.
	pub fn with_default(mut self, value: impl Into<Value>) -> Self {
		self.default = Some(value.into());

		self
	}

	/// Restricts an integer field to `min..=max`.
	pub fn with_range(mut self, min: i64, max: i64) -> Self {
		self.range = Some(IntRange { min, max });

		self
	}

	/// Attaches a human-readable description.
	pub fn describe(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}
}
impl Display for FieldSpec {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}: {}", self.name, self.kind)?;

		if self.required {
			f.write_str(" (required)")?;
		}
		if let Some(range) = self.range {
			write!(f, " in {range}")?;
		}
		if let Some(default) = self.default.as_ref() {
			let literal = serde_json::to_string(default).map_err(|_| std::fmt::Error)?;

			write!(f, " = {literal}")?;
		}

		Ok(())
	}
}
