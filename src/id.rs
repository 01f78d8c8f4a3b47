//! Strongly typed identifiers for schemas, fields, resources, and deferred values.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $max:expr) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, $max, view)?;

				Ok(Self(view.to_owned()))
			}

			/// Returns the identifier as a string slice.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, $max, &value)?;

				Ok(Self(value))
			}
		}
		impl TryFrom<&str> for $name {
			type Error = IdentifierError;

			fn try_from(value: &str) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;
const DEFERRED_MAX_LEN: usize = 512;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (field, schema, resource, deferred).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (field, schema, resource, deferred).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed length.
	#[error("{kind} identifier exceeds {max} bytes.")]
	TooLong {
		/// Kind of identifier (field, schema, resource, deferred).
		kind: &'static str,
		/// Maximum permitted byte count.
		max: usize,
	},
}

def_id! {
	FieldName,
	"Name of a configuration field, unique within one schema.",
	"Field",
	IDENTIFIER_MAX_LEN
}
def_id! {
	SchemaId,
	"Type token identifying a schema, e.g. `aws-iam:index:Policy`.",
	"Schema",
	IDENTIFIER_MAX_LEN
}
def_id! {
	LogicalName,
	"Logical name a caller assigns to one resource request.",
	"Resource",
	IDENTIFIER_MAX_LEN
}
def_id! {
	DeferredId,
	"Opaque identifier of a value resolved later by an external system.",
	"Deferred",
	DEFERRED_MAX_LEN
}

fn validate_view(kind: &'static str, max: usize, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > max {
		return Err(IdentifierError::TooLong { kind, max });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn type_tokens_validate_as_schema_ids() {
		let id = SchemaId::new("aws-iam:index:AssumableRoleWithOIDC")
			.expect("Catalog type token should be a valid schema id.");

		assert_eq!(id.as_str(), "aws-iam:index:AssumableRoleWithOIDC");
		assert_eq!(format!("{id:?}"), "Schema(aws-iam:index:AssumableRoleWithOIDC)");

		let err = SchemaId::new("aws-iam:index:Assumable Role")
			.expect_err("Type tokens with spaces must be rejected.");

		assert_eq!(err, IdentifierError::ContainsWhitespace { kind: "Schema" });
		assert_eq!(err.to_string(), "Schema identifier contains whitespace.");
	}

	#[test]
	fn deferred_ids_fit_resource_urns_with_long_names() {
		let name = LogicalName::new("n".repeat(IDENTIFIER_MAX_LEN))
			.expect("Logical names up to the limit should be valid.");
		let urn = format!("urn:aws-iam:index:RoleForServiceAccountsEks::{name}#role.uniqueId");

		assert!(urn.len() > IDENTIFIER_MAX_LEN);
		DeferredId::new(&urn).expect("Output ids of long logical names should be valid.");
		assert_eq!(
			SchemaId::new(&urn),
			Err(IdentifierError::TooLong { kind: "Schema", max: IDENTIFIER_MAX_LEN })
		);
		assert_eq!(
			DeferredId::new("u".repeat(DEFERRED_MAX_LEN + 1)),
			Err(IdentifierError::TooLong { kind: "Deferred", max: DEFERRED_MAX_LEN })
		);
	}

	#[test]
	fn logical_names_reject_blank_and_unicode_spacing() {
		let err = LogicalName::try_from("").expect_err("Empty names must be rejected.");

		assert_eq!(err.to_string(), "Resource identifier cannot be empty.");
		assert!(LogicalName::new(format!("boundary{}policy", '\u{00A0}')).is_err());
		assert!("boundary-policy".parse::<LogicalName>().is_ok());
	}

	#[test]
	fn field_names_deserialize_with_validation() {
		let names: Vec<FieldName> = serde_json::from_str(r#"["requiresMfa", "maxSessionDuration"]"#)
			.expect("Field names should deserialize.");

		assert_eq!(names[1].as_str(), "maxSessionDuration");
		assert!(serde_json::from_str::<Vec<FieldName>>(r#"["requires Mfa"]"#).is_err());
		assert_eq!(
			serde_json::to_string(&names).expect("Field names should serialize."),
			r#"["requiresMfa","maxSessionDuration"]"#
		);
	}

	#[test]
	fn schema_ids_key_maps_queried_by_str() {
		let catalog: BTreeMap<SchemaId, usize> = BTreeMap::from_iter([
			(SchemaId::new("aws-iam:index:Policy").expect("Type token should be valid."), 6),
			(SchemaId::new("aws-iam:index:User").expect("Type token should be valid."), 4),
		]);

		assert_eq!(catalog.get("aws-iam:index:Policy"), Some(&6));
		assert!(catalog.get("aws-iam:index:Group").is_none());
	}
}
