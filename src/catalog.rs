//! Schema tables for the AWS IAM component resources and their nested input types.
//!
//! Every schema is keyed by its type token, `aws-iam:index:<Name>`. Resource schemas (the ones a
//! [`ProvisioningEngine`](crate::engine::ProvisioningEngine) registers) reference nested input
//! schemas through `nested<..>` and `nested_list<..>` kinds, so nested schemas are registered
//! first.
//!
//! ```
//! use aws_iam_args::catalog::{self, Catalog};
//!
//! let catalog = Catalog::global()?;
//! let role = catalog
//! 	.builder(catalog::ASSUMABLE_ROLE)?
//! 	.with("trustedRoleArns", vec!["arn:aws:iam::307990089504:root"])?
//! 	.finalize()?;
//!
//! assert_eq!(role.get_known("maxSessionDuration").and_then(|v| v.as_int()), Some(3600));
//! # Ok::<(), aws_iam_args::error::Error>(())
//! ```

/// Account alias and password policy.
pub mod account;
/// EKS service-account roles and add-on policies.
pub mod eks;
/// Groups and inline group policies.
pub mod group;
/// Standalone IAM policies.
pub mod policy;
/// Assumable roles and role input types.
pub mod role;
/// IAM users.
pub mod user;

pub use account::*;
pub use eks::*;
pub use group::*;
pub use policy::*;
pub use role::*;
pub use user::*;

// std
use std::{collections::BTreeSet, sync::OnceLock};
// self
use crate::{
	_prelude::*,
	config::{PendingConfiguration, ResolvedConfiguration},
	id::{IdentifierError, SchemaId},
	schema::{FieldSpec, OutputSpec, Schema},
	value::ValueKind,
};

/// Prefix shared by every type token in the catalog.
pub const TYPE_PREFIX: &str = "aws-iam:index:";

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// Lookup table of validated schemas keyed by type token.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
	schemas: BTreeMap<SchemaId, Arc<Schema>>,
	resources: BTreeSet<SchemaId>,
}
impl Catalog {
	/// Process-wide catalog, built on first use.
	pub fn global() -> Result<&'static Self> {
		if let Some(catalog) = CATALOG.get() {
			return Ok(catalog);
		}

		let catalog = Self::load()?;

		Ok(CATALOG.get_or_init(|| catalog))
	}

	/// Builds a fresh catalog with every AWS IAM schema.
	pub fn load() -> Result<Self> {
		let mut catalog = Self::default();

		account::register(&mut catalog)?;
		role::register(&mut catalog)?;
		group::register(&mut catalog)?;
		policy::register(&mut catalog)?;
		user::register(&mut catalog)?;
		eks::register(&mut catalog)?;

		Ok(catalog)
	}

	/// Schema registered under `id`.
	pub fn get(&self, id: &str) -> Option<&Arc<Schema>> {
		self.schemas.get(id)
	}

	/// Schema registered under `id`, or [`Error::UnknownSchema`].
	pub fn schema(&self, id: &str) -> Result<&Arc<Schema>> {
		self.get(id).ok_or_else(|| Error::UnknownSchema { id: id.to_owned() })
	}

	/// Empty builder for the schema registered under `id`.
	pub fn builder(&self, id: &str) -> Result<PendingConfiguration> {
		self.schema(id).map(Schema::pending)
	}

	/// Every registered type token in lexicographic order.
	pub fn ids(&self) -> impl Iterator<Item = &SchemaId> {
		self.schemas.keys()
	}

	/// Type tokens of the resource schemas, excluding nested input types.
	pub fn resource_ids(&self) -> impl Iterator<Item = &SchemaId> {
		self.resources.iter()
	}

	/// Returns `true` if `id` names a resource schema rather than a nested input type.
	pub fn is_resource(&self, id: &str) -> bool {
		self.resources.contains(id)
	}

	/// Number of registered schemas.
	pub fn len(&self) -> usize {
		self.schemas.len()
	}

	/// Returns `true` if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.schemas.is_empty()
	}

	fn insert_input(&mut self, schema: Schema) -> Arc<Schema> {
		let schema = Arc::new(schema);

		self.schemas.insert(schema.id().clone(), schema.clone());

		schema
	}

	fn insert_resource(&mut self, schema: Schema) -> Arc<Schema> {
		self.resources.insert(schema.id().clone());

		self.insert_input(schema)
	}
}

/// Type token for `name`, e.g. `aws-iam:index:Policy` for `Policy`.
pub fn type_id(name: &str) -> Result<SchemaId, IdentifierError> {
	SchemaId::new(format!("{TYPE_PREFIX}{name}"))
}

fn builder(name: &str, description: &str) -> Result<crate::schema::SchemaBuilder> {
	Ok(Schema::builder(type_id(name)?).describe(description))
}

fn optional(name: &str, kind: ValueKind, description: &str) -> Result<FieldSpec> {
	Ok(FieldSpec::optional(name, kind)?.describe(description))
}

fn required(name: &str, kind: ValueKind, description: &str) -> Result<FieldSpec> {
	Ok(FieldSpec::required(name, kind)?.describe(description))
}

fn nested(schema: &Schema) -> ValueKind {
	ValueKind::Nested(schema.id().clone())
}

fn nested_list(schema: &Schema) -> ValueKind {
	ValueKind::NestedList(schema.id().clone())
}

// Outputs of `kind` named `<prefix>.<name>`, or plain `<name>` without a prefix.
fn outputs(prefix: &str, names: &[&str], kind: ValueKind) -> Result<Vec<OutputSpec>> {
	names
		.iter()
		.map(|name| {
			let name =
				if prefix.is_empty() { (*name).to_owned() } else { format!("{prefix}.{name}") };

			Ok(OutputSpec::new(name, kind.clone())?)
		})
		.collect()
}

fn tags() -> Result<FieldSpec> {
	optional("tags", ValueKind::STRING_MAP, "A map of tags to add.")
}

// Defaults of a nested input type, used where a resource fills an omitted nested argument.
fn defaults_of(schema: &Arc<Schema>) -> Result<ResolvedConfiguration> {
	Ok(schema.pending().finalize()?)
}
