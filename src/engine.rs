//! Provisioning engine contract and the built-in in-memory engine.
//!
//! Builders never talk to an engine. Callers finalize a configuration, wrap it in a
//! [`ProvisionRequest`], and register it; the returned [`ResourceHandle`] mints deferred
//! handles for the resource's outputs so they can feed other resources' inputs.

pub mod recording;

pub use recording::RecordingEngine;

// self
use crate::{
	_prelude::*,
	config::ResolvedConfiguration,
	id::{DeferredId, LogicalName, SchemaId},
	schema::{OutputSpec, Schema},
	value::Deferred,
};

/// Contract implemented by systems that turn resolved configurations into resources.
pub trait ProvisioningEngine
where
	Self: Send + Sync,
{
	/// Registers a resource and returns a handle to its future outputs.
	fn register(&self, request: ProvisionRequest) -> Result<ResourceHandle, EngineError>;
}

/// Error type produced by [`ProvisioningEngine`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum EngineError {
	/// A resource with the same type and logical name is already registered.
	#[error("Resource `{name}` of type `{resource_type}` is already registered.")]
	DuplicateResource {
		/// Resource type token.
		resource_type: SchemaId,
		/// Logical resource name.
		name: LogicalName,
	},
	/// The resource type declares no output with this name.
	#[error("Resource type `{resource_type}` has no output named `{property}`.")]
	UnknownOutput {
		/// Resource type token.
		resource_type: SchemaId,
		/// Requested output property.
		property: String,
	},
}

/// Request to provision one resource from a resolved configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProvisionRequest {
	/// Resource type token, taken from the configuration's schema.
	pub resource_type: SchemaId,
	/// Logical name, unique per resource type.
	pub name: LogicalName,
	/// Resolved arguments.
	pub config: ResolvedConfiguration,
	/// Instant the request was created.
	#[serde(with = "time::serde::rfc3339")]
	pub requested_at: OffsetDateTime,
}
impl ProvisionRequest {
	/// Builds a request for `config`, stamped with the current time.
	pub fn new(name: LogicalName, config: ResolvedConfiguration) -> Self {
		Self::new_at(name, config, OffsetDateTime::now_utc())
	}

	/// Builds a request for `config` with an explicit timestamp.
	pub fn new_at(
		name: LogicalName,
		config: ResolvedConfiguration,
		requested_at: OffsetDateTime,
	) -> Self {
		Self { resource_type: config.schema_id().clone(), name, config, requested_at }
	}
}

/// Handle to a registered resource.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceHandle {
	/// Unique resource name: `urn:<type>::<name>`.
	pub urn: String,
	/// Resource type token.
	pub resource_type: SchemaId,
	/// Logical resource name.
	pub name: LogicalName,
	/// Outputs declared by the resource schema.
	pub outputs: Vec<OutputSpec>,
}
impl ResourceHandle {
	/// Creates the handle for a resource of type `schema` named `name`.
	pub fn new(schema: &Schema, name: LogicalName) -> Self {
		let resource_type = schema.id().clone();
		let urn = format!("urn:{resource_type}::{name}");

		Self { urn, resource_type, name, outputs: schema.outputs().to_vec() }
	}

	/// Deferred handle for the declared output `property`.
	///
	/// The handle resolves to the kind the schema declares for that output; undeclared
	/// properties fail with [`EngineError::UnknownOutput`].
	pub fn output(&self, property: &str) -> Result<Deferred> {
		let Some(spec) = self.outputs.iter().find(|spec| spec.name.as_str() == property) else {
			return Err(EngineError::UnknownOutput {
				resource_type: self.resource_type.clone(),
				property: property.to_owned(),
			}
			.into());
		};
		let id = DeferredId::new(format!("{}#{}", self.urn, spec.name))?;

		Ok(Deferred::new(id, spec.kind.clone()))
	}
}
impl Display for ResourceHandle {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.urn)
	}
}
