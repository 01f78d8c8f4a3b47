//! Schema-driven argument builders for AWS IAM component resources.
//!
//! Each resource or input type is described by a [`schema::Schema`]. A
//! [`config::PendingConfiguration`] accepts typed or deferred field values, and
//! [`finalize`](config::PendingConfiguration::finalize) applies declared defaults, rejects missing
//! required fields, and yields an immutable [`config::ResolvedConfiguration`] ready to hand to a
//! [`engine::ProvisioningEngine`]. The [`catalog`] module ships the AWS IAM component schemas.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod id;
pub mod obs;
pub mod schema;
pub mod value;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::{PendingConfiguration, ResolvedConfiguration},
		engine::{ProvisionRequest, RecordingEngine, ResourceHandle},
		id::{LogicalName, SchemaId},
		schema::{FieldSpec, Schema},
		value::{ScalarKind, ValueKind},
	};

	/// Schema used across tests: a readonly role with three defaulted optional fields and one
	/// optional field without a default.
	pub fn readonly_role_schema() -> Arc<Schema> {
		let id = SchemaId::new("test:index:ReadonlyRole")
			.expect("Readonly role schema identifier should be valid.");
		let schema = Schema::builder(id)
			.field(
				FieldSpec::optional("name", ValueKind::Scalar(ScalarKind::String))
					.expect("Field name should be valid.")
					.with_default("readonly"),
			)
			.field(
				FieldSpec::optional("requiresMfa", ValueKind::Scalar(ScalarKind::Bool))
					.expect("Field name should be valid.")
					.with_default(true),
			)
			.field(
				FieldSpec::optional("policyArns", ValueKind::List(ScalarKind::String))
					.expect("Field name should be valid.")
					.with_default(Vec::<String>::new()),
			)
			.field(
				FieldSpec::optional("permissionsBoundaryArn", ValueKind::Scalar(ScalarKind::String))
					.expect("Field name should be valid."),
			)
			.build()
			.expect("Readonly role schema should be valid.");

		Arc::new(schema)
	}

	/// Schema used across tests: one required toggle and one defaulted toggle.
	pub fn vpc_cni_policy_schema() -> Arc<Schema> {
		let id = SchemaId::new("test:index:VpcCniPolicy")
			.expect("VPC CNI schema identifier should be valid.");
		let schema = Schema::builder(id)
			.field(
				FieldSpec::required("attach", ValueKind::Scalar(ScalarKind::Bool))
					.expect("Field name should be valid."),
			)
			.field(
				FieldSpec::optional("enableIpv4", ValueKind::Scalar(ScalarKind::Bool))
					.expect("Field name should be valid.")
					.with_default(true),
			)
			.build()
			.expect("VPC CNI schema should be valid.");

		Arc::new(schema)
	}

	/// Finalizes a fresh builder for `schema` after applying `fields` in order.
	pub fn finalize_with<'a, I>(schema: Arc<Schema>, fields: I) -> ResolvedConfiguration
	where
		I: IntoIterator<Item = (&'a str, crate::value::Input)>,
	{
		let mut pending = PendingConfiguration::new(schema);

		for (name, input) in fields {
			pending.set(name, input).expect("Test fixture field should be accepted.");
		}

		pending.finalize().expect("Test fixture configuration should finalize.")
	}

	/// Registers `config` under `name` with a [`RecordingEngine`] and returns the handle.
	pub fn register_test_resource(
		engine: &RecordingEngine,
		name: &str,
		config: ResolvedConfiguration,
	) -> ResourceHandle {
		use crate::engine::ProvisioningEngine;

		let name = LogicalName::new(name).expect("Logical name fixture should be valid.");

		engine
			.register(ProvisionRequest::new(name, config))
			.expect("Recording engine should accept the test resource.")
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;

	pub use crate::error::{Error, Result};
}

#[cfg(test)] use color_eyre as _;
