//! Crate-level error types shared across schemas, builders, the catalog, and engines.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::id::IdentifierError),
	/// Schema declaration is inconsistent.
	#[error(transparent)]
	Schema(#[from] crate::schema::SchemaError),
	/// Builder rejected a field or could not finalize.
	#[error(transparent)]
	Build(#[from] crate::config::BuildError),
	/// Provisioning engine rejected a request.
	#[error(transparent)]
	Engine(#[from] crate::engine::EngineError),

	/// Schema definition could not be parsed.
	#[error("Schema definition is malformed.")]
	Definition {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Requested type token is not part of the catalog.
	#[error("Catalog has no schema named `{id}`.")]
	UnknownSchema {
		/// Requested type token.
		id: String,
	},
}
