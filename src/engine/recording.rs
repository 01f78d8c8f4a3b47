//! Thread-safe in-memory [`ProvisioningEngine`] that records every accepted request.

// self
use crate::{
	_prelude::*,
	engine::{EngineError, ProvisionRequest, ProvisioningEngine, ResourceHandle},
	id::{LogicalName, SchemaId},
};

type RequestLog = Arc<RwLock<Vec<ProvisionRequest>>>;

/// Engine that keeps registered requests in-process for tests and local tooling.
///
/// Clones share the same record.
#[derive(Clone, Debug, Default)]
pub struct RecordingEngine(RequestLog);
impl RecordingEngine {
	/// Creates an empty engine.
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of every accepted request in registration order.
	pub fn requests(&self) -> Vec<ProvisionRequest> {
		self.0.read().clone()
	}

	/// Accepted request for `(resource_type, name)`, if any.
	pub fn get(&self, resource_type: &str, name: &str) -> Option<ProvisionRequest> {
		self.0
			.read()
			.iter()
			.find(|request| Self::matches(request, resource_type, name))
			.cloned()
	}

	/// Number of accepted requests.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` if nothing has been registered.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn matches(request: &ProvisionRequest, resource_type: &str, name: &str) -> bool {
		request.resource_type.as_str() == resource_type && request.name.as_str() == name
	}

	fn duplicate(resource_type: &SchemaId, name: &LogicalName) -> EngineError {
		EngineError::DuplicateResource { resource_type: resource_type.clone(), name: name.clone() }
	}
}
impl ProvisioningEngine for RecordingEngine {
	fn register(&self, request: ProvisionRequest) -> Result<ResourceHandle, EngineError> {
		let mut guard = self.0.write();

		if guard.iter().any(|existing| {
			Self::matches(existing, request.resource_type.as_str(), request.name.as_str())
		}) {
			return Err(Self::duplicate(&request.resource_type, &request.name));
		}

		let handle = ResourceHandle::new(request.config.schema(), request.name.clone());

		guard.push(request);

		Ok(handle)
	}
}
