// std
use std::sync::OnceLock;
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use serde::{Serializer, ser::SerializeMap};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	id::{FieldName, SchemaId},
	schema::Schema,
	value::{Deferred, Input, Value},
};

/// Immutable result of finalizing a builder.
///
/// Holds exactly the set fields plus the optional fields that declare a default, in schema
/// declaration order. Optional fields without a default that were never set are absent.
/// Serializes as a JSON object keyed by field name, with deferred inputs rendered as
/// `{"$deferred": id, "kind": label}`.
pub struct ResolvedConfiguration {
	schema: Arc<Schema>,
	entries: Arc<[(FieldName, Input)]>,
	fingerprint_cache: OnceLock<String>,
}
impl ResolvedConfiguration {
	pub(crate) fn new(schema: Arc<Schema>, entries: Vec<(FieldName, Input)>) -> Self {
		Self { schema, entries: entries.into(), fingerprint_cache: OnceLock::new() }
	}

	/// Schema this configuration was resolved against.
	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	/// Type token of [`schema`](Self::schema).
	pub fn schema_id(&self) -> &SchemaId {
		self.schema.id()
	}

	/// Input stored for `name`, known or deferred.
	pub fn get(&self, name: &str) -> Option<&Input> {
		self.entries.iter().find(|(field, _)| field.as_str() == name).map(|(_, input)| input)
	}

	/// Known value stored for `name`; `None` when absent or deferred.
	pub fn get_known(&self, name: &str) -> Option<&Value> {
		self.get(name).and_then(Input::as_known)
	}

	/// Returns `true` if the configuration holds a value for `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Iterator over `(field, input)` pairs in schema order.
	pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &Input)> {
		self.entries.iter().map(|(field, input)| (field, input))
	}

	/// Number of present fields.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if no field is present.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Every deferred handle reachable from this configuration, including nested ones.
	pub fn deferred(&self) -> Vec<&Deferred> {
		let mut out = Vec::new();

		self.collect_deferred(&mut out);

		out
	}

	/// Returns `true` if no deferred handle is reachable from this configuration.
	pub fn is_fully_known(&self) -> bool {
		self.deferred().is_empty()
	}

	/// Stable digest of the serialized configuration.
	///
	/// Base64 (unpadded) SHA-256 over the schema id and the JSON object form (keys sorted).
	/// Two configurations with the same schema and entries share a fingerprint. Computed once
	/// per instance.
	pub fn fingerprint(&self) -> &str {
		self.fingerprint_cache.get_or_init(|| compute_fingerprint(self))
	}

	/// JSON object form of the configuration.
	pub fn to_json(&self) -> serde_json::Value {
		self.entries.iter().map(|(field, input)| (field.to_string(), input.to_json())).collect()
	}

	pub(crate) fn collect_deferred<'a>(&'a self, out: &mut Vec<&'a Deferred>) {
		self.entries.iter().for_each(|(_, input)| input.collect_deferred(out));
	}
}
impl Clone for ResolvedConfiguration {
	fn clone(&self) -> Self {
		let fingerprint_cache = OnceLock::new();

		if let Some(fingerprint) = self.fingerprint_cache.get() {
			let _ = fingerprint_cache.set(fingerprint.clone());
		}

		Self { schema: self.schema.clone(), entries: self.entries.clone(), fingerprint_cache }
	}
}
impl PartialEq for ResolvedConfiguration {
	fn eq(&self, other: &Self) -> bool {
		self.schema_id() == other.schema_id() && self.entries == other.entries
	}
}
impl Eq for ResolvedConfiguration {}
impl Debug for ResolvedConfiguration {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ResolvedConfiguration")
			.field("schema_id", self.schema_id())
			.field("entries", &DebugEntries(&self.entries))
			.finish()
	}
}
impl Serialize for ResolvedConfiguration {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;

		for (field, input) in self.entries.iter() {
			map.serialize_entry(field.as_str(), input)?;
		}

		map.end()
	}
}
struct DebugEntries<'a>(&'a [(FieldName, Input)]);
impl Debug for DebugEntries<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_map().entries(self.0.iter().map(|(field, input)| (field.as_str(), input))).finish()
	}
}

fn compute_fingerprint(config: &ResolvedConfiguration) -> String {
	let canonical = config.to_json().to_string();
	let mut hasher = Sha256::new();

	hasher.update(config.schema_id().as_bytes());
	hasher.update([0_u8]);
	hasher.update(canonical.as_bytes());

	let digest = hasher.finalize();

	STANDARD_NO_PAD.encode(digest)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{finalize_with, readonly_role_schema},
		config::PendingConfiguration,
		id::DeferredId,
		value::ValueKind,
	};

	fn deferred(id: &str) -> Deferred {
		Deferred::new(DeferredId::new(id).expect("Deferred id should be valid."), ValueKind::STRING)
	}

	#[test]
	fn defaults_fill_unset_fields_in_schema_order() {
		let resolved = PendingConfiguration::new(readonly_role_schema())
			.finalize()
			.expect("Readonly role should finalize with defaults only.");
		let names = resolved.iter().map(|(field, _)| field.as_str()).collect::<Vec<_>>();

		assert_eq!(names, ["name", "requiresMfa", "policyArns"]);
		assert_eq!(
			resolved.to_json(),
			serde_json::json!({ "name": "readonly", "requiresMfa": true, "policyArns": [] })
		);
		assert!(!resolved.contains("permissionsBoundaryArn"));
		assert!(resolved.is_fully_known());
	}

	#[test]
	fn deferred_values_are_collected_through_nesting() {
		let inner = finalize_with(readonly_role_schema(), [(
			"permissionsBoundaryArn",
			Input::from(deferred("urn:aws-iam:index:Policy::boundary#arn")),
		)]);

		assert_eq!(inner.deferred().len(), 1);
		assert!(!inner.is_fully_known());
		assert_eq!(inner.get_known("permissionsBoundaryArn"), None);
		assert_eq!(
			inner.to_json()["permissionsBoundaryArn"],
			serde_json::json!({
				"$deferred": "urn:aws-iam:index:Policy::boundary#arn",
				"kind": "string",
			})
		);

		let wrapper = Schema::builder(
			SchemaId::new("test:index:Wrapper").expect("Schema id should be valid."),
		)
		.build()
		.expect("Empty wrapper schema should be valid.");
		let outer = ResolvedConfiguration::new(
			Arc::new(wrapper),
			vec![
				("readonly".parse().expect("Field name should parse."), Input::from(inner.clone())),
				("all".parse().expect("Field name should parse."), Input::from(vec![inner])),
			],
		);

		assert_eq!(outer.deferred().len(), 2);
	}

	#[test]
	fn fingerprints_track_content() {
		let a = finalize_with(readonly_role_schema(), [("name", Input::from("ops"))]);
		let b = finalize_with(readonly_role_schema(), [("name", Input::from("ops"))]);
		let c = finalize_with(readonly_role_schema(), [("name", Input::from("dev"))]);

		assert_eq!(a, b);
		assert_eq!(a.fingerprint(), b.fingerprint());
		assert_ne!(a.fingerprint(), c.fingerprint());
		assert_eq!(a.fingerprint().len(), 43);
		assert_eq!(a.clone().fingerprint(), a.fingerprint());
	}
}
