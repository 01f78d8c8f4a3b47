// self
use crate::{
	_prelude::*,
	config::{BuildError, ResolvedConfiguration},
	obs::{self, FinalizeOutcome, FinalizeSpan},
	schema::{FieldSpec, Schema},
	value::Input,
};

/// Mutable accumulator of field values for one schema.
///
/// At most one value is stored per field; later writes replace earlier ones wholesale,
/// including collection values. A builder is owned by one caller and consumed by
/// [`finalize`](Self::finalize).
#[derive(Clone, Debug)]
pub struct PendingConfiguration {
	schema: Arc<Schema>,
	values: Vec<Option<Input>>,
}
impl PendingConfiguration {
	/// Creates an empty builder for `schema`.
	pub fn new(schema: Arc<Schema>) -> Self {
		let values = vec![None; schema.len()];

		Self { schema, values }
	}

	/// Schema this builder validates against.
	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	/// Stores `input` for `name`, replacing any previous value.
	///
	/// Fails without modifying the builder when the field is unknown, the input's kind does not
	/// match, or a known integer falls outside the declared range. Deferred inputs are checked
	/// against the kind they declare and are never range-checked.
	pub fn set(&mut self, name: &str, input: impl Into<Input>) -> Result<&mut Self, BuildError> {
		let input = input.into();
		let position = self.position(name)?;

		check_input(&self.schema, &self.schema.fields()[position], &input)?;

		self.values[position] = Some(input);

		Ok(self)
	}

	/// By-value variant of [`set`](Self::set) for chained construction.
	pub fn with(mut self, name: &str, input: impl Into<Input>) -> Result<Self, BuildError> {
		self.set(name, input)?;

		Ok(self)
	}

	/// Returns `name` to the unset state so its default applies again.
	///
	/// Returns the previously stored input, if any.
	pub fn unset(&mut self, name: &str) -> Result<Option<Input>, BuildError> {
		let position = self.position(name)?;

		Ok(self.values[position].take())
	}

	/// Input currently stored for `name`.
	pub fn get(&self, name: &str) -> Option<&Input> {
		self.schema.position(name).and_then(|position| self.values[position].as_ref())
	}

	/// Returns `true` if a value has been stored for `name`.
	pub fn is_set(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Consumes the builder and produces the resolved configuration.
	///
	/// Set fields keep their value, unset optional fields take their default (or are omitted
	/// when they declare none). Every unset required field is reported in one
	/// [`BuildError::MissingRequiredFields`].
	pub fn finalize(self) -> Result<ResolvedConfiguration, BuildError> {
		let schema = self.schema.clone();
		let _span = FinalizeSpan::new(schema.id()).entered();
		let result = self.resolve();
		let outcome = match &result {
			Ok(_) => FinalizeOutcome::Success,
			Err(err) => {
				obs::record_finalize_failure(err);

				FinalizeOutcome::Failure
			},
		};

		obs::record_finalize_outcome(schema.id(), outcome);

		result
	}

	fn resolve(self) -> Result<ResolvedConfiguration, BuildError> {
		let Self { schema, values } = self;
		let mut entries = Vec::with_capacity(values.len());
		let mut missing = Vec::new();

		for (spec, slot) in schema.fields().iter().zip(values) {
			match (slot, spec.default.as_ref()) {
				(Some(input), _) => entries.push((spec.name.clone(), input)),
				(None, Some(default)) => {
					obs::record_default_applied(schema.id(), &spec.name);

					entries.push((spec.name.clone(), Input::Known(default.clone())));
				},
				(None, None) if spec.required => missing.push(spec.name.clone()),
				(None, None) => {},
			}
		}

		if !missing.is_empty() {
			return Err(BuildError::MissingRequiredFields {
				schema: schema.id().clone(),
				fields: missing,
			});
		}

		Ok(ResolvedConfiguration::new(schema, entries))
	}

	fn position(&self, name: &str) -> Result<usize, BuildError> {
		self.schema.position(name).ok_or_else(|| BuildError::UnknownField {
			schema: self.schema.id().clone(),
			field: name.to_owned(),
		})
	}
}

impl Schema {
	/// Creates an empty builder for this schema.
	pub fn pending(self: &Arc<Self>) -> PendingConfiguration {
		PendingConfiguration::new(self.clone())
	}
}

fn check_input(schema: &Schema, spec: &FieldSpec, input: &Input) -> Result<(), BuildError> {
	if !input.conforms_to(&spec.kind) {
		return Err(BuildError::TypeMismatch {
			schema: schema.id().clone(),
			field: spec.name.clone(),
			expected: spec.kind.clone(),
			found: input.kind_label(),
		});
	}
	if let (Some(range), Some(value)) =
		(spec.range, input.as_known().and_then(|value| value.as_int()))
		&& !range.contains(value)
	{
		return Err(BuildError::OutOfRange {
			schema: schema.id().clone(),
			field: spec.name.clone(),
			value,
			min: range.min,
			max: range.max,
		});
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{readonly_role_schema, vpc_cni_policy_schema},
		id::{DeferredId, SchemaId},
		value::{Deferred, Value, ValueKind},
	};

	fn session_schema() -> Arc<Schema> {
		let schema = Schema::builder(
			SchemaId::new("test:index:Session").expect("Schema identifier should be valid."),
		)
		.field(
			FieldSpec::optional("maxSessionDuration", ValueKind::INT)
				.expect("Field name should be valid.")
				.with_default(3600_i64)
				.with_range(3600, 43200),
		)
		.build()
		.expect("Session schema should be valid.");

		Arc::new(schema)
	}

	#[test]
	fn set_rejects_unknown_fields_without_side_effects() {
		let mut pending = PendingConfiguration::new(readonly_role_schema());

		pending.set("name", "custom").expect("Known field should be accepted.");

		let err = pending.set("nmae", "typo").expect_err("Unknown field must be rejected.");

		assert_eq!(err, BuildError::UnknownField {
			schema: SchemaId::new("test:index:ReadonlyRole").expect("Schema id should be valid."),
			field: "nmae".into(),
		});
		assert_eq!(pending.get("name"), Some(&Input::from("custom")));
		assert!(pending.unset("nmae").is_err());
	}

	#[test]
	fn set_rejects_kind_mismatches() {
		let mut pending = PendingConfiguration::new(readonly_role_schema());
		let err = pending
			.set("requiresMfa", "false")
			.expect_err("String for a bool field must be rejected.");

		assert!(matches!(
			err,
			BuildError::TypeMismatch { ref expected, ref found, .. }
				if *expected == ValueKind::BOOL && found == "string"
		));
		assert!(!pending.is_set("requiresMfa"));

		let deferred = Deferred::new(
			DeferredId::new("urn:test::role#arns").expect("Deferred id should be valid."),
			ValueKind::STRING,
		);

		assert!(pending.set("policyArns", deferred).is_err());
	}

	#[test]
	fn set_checks_known_integers_against_the_range() {
		let mut pending = PendingConfiguration::new(session_schema());
		let err = pending
			.set("maxSessionDuration", 60_i64)
			.expect_err("Durations below the range must be rejected.");

		assert_eq!(
			err.to_string(),
			"Field `maxSessionDuration` of schema `test:index:Session` must be within 3600..=43200, got 60."
		);

		let deferred = Deferred::new(
			DeferredId::new("urn:test::cfg#duration").expect("Deferred id should be valid."),
			ValueKind::INT,
		);

		pending
			.set("maxSessionDuration", deferred.clone())
			.expect("Deferred integers are not range-checked.");

		let resolved = pending.finalize().expect("Session configuration should finalize.");

		assert_eq!(resolved.get("maxSessionDuration"), Some(&Input::Deferred(deferred)));
	}

	#[test]
	fn last_write_wins_and_unset_restores_the_default() {
		let mut pending = PendingConfiguration::new(readonly_role_schema());

		pending
			.set("policyArns", vec!["arn:aws:iam::aws:policy/ReadOnlyAccess"])
			.expect("List should be accepted.")
			.set("policyArns", vec!["arn:aws:iam::aws:policy/ViewOnlyAccess"])
			.expect("Replacement list should be accepted.")
			.set("name", "first")
			.expect("Name should be accepted.");

		let previous = pending.unset("name").expect("Known field can be unset.");

		assert_eq!(previous, Some(Input::from("first")));

		let resolved = pending.finalize().expect("Readonly role should finalize.");

		assert_eq!(resolved.get_known("name"), Some(&Value::from("readonly")));
		assert_eq!(
			resolved.get_known("policyArns"),
			Some(&Value::from(vec!["arn:aws:iam::aws:policy/ViewOnlyAccess"]))
		);
	}

	#[test]
	fn schema_is_unchanged_by_sets_and_unsets() {
		let schema = readonly_role_schema();
		let before = schema.as_ref().clone();
		let mut pending = schema.pending();

		pending
			.set("name", "ops")
			.expect("Name should be accepted.")
			.set("requiresMfa", false)
			.expect("Flag should be accepted.");
		pending.unset("name").expect("Known field can be unset.");

		pending.set("tags", "ignored").expect_err("Unknown field must be rejected.");

		assert_eq!(pending.schema(), &before);
		assert!(std::ptr::eq(pending.schema(), schema.as_ref()));

		let resolved = pending.finalize().expect("Readonly role should finalize.");

		assert_eq!(resolved.schema(), &before);
	}

	#[test]
	fn explicit_empty_values_are_kept() {
		let resolved = PendingConfiguration::new(readonly_role_schema())
			.with("name", "")
			.expect("Empty strings are values, not requests for the default.")
			.finalize()
			.expect("Readonly role should finalize.");

		assert_eq!(resolved.get_known("name"), Some(&Value::from("")));
	}

	#[test]
	fn finalize_reports_every_missing_required_field() {
		let err = PendingConfiguration::new(vpc_cni_policy_schema())
			.finalize()
			.expect_err("Missing attach must fail.");

		assert_eq!(err.missing_fields().iter().map(|f| f.as_str()).collect::<Vec<_>>(), ["attach"]);
		assert_eq!(
			err.to_string(),
			"Schema `test:index:VpcCniPolicy` is missing required fields: attach."
		);
	}
}
