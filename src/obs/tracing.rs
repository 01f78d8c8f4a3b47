// self
use crate::{
	_prelude::*,
	config::BuildError,
	id::{FieldName, SchemaId},
};

/// A span wrapping one call to [`finalize`](crate::config::PendingConfiguration::finalize).
#[derive(Clone, Debug)]
pub struct FinalizeSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FinalizeSpan {
	/// Creates a new span tagged with the schema being finalized.
	pub fn new(schema: &SchemaId) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::debug_span!("aws_iam_args.finalize", schema = schema.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = schema;

			Self {}
		}
	}

	/// Enters the span for the duration of the returned guard.
	pub fn entered(self) -> FinalizeSpanGuard {
		#[cfg(feature = "tracing")]
		{
			FinalizeSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			FinalizeSpanGuard {}
		}
	}
}

/// RAII guard returned by [`FinalizeSpan::entered`].
pub struct FinalizeSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for FinalizeSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FinalizeSpanGuard(..)")
	}
}

/// Emits a `debug` event when an unset field takes its declared default.
pub fn record_default_applied(schema: &SchemaId, field: &FieldName) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(schema = schema.as_str(), field = field.as_str(), "applied default");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (schema, field);
	}
}

/// Emits a `warn` event describing a rejected finalization.
pub fn record_finalize_failure(error: &BuildError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(error = %error, "finalize rejected");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = error;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn finalize_span_noop_without_tracing() {
		let schema = SchemaId::new("aws-iam:index:Role").expect("Schema id should be valid.");
		let _guard = FinalizeSpan::new(&schema).entered();
		let field = FieldName::new("path").expect("Field name should be valid.");

		record_default_applied(&schema, &field);
		record_finalize_failure(&BuildError::MissingRequiredFields {
			schema: schema.clone(),
			fields: vec![field],
		});
	}
}
