// self
use crate::{id::SchemaId, obs::FinalizeOutcome};

/// Records a finalization outcome via the global metrics recorder (when enabled).
pub fn record_finalize_outcome(schema: &SchemaId, outcome: FinalizeOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"aws_iam_args_finalize_total",
			"schema" => schema.to_string(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (schema, outcome);
	}
}
