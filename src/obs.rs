//! Optional observability helpers for configuration finalization.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit a structured span named `aws_iam_args.finalize` with the `schema`
//!   field, a `debug` event for every default applied, and a `warn` event when finalization fails.
//! - Enable `metrics` to increment the `aws_iam_args_finalize_total` counter for every
//!   finalization, labeled by `schema` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each finalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FinalizeOutcome {
	/// A resolved configuration was produced.
	Success,
	/// Finalization was rejected.
	Failure,
}
impl FinalizeOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FinalizeOutcome::Success => "success",
			FinalizeOutcome::Failure => "failure",
		}
	}
}
impl Display for FinalizeOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
