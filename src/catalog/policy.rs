// self
use crate::{
	_prelude::*,
	catalog::{self, Catalog},
	schema::Schema,
	value::ValueKind,
};

/// Standalone IAM policy resource.
pub const POLICY: &str = "aws-iam:index:Policy";
/// Read-only IAM policy resource.
pub const READ_ONLY_POLICY: &str = "aws-iam:index:ReadOnlyPolicy";

/// Description applied to policies that do not set one.
pub const DEFAULT_POLICY_DESCRIPTION: &str = "IAM Policy";
/// Console services allowed by read-only policies that do not list their own.
pub const DEFAULT_WEB_CONSOLE_SERVICES: [&str; 4] = ["resource-groups", "tag", "health", "ce"];

const POLICY_OUTPUTS: [&str; 6] = ["id", "arn", "description", "name", "path", "policyDocument"];

pub(super) fn register(catalog: &mut Catalog) -> Result<()> {
	catalog.insert_resource(policy()?);
	catalog.insert_resource(read_only_policy()?);

	Ok(())
}

fn policy() -> Result<Schema> {
	Ok(catalog::builder("Policy", "A standalone IAM policy.")?
		.field(
			catalog::optional("createPolicy", ValueKind::BOOL, "Whether to create the IAM policy.")?
				.with_default(true),
		)
		.field(catalog::required("name", ValueKind::STRING, "The name of the policy.")?)
		.field(
			catalog::optional("path", ValueKind::STRING, "The path of the policy in IAM.")?
				.with_default("/"),
		)
		.field(
			catalog::optional("description", ValueKind::STRING, "The description of the policy.")?
				.with_default(DEFAULT_POLICY_DESCRIPTION),
		)
		.field(catalog::required("policyDocument", ValueKind::STRING, "The policy document.")?)
		.field(catalog::tags()?)
		.outputs(catalog::outputs("", &POLICY_OUTPUTS, ValueKind::STRING)?)
		.build()?)
}

fn read_only_policy() -> Result<Schema> {
	let allow = |name: &str, description: &str| -> Result<_> {
		Ok(catalog::optional(name, ValueKind::BOOL, description)?.with_default(true))
	};

	let description = "An IAM policy granting read-only access to selected services.";

	Ok(catalog::builder("ReadOnlyPolicy", description)?
		.field(catalog::required("name", ValueKind::STRING, "The name of the policy.")?)
		.field(
			catalog::optional("path", ValueKind::STRING, "The path of the policy in IAM.")?
				.with_default("/"),
		)
		.field(
			catalog::optional("description", ValueKind::STRING, "The description of the policy.")?
				.with_default(DEFAULT_POLICY_DESCRIPTION),
		)
		.field(catalog::tags()?)
		.field(
			catalog::optional(
				"allowedServices",
				ValueKind::STRING_LIST,
				"List of services to allow Get/List/Describe/View options, named by IAM prefix.",
			)?
			.with_default(Vec::<String>::new()),
		)
		.field(catalog::optional(
			"additionalPolicyJson",
			ValueKind::STRING,
			"JSON policy document if you want to add custom actions.",
		)?)
		.field(allow(
			"allowCloudwatchLogsQuery",
			"Allows StartQuery/StopQuery/FilterLogEvents CloudWatch actions.",
		)?)
		.field(allow(
			"allowPredefinedStsActions",
			"Allows GetCallerIdentity/GetSessionToken/GetAccessKeyInfo sts actions.",
		)?)
		.field(allow(
			"allowWebConsoleServices",
			"Allows List/Get/Describe/View actions for services used when browsing AWS console.",
		)?)
		.field(
			catalog::optional(
				"webConsoleServices",
				ValueKind::STRING_LIST,
				"List of web console services to allow.",
			)?
			.with_default(DEFAULT_WEB_CONSOLE_SERVICES),
		)
		.outputs(catalog::outputs("", &POLICY_OUTPUTS[..5], ValueKind::STRING)?)
		.outputs(catalog::outputs("", &["policy", "policyJson"], ValueKind::STRING)?)
		.build()?)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::value::Value;

	#[test]
	fn policies_default_path_and_description() {
		let catalog = Catalog::load().expect("Catalog should load.");
		let policy = catalog
			.builder(POLICY)
			.expect("Policy should be registered.")
			.with("name", "example")
			.expect("Name should be accepted.")
			.with("policyDocument", r#"{"Version":"2012-10-17"}"#)
			.expect("Document should be accepted.")
			.finalize()
			.expect("Policy should finalize.");

		assert_eq!(policy.get_known("path"), Some(&Value::from("/")));
		assert_eq!(policy.get_known("description"), Some(&Value::from(DEFAULT_POLICY_DESCRIPTION)));
		assert_eq!(policy.get_known("createPolicy"), Some(&Value::from(true)));
	}

	#[test]
	fn read_only_policies_default_console_services() {
		let catalog = Catalog::load().expect("Catalog should load.");
		let policy = catalog
			.builder(READ_ONLY_POLICY)
			.expect("Read-only policy should be registered.")
			.with("name", "example")
			.expect("Name should be accepted.")
			.with("allowedServices", vec!["rds", "dynamodb"])
			.expect("Services should be accepted.")
			.finalize()
			.expect("Read-only policy should finalize.");

		assert_eq!(
			policy.get_known("webConsoleServices"),
			Some(&Value::from(DEFAULT_WEB_CONSOLE_SERVICES))
		);
		assert!(!policy.contains("additionalPolicyJson"));
	}
}
