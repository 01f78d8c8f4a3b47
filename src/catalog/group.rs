// self
use crate::{
	_prelude::*,
	catalog::{self, Catalog},
	schema::Schema,
	value::{Value, ValueKind},
};

/// Inline group policy input.
pub const GROUP_POLICY: &str = "aws-iam:index:GroupPolicy";
/// Group allowed to assume a set of roles.
pub const GROUP_WITH_ASSUMABLE_ROLES_POLICY: &str = "aws-iam:index:GroupWithAssumableRolesPolicy";
/// Group with attached and inline policies.
pub const GROUP_WITH_POLICIES: &str = "aws-iam:index:GroupWithPolicies";

/// Name prefix of the self-management policy.
pub const SELF_MANAGEMENT_POLICY_PREFIX: &str = "IAMSelfManagement-";

pub(super) fn register(catalog: &mut Catalog) -> Result<()> {
	let group_policy = catalog.insert_input(group_policy()?);

	catalog.insert_resource(group_with_assumable_roles_policy()?);
	catalog.insert_resource(group_with_policies(&group_policy)?);

	Ok(())
}

fn group_policy() -> Result<Schema> {
	Ok(catalog::builder("GroupPolicy", "An inline policy attached to a group.")?
		.field(catalog::required("name", ValueKind::STRING, "Name of the group policy.")?)
		.field(catalog::required("policy", ValueKind::STRING, "JSON policy document.")?)
		.field(
			catalog::optional("description", ValueKind::STRING, "Description of the policy.")?
				.with_default(""),
		)
		.build()?)
}

fn group_with_assumable_roles_policy() -> Result<Schema> {
	Ok(catalog::builder(
		"GroupWithAssumableRolesPolicy",
		"An IAM group whose users may assume the listed roles.",
	)?
	.field(catalog::required("name", ValueKind::STRING, "Name of IAM policy and IAM group.")?)
	.field(catalog::required(
		"assumableRoles",
		ValueKind::STRING_LIST,
		"List of IAM roles ARNs which can be assumed by the group.",
	)?)
	.field(catalog::required(
		"groupUsers",
		ValueKind::STRING_LIST,
		"List of IAM users to have in an IAM group which can assume the role.",
	)?)
	.field(catalog::tags()?)
	.outputs(catalog::outputs("", &["policyArn", "groupName", "groupArn"], ValueKind::STRING)?)
	.outputs(catalog::outputs("", &["groupUsers", "assumableRoles"], ValueKind::STRING_LIST)?)
	.build()?)
}

fn group_with_policies(group_policy: &Schema) -> Result<Schema> {
	Ok(catalog::builder(
		"GroupWithPolicies",
		"An IAM group with attached managed policies and inline policies.",
	)?
	.field(catalog::required("name", ValueKind::STRING, "Name of IAM group.")?)
	.field(catalog::required(
		"groupUsers",
		ValueKind::STRING_LIST,
		"List of IAM users to have in an IAM group which can assume the role.",
	)?)
	.field(
		catalog::optional(
			"customGroupPolicyArns",
			ValueKind::STRING_LIST,
			"List of IAM policies ARNs to attach to IAM group.",
		)?
		.with_default(Vec::<String>::new()),
	)
	.field(
		catalog::optional(
			"customGroupPolicies",
			catalog::nested_list(group_policy),
			"List of inline policies to attach to IAM group.",
		)?
		.with_default(Value::NestedList(Vec::new())),
	)
	.field(
		catalog::optional(
			"attachIamSelfManagementPolicy",
			ValueKind::BOOL,
			"Whether to attach IAM policy which allows IAM users to manage their credentials and MFA.",
		)?
		.with_default(true),
	)
	.field(
		catalog::optional(
			"iamSelfManagementPolicyNamePrefix",
			ValueKind::STRING,
			"Name prefix for IAM policy to create with IAM self-management permissions.",
		)?
		.with_default(SELF_MANAGEMENT_POLICY_PREFIX),
	)
	.field(
		catalog::optional(
			"awsAccountId",
			ValueKind::STRING,
			"AWS account id to use inside IAM policies; empty means the current account.",
		)?
		.with_default(""),
	)
	.field(catalog::tags()?)
	.outputs(catalog::outputs("", &["awsAccountId", "groupArn", "groupName"], ValueKind::STRING)?)
	.outputs(catalog::outputs("", &["groupUsers"], ValueKind::STRING_LIST)?)
	.build()?)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn inline_policies_are_nested_configurations() {
		let catalog = Catalog::load().expect("Catalog should load.");
		let policy = catalog
			.builder(GROUP_POLICY)
			.expect("Group policy should be registered.")
			.with("name", "AllowS3Listing")
			.expect("Name should be accepted.")
			.with("policy", r#"{"Version":"2012-10-17","Statement":[]}"#)
			.expect("Document should be accepted.")
			.finalize()
			.expect("Group policy should finalize.");
		let group = catalog
			.builder(GROUP_WITH_POLICIES)
			.expect("Group should be registered.")
			.with("name", "superadmins")
			.expect("Name should be accepted.")
			.with("groupUsers", vec!["user1", "user2"])
			.expect("Users should be accepted.")
			.with("customGroupPolicies", vec![policy])
			.expect("Inline policies should be accepted.")
			.finalize()
			.expect("Group should finalize.");

		assert_eq!(
			group.get_known("iamSelfManagementPolicyNamePrefix"),
			Some(&Value::from(SELF_MANAGEMENT_POLICY_PREFIX))
		);
		assert_eq!(
			group.to_json()["customGroupPolicies"][0]["description"],
			serde_json::json!("")
		);
	}

	#[test]
	fn inline_policies_reject_foreign_configurations() {
		let catalog = Catalog::load().expect("Catalog should load.");
		let foreign = catalog
			.builder(crate::catalog::READONLY_ROLE)
			.expect("Readonly role should be registered.")
			.finalize()
			.expect("Readonly role has no required fields.");
		let mut group = catalog.builder(GROUP_WITH_POLICIES).expect("Group should be registered.");

		assert!(group.set("customGroupPolicies", vec![foreign]).is_err());
	}
}
