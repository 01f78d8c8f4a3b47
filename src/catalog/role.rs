// self
use crate::{
	_prelude::*,
	catalog::{self, Catalog},
	schema::{FieldSpec, OutputSpec, Schema},
	value::ValueKind,
};

/// Generic IAM role input.
pub const ROLE: &str = "aws-iam:index:Role";
/// Admin role input without MFA.
pub const ADMIN_ROLE: &str = "aws-iam:index:AdminRole";
/// Poweruser role input without MFA.
pub const POWERUSER_ROLE: &str = "aws-iam:index:PoweruserRole";
/// Readonly role input without MFA.
pub const READONLY_ROLE: &str = "aws-iam:index:ReadonlyRole";
/// Admin role input requiring MFA by default.
pub const ADMIN_ROLE_WITH_MFA: &str = "aws-iam:index:AdminRoleWithMFA";
/// Poweruser role input requiring MFA by default.
pub const POWERUSER_ROLE_WITH_MFA: &str = "aws-iam:index:PoweruserRoleWithMFA";
/// Readonly role input requiring MFA by default.
pub const READONLY_ROLE_WITH_MFA: &str = "aws-iam:index:ReadonlyRoleWithMFA";
/// Role assumable by trusted ARNs or services.
pub const ASSUMABLE_ROLE: &str = "aws-iam:index:AssumableRole";
/// Role assumable through OIDC federation.
pub const ASSUMABLE_ROLE_WITH_OIDC: &str = "aws-iam:index:AssumableRoleWithOIDC";
/// Role assumable through SAML federation.
pub const ASSUMABLE_ROLE_WITH_SAML: &str = "aws-iam:index:AssumableRoleWithSAML";
/// Admin, poweruser, and readonly roles assumable by trusted ARNs or services.
pub const ASSUMABLE_ROLES: &str = "aws-iam:index:AssumableRoles";
/// Admin, poweruser, and readonly roles assumable through SAML federation.
pub const ASSUMABLE_ROLES_WITH_SAML: &str = "aws-iam:index:AssumableRolesWithSAML";

/// Managed policy attached to admin roles by default.
pub const ADMIN_POLICY_ARN: &str = "arn:aws:iam::aws:policy/AdministratorAccess";
/// Managed policy attached to poweruser roles by default.
pub const POWERUSER_POLICY_ARN: &str = "arn:aws:iam::aws:policy/PowerUserAccess";
/// Managed policy attached to readonly roles by default.
pub const READONLY_POLICY_ARN: &str = "arn:aws:iam::aws:policy/ReadOnlyAccess";
/// SAML sign-in endpoint trusted by SAML roles by default.
pub const AWS_SAML_ENDPOINT: &str = "https://signin.aws.amazon.com/saml";

/// Shortest session an IAM role accepts, in seconds.
pub const MIN_SESSION_DURATION: i64 = 3_600;
/// Longest session an IAM role accepts, in seconds.
pub const MAX_SESSION_DURATION: i64 = 43_200;
/// Default maximum age of a valid MFA token, in seconds.
pub const DEFAULT_MFA_AGE: i64 = 86_400;

struct RoleVariant {
	name: &'static str,
	description: &'static str,
	role_name: &'static str,
	policy_arn: &'static str,
	requires_mfa: Option<bool>,
}

const VARIANTS: [RoleVariant; 6] = [
	RoleVariant {
		name: "AdminRole",
		description: "The admin role.",
		role_name: "admin",
		policy_arn: ADMIN_POLICY_ARN,
		requires_mfa: None,
	},
	RoleVariant {
		name: "PoweruserRole",
		description: "The poweruser role.",
		role_name: "poweruser",
		policy_arn: POWERUSER_POLICY_ARN,
		requires_mfa: None,
	},
	RoleVariant {
		name: "ReadonlyRole",
		description: "The readonly role.",
		role_name: "readonly",
		policy_arn: READONLY_POLICY_ARN,
		requires_mfa: None,
	},
	RoleVariant {
		name: "AdminRoleWithMFA",
		description: "The admin role.",
		role_name: "admin",
		policy_arn: ADMIN_POLICY_ARN,
		requires_mfa: Some(true),
	},
	RoleVariant {
		name: "PoweruserRoleWithMFA",
		description: "The poweruser role.",
		role_name: "poweruser",
		policy_arn: POWERUSER_POLICY_ARN,
		requires_mfa: Some(true),
	},
	RoleVariant {
		name: "ReadonlyRoleWithMFA",
		description: "The readonly role.",
		role_name: "readonly",
		policy_arn: READONLY_POLICY_ARN,
		requires_mfa: Some(true),
	},
];

pub(super) const ROLE_OUTPUTS: [&str; 4] = ["arn", "name", "path", "uniqueId"];

pub(super) fn register(catalog: &mut Catalog) -> Result<()> {
	let role = catalog.insert_input(role_schema("Role", "An IAM role.")?);

	for variant in &VARIANTS {
		catalog.insert_input(variant_schema(variant)?);
	}

	catalog.insert_resource(assumable_role(&role)?);
	catalog.insert_resource(assumable_role_with_oidc(&role)?);
	catalog.insert_resource(assumable_role_with_saml(&role)?);

	let roles = assumable_roles(catalog)?;

	catalog.insert_resource(roles);

	let roles = assumable_roles_with_saml(catalog)?;

	catalog.insert_resource(roles);

	Ok(())
}

/// Fields shared by every free-form role input.
pub(super) fn role_schema(name: &str, description: &str) -> Result<Schema> {
	Ok(catalog::builder(name, description)?
		.field(catalog::optional("name", ValueKind::STRING, "IAM role name.")?)
		.field(catalog::optional("namePrefix", ValueKind::STRING, "IAM role name prefix.")?)
		.field(catalog::optional("description", ValueKind::STRING, "IAM role description.")?)
		.field(catalog::optional("path", ValueKind::STRING, "Path of IAM role.")?.with_default("/"))
		.field(catalog::optional(
			"permissionsBoundaryArn",
			ValueKind::STRING,
			"Permissions boundary ARN to use for IAM role.",
		)?)
		.field(
			catalog::optional(
				"policyArns",
				ValueKind::STRING_LIST,
				"List of ARNs of IAM policies to attach to IAM role.",
			)?
			.with_default(Vec::<String>::new()),
		)
		.field(
			catalog::optional("requiresMfa", ValueKind::BOOL, "Whether role requires MFA.")?
				.with_default(false),
		)
		.field(catalog::tags()?)
		.build()?)
}

fn variant_schema(variant: &RoleVariant) -> Result<Schema> {
	let mut builder = catalog::builder(variant.name, variant.description)?
		.field(
			catalog::optional("name", ValueKind::STRING, "IAM role name.")?
				.with_default(variant.role_name),
		)
		.field(catalog::optional("path", ValueKind::STRING, "Path of IAM role.")?.with_default("/"))
		.field(
			catalog::optional(
				"permissionsBoundaryArn",
				ValueKind::STRING,
				"Permissions boundary ARN to use for the role.",
			)?
			.with_default(""),
		)
		.field(
			catalog::optional(
				"policyArns",
				ValueKind::STRING_LIST,
				"List of policy ARNs to use for the role.",
			)?
			.with_default(vec![variant.policy_arn]),
		);

	if let Some(requires_mfa) = variant.requires_mfa {
		builder = builder.field(
			catalog::optional("requiresMfa", ValueKind::BOOL, "Whether the role requires MFA.")?
				.with_default(requires_mfa),
		);
	}

	Ok(builder.field(catalog::tags()?).build()?)
}

/// `maxSessionDuration`, bounded by the IAM session limits.
pub(super) fn max_session_duration() -> Result<FieldSpec> {
	Ok(catalog::optional(
		"maxSessionDuration",
		ValueKind::INT,
		"Maximum CLI/API session duration in seconds between 3600 and 43200.",
	)?
	.with_default(MIN_SESSION_DURATION)
	.with_range(MIN_SESSION_DURATION, MAX_SESSION_DURATION))
}

/// `forceDetachPolicies`, off by default.
pub(super) fn force_detach_policies() -> Result<FieldSpec> {
	Ok(catalog::optional(
		"forceDetachPolicies",
		ValueKind::BOOL,
		"Whether policies should be detached from this role when destroying.",
	)?
	.with_default(false))
}

fn mfa_age() -> Result<FieldSpec> {
	Ok(catalog::optional(
		"mfaAge",
		ValueKind::INT,
		"Max age of valid MFA (in seconds) for roles which require MFA.",
	)?
	.with_default(DEFAULT_MFA_AGE))
}

fn string_list(name: &str, description: &str) -> Result<FieldSpec> {
	Ok(catalog::optional(name, ValueKind::STRING_LIST, description)?
		.with_default(Vec::<String>::new()))
}

fn flag(name: &str, description: &str) -> Result<FieldSpec> {
	Ok(catalog::optional(name, ValueKind::BOOL, description)?.with_default(false))
}

fn assumable_role(role: &Schema) -> Result<Schema> {
	let description = "A single IAM role assumable by trusted ARNs or services.";

	Ok(catalog::builder("AssumableRole", description)?
		.field(
			catalog::optional("trustedRoleActions", ValueKind::STRING_LIST, "Actions of STS.")?
				.with_default(vec!["sts:AssumeRole"]),
		)
		.field(string_list("trustedRoleArns", "ARNs of AWS entities who can assume these roles.")?)
		.field(string_list("trustedRoleServices", "AWS Services that can assume these roles.")?)
		.field(mfa_age()?)
		.field(max_session_duration()?)
		.field(catalog::optional("role", catalog::nested(role), "IAM role.")?)
		.field(catalog::tags()?)
		.field(catalog::optional(
			"customRoleTrustPolicy",
			ValueKind::STRING,
			"A custom role trust policy.",
		)?)
		.field(flag("attachAdminPolicy", "Whether to attach an admin policy to a role.")?)
		.field(flag("attachPoweruserPolicy", "Whether to attach a poweruser policy to a role.")?)
		.field(flag("attachReadonlyPolicy", "Whether to attach a readonly policy to a role.")?)
		.field(force_detach_policies()?)
		.field(string_list(
			"roleStsExternalIds",
			"STS ExternalId condition values to use with a role (when MFA is not required).",
		)?)
		.outputs(catalog::outputs("role", &ROLE_OUTPUTS, ValueKind::STRING)?)
		.outputs(catalog::outputs("role", &["requiresMfa"], ValueKind::BOOL)?)
		.outputs(catalog::outputs("role", &["stsExternalIds"], ValueKind::STRING_LIST)?)
		.outputs(catalog::outputs(
			"instanceProfile",
			&["arn", "name", "id", "path"],
			ValueKind::STRING,
		)?)
		.build()?)
}

fn assumable_role_with_oidc(role: &Schema) -> Result<Schema> {
	Ok(catalog::builder(
		"AssumableRoleWithOIDC",
		"A single IAM role assumable through OpenID Connect federation.",
	)?
	.field(string_list("providerUrls", "List of URLs of the OIDC Providers.")?)
	.field(
		catalog::optional(
			"awsAccountId",
			ValueKind::STRING,
			"The AWS account ID where the OIDC provider lives, leave empty to use the account for the AWS provider.",
		)?
		.with_default(""),
	)
	.field(catalog::tags()?)
	.field(catalog::optional("role", catalog::nested(role), "IAM role.")?)
	.field(max_session_duration()?)
	.field(string_list(
		"oidcFullyQualifiedSubjects",
		"The fully qualified OIDC subjects to be added to the role policy.",
	)?)
	.field(string_list(
		"oidcSubjectsWithWildcards",
		"The OIDC subject using wildcards to be added to the role policy.",
	)?)
	.field(string_list(
		"oidcFullyQualifiedAudiences",
		"The audience to be added to the role policy.",
	)?)
	.field(force_detach_policies()?)
	.outputs(catalog::outputs("", &ROLE_OUTPUTS, ValueKind::STRING)?)
	.build()?)
}

fn saml_endpoint() -> Result<FieldSpec> {
	Ok(catalog::optional("awsSamlEndpoint", ValueKind::STRING, "AWS SAML Endpoint.")?
		.with_default(AWS_SAML_ENDPOINT))
}

fn assumable_role_with_saml(role: &Schema) -> Result<Schema> {
	Ok(catalog::builder(
		"AssumableRoleWithSAML",
		"A single IAM role assumable through SAML federation.",
	)?
	.field(string_list("providerIds", "List of SAML Provider IDs.")?)
	.field(saml_endpoint()?)
	.field(catalog::tags()?)
	.field(catalog::optional("role", catalog::nested(role), "IAM role.")?)
	.field(max_session_duration()?)
	.field(force_detach_policies()?)
	.outputs(catalog::outputs("", &ROLE_OUTPUTS, ValueKind::STRING)?)
	.build()?)
}

fn role_set_outputs() -> Result<Vec<OutputSpec>> {
	let mut specs = Vec::new();

	for role in ["admin", "poweruser", "readonly"] {
		specs.extend(catalog::outputs(
			role,
			&["roleArn", "roleName", "rolePath", "roleUniqueId"],
			ValueKind::STRING,
		)?);
		specs.extend(catalog::outputs(role, &["requiresMfa"], ValueKind::BOOL)?);
	}

	Ok(specs)
}

fn defaulted_role(
	registered: &Catalog,
	field: &str,
	id: &str,
	description: &str,
) -> Result<FieldSpec> {
	let schema = registered.schema(id)?;

	Ok(catalog::optional(field, catalog::nested(schema), description)?
		.with_default(catalog::defaults_of(schema)?))
}

fn assumable_roles(registered: &Catalog) -> Result<Schema> {
	Ok(catalog::builder(
		"AssumableRoles",
		"Admin, poweruser, and readonly IAM roles assumable by trusted ARNs or services.",
	)?
	.field(string_list("trustedRoleArns", "ARNs of AWS entities who can assume these roles.")?)
	.field(string_list("trustedRoleServices", "AWS Services that can assume these roles.")?)
	.field(mfa_age()?)
	.field(max_session_duration()?)
	.field(force_detach_policies()?)
	.field(defaulted_role(registered, "admin", ADMIN_ROLE_WITH_MFA, "The admin role.")?)
	.field(defaulted_role(registered, "poweruser", POWERUSER_ROLE_WITH_MFA, "The poweruser role.")?)
	.field(defaulted_role(registered, "readonly", READONLY_ROLE_WITH_MFA, "The readonly role.")?)
	.outputs(role_set_outputs()?)
	.build()?)
}

fn assumable_roles_with_saml(registered: &Catalog) -> Result<Schema> {
	Ok(catalog::builder(
		"AssumableRolesWithSAML",
		"Admin, poweruser, and readonly IAM roles assumable through SAML federation.",
	)?
	.field(string_list("providerIds", "List of SAML Provider IDs.")?)
	.field(saml_endpoint()?)
	.field(max_session_duration()?)
	.field(force_detach_policies()?)
	.field(defaulted_role(registered, "admin", ADMIN_ROLE, "The admin role.")?)
	.field(defaulted_role(registered, "poweruser", POWERUSER_ROLE, "The poweruser role.")?)
	.field(defaulted_role(registered, "readonly", READONLY_ROLE, "The readonly role.")?)
	.outputs(role_set_outputs()?)
	.build()?)
}
