// self
use crate::{
	_prelude::*,
	catalog::{self, Catalog},
	schema::Schema,
	value::ValueKind,
};

/// Password policy input.
pub const ACCOUNT_PASSWORD_POLICY: &str = "aws-iam:index:AccountPasswordPolicy";
/// Account alias and password policy resource.
pub const ACCOUNT: &str = "aws-iam:index:Account";

/// Shortest password a password policy may require.
pub const MIN_PASSWORD_LENGTH: i64 = 6;
/// Longest password a password policy may require.
pub const MAX_PASSWORD_LENGTH: i64 = 128;

pub(super) fn register(catalog: &mut Catalog) -> Result<()> {
	let policy = catalog.insert_input(password_policy()?);

	catalog.insert_resource(account(&policy)?);

	Ok(())
}

fn password_policy() -> Result<Schema> {
	let flag = |name: &str, description: &str| -> Result<_> {
		Ok(catalog::optional(name, ValueKind::BOOL, description)?.with_default(false))
	};

	Ok(catalog::builder(
		"AccountPasswordPolicy",
		"Options to specify complexity requirements and mandatory rotation periods for your IAM users' passwords.",
	)?
	.field(catalog::optional(
		"maxAge",
		ValueKind::INT,
		"The number of days that an user password is valid; `0` disables expiry.",
	)?)
	.field(
		catalog::optional(
			"minimumLength",
			ValueKind::INT,
			"Minimum length to require for user passwords.",
		)?
		.with_range(MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH),
	)
	.field(catalog::optional(
		"reusePrevention",
		ValueKind::INT,
		"The number of previous passwords that users are prevented from reusing.",
	)?)
	.field(flag("allowUsersToChange", "Whether to allow users to change their own password.")?)
	.field(flag(
		"hardExpiry",
		"Whether users are prevented from setting a new password after their password has expired.",
	)?)
	.field(flag(
		"requireLowercaseCharacters",
		"Whether to require lowercase characters for user passwords.",
	)?)
	.field(flag(
		"requireUppercaseCharacters",
		"Whether to require uppercase characters for user passwords.",
	)?)
	.field(flag("requireNumbers", "Whether to require numbers for user passwords.")?)
	.field(flag("requireSymbols", "Whether to require symbols for user passwords.")?)
	.build()?)
}

fn account(password_policy: &Schema) -> Result<Schema> {
	Ok(catalog::builder("Account", "An IAM account alias and password policy.")?
		.field(catalog::required(
			"accountAlias",
			ValueKind::STRING,
			"AWS IAM account alias for this account.",
		)?)
		.field(catalog::required(
			"passwordPolicy",
			catalog::nested(password_policy),
			"Password complexity requirements and rotation periods.",
		)?)
		.outputs(catalog::outputs("", &["id", "arn", "userId"], ValueKind::STRING)?)
		.outputs(catalog::outputs("", &["passwordPolicyExpirePasswords"], ValueKind::BOOL)?)
		.build()?)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::config::BuildError;

	#[test]
	fn account_requires_alias_and_policy() {
		let catalog = Catalog::load().expect("Catalog should load.");
		let err = catalog
			.builder(ACCOUNT)
			.expect("Account should be registered.")
			.finalize()
			.expect_err("Account without arguments must fail.");

		assert_eq!(
			err.missing_fields().iter().map(|field| field.as_str()).collect::<Vec<_>>(),
			["accountAlias", "passwordPolicy"]
		);

		let err = catalog
			.builder(ACCOUNT)
			.expect("Account should be registered.")
			.with("accountAlias", "awesome-company")
			.expect("Alias should be accepted.")
			.finalize()
			.expect_err("Account without a password policy must fail.");

		assert_eq!(
			err.missing_fields().iter().map(|field| field.as_str()).collect::<Vec<_>>(),
			["passwordPolicy"]
		);
		assert_eq!(
			err.to_string(),
			"Schema `aws-iam:index:Account` is missing required fields: passwordPolicy."
		);
	}

	#[test]
	fn password_length_is_bounded() {
		let catalog = Catalog::load().expect("Catalog should load.");
		let mut policy = catalog
			.builder(ACCOUNT_PASSWORD_POLICY)
			.expect("Password policy should be registered.");

		assert!(matches!(
			policy.set("minimumLength", 4_i64),
			Err(BuildError::OutOfRange { min: 6, max: 128, .. })
		));

		policy.set("minimumLength", 8_i64).expect("Eight characters should be accepted.");

		let policy = policy.finalize().expect("Password policy has no required fields.");
		let account = catalog
			.builder(ACCOUNT)
			.expect("Account should be registered.")
			.with("accountAlias", "awesome-company")
			.expect("Alias should be accepted.")
			.with("passwordPolicy", policy)
			.expect("Resolved password policy should be accepted.")
			.finalize()
			.expect("Account should finalize.");

		assert_eq!(account.len(), 2);
	}
}
