// self
use crate::{
	_prelude::*,
	catalog::{self, Catalog},
	schema::Schema,
	value::ValueKind,
};

/// IAM user resource.
pub const USER: &str = "aws-iam:index:User";

/// Length of generated login passwords when unset.
pub const DEFAULT_PASSWORD_LENGTH: i64 = 20;

const USER_INFO_OUTPUTS: [&str; 8] = [
	"name",
	"arn",
	"uniqueId",
	"loginProfileKeyFingerprint",
	"loginProfileEncryptedPassword",
	"loginProfilePassword",
	"sshKeySshPublicKeyId",
	"sshKeyFingerprint",
];
const ACCESS_KEY_OUTPUTS: [&str; 6] =
	["id", "secret", "keyFingerprint", "encryptedSecret", "sesSmtpPasswordV4", "status"];
const KEYBASE_OUTPUTS: [&str; 4] = [
	"passwordDecryptCommand",
	"passwordPgpMessage",
	"secretKeyDecryptCommand",
	"secretKeyPgpMessage",
];

pub(super) fn register(catalog: &mut Catalog) -> Result<()> {
	catalog.insert_resource(user()?);

	Ok(())
}

fn user() -> Result<Schema> {
	let description = "An IAM user with an optional login profile, access key, and SSH key.";

	Ok(catalog::builder("User", description)?
		.field(catalog::required("name", ValueKind::STRING, "Desired name for the IAM user.")?)
		.field(
			catalog::optional("path", ValueKind::STRING, "Desired path for the IAM user.")?
				.with_default("/"),
		)
		.field(
			catalog::optional(
				"forceDestroy",
				ValueKind::BOOL,
				"Destroy the user even if it has access keys, a login profile, or MFA devices not managed here.",
			)?
			.with_default(false),
		)
		.field(catalog::optional(
			"pgpKey",
			ValueKind::STRING,
			"Either a base-64 encoded PGP public key, or a keybase username in the form `keybase:username`.",
		)?)
		.field(
			catalog::optional(
				"passwordResetRequired",
				ValueKind::BOOL,
				"Whether the user should be forced to reset the generated password on first login.",
			)?
			.with_default(false),
		)
		.field(
			catalog::optional(
				"passwordLength",
				ValueKind::INT,
				"The length of the generated password.",
			)?
			.with_default(DEFAULT_PASSWORD_LENGTH),
		)
		.field(
			catalog::optional(
				"uploadIamUserSshKey",
				ValueKind::BOOL,
				"Whether to upload a public ssh key to the IAM user.",
			)?
			.with_default(false),
		)
		.field(
			catalog::optional(
				"sshKeyEncoding",
				ValueKind::STRING,
				"Public key encoding format to use in the response: SSH or PEM.",
			)?
			.with_default("SSH"),
		)
		.field(catalog::optional(
			"sshPublicKey",
			ValueKind::STRING,
			"The SSH public key, encoded in ssh-rsa format or PEM format.",
		)?)
		.field(catalog::optional(
			"permissionsBoundary",
			ValueKind::STRING,
			"The ARN of the policy that is used to set the permissions boundary for the user.",
		)?)
		.field(catalog::tags()?)
		.outputs(catalog::outputs("userInfo", &USER_INFO_OUTPUTS, ValueKind::STRING)?)
		.outputs(catalog::outputs("accessKey", &ACCESS_KEY_OUTPUTS, ValueKind::STRING)?)
		.outputs(catalog::outputs("", &["pgpKey"], ValueKind::STRING)?)
		.outputs(catalog::outputs("keybase", &KEYBASE_OUTPUTS, ValueKind::STRING)?)
		.build()?)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::value::Value;

	#[test]
	fn users_default_login_profile_settings() {
		let catalog = Catalog::load().expect("Catalog should load.");
		let user = catalog
			.builder(USER)
			.expect("User should be registered.")
			.with("name", "pulumipus")
			.expect("Name should be accepted.")
			.with("pgpKey", "keybase:test")
			.expect("PGP key should be accepted.")
			.finalize()
			.expect("User should finalize.");

		assert_eq!(user.get_known("passwordLength"), Some(&Value::from(DEFAULT_PASSWORD_LENGTH)));
		assert_eq!(user.get_known("sshKeyEncoding"), Some(&Value::from("SSH")));
		assert!(!user.contains("sshPublicKey"));
	}
}
