// crates.io
use color_eyre::Result;
use serde_json::json;
// self
use aws_iam_args::{
	_preludet::*,
	config::{BuildError, PendingConfiguration},
	value::Input,
};

#[test]
fn readonly_role_defaults_fill_every_unset_field() -> Result<()> {
	let resolved = readonly_role_schema().pending().finalize()?;

	assert_eq!(
		resolved.to_json(),
		json!({ "name": "readonly", "requiresMfa": true, "policyArns": [] })
	);

	let resolved = readonly_role_schema()
		.pending()
		.with("requiresMfa", false)?
		.with("name", "custom")?
		.finalize()?;

	assert_eq!(
		resolved.to_json(),
		json!({ "name": "custom", "requiresMfa": false, "policyArns": [] })
	);

	Ok(())
}

#[test]
fn required_toggle_must_be_set_before_finalizing() -> Result<()> {
	let err = vpc_cni_policy_schema()
		.pending()
		.finalize()
		.expect_err("Finalizing without `attach` must fail.");

	assert!(matches!(err, BuildError::MissingRequiredFields { .. }));
	assert_eq!(err.missing_fields().iter().map(|f| f.as_str()).collect::<Vec<_>>(), ["attach"]);

	let resolved = vpc_cni_policy_schema().pending().with("attach", true)?.finalize()?;

	assert_eq!(resolved.to_json(), json!({ "attach": true, "enableIpv4": true }));

	Ok(())
}

#[test]
fn set_order_across_fields_does_not_change_the_result() -> Result<()> {
	let forward = finalize_with(readonly_role_schema(), [
		("name", Input::from("ops")),
		("policyArns", Input::from(vec!["arn:aws:iam::aws:policy/ReadOnlyAccess"])),
	]);
	let backward = finalize_with(readonly_role_schema(), [
		("policyArns", Input::from(vec!["arn:aws:iam::aws:policy/ReadOnlyAccess"])),
		("name", Input::from("ops")),
	]);

	assert_eq!(forward, backward);
	assert_eq!(forward.fingerprint(), backward.fingerprint());

	Ok(())
}

#[test]
fn collection_values_replace_defaults_wholesale() -> Result<()> {
	let mut pending = PendingConfiguration::new(readonly_role_schema());

	pending.set("policyArns", vec!["a", "b"])?;
	pending.set("policyArns", vec!["c"])?;

	let resolved = pending.finalize()?;

	assert_eq!(resolved.to_json()["policyArns"], json!(["c"]));

	Ok(())
}
