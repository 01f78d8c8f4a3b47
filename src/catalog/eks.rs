// self
use crate::{
	_prelude::*,
	catalog::{self, Catalog, role},
	schema::{FieldSpec, Schema},
	value::{Value, ValueKind},
};

/// Role input for EKS service-account roles.
pub const EKS_SERVICE_ACCOUNT_ROLE: &str = "aws-iam:index:EKSServiceAccountRole";
/// Cluster plus the service accounts allowed to assume an [`EKS_ROLE`].
pub const EKS_CLUSTER_SERVICE_ACCOUNT: &str = "aws-iam:index:EKSClusterServiceAccount";
/// OIDC provider plus the `namespace:serviceaccount` pairs it trusts.
pub const OIDC_PROVIDER: &str = "aws-iam:index:OIDCProvider";
/// Per add-on policy toggles for a service-account role.
pub const EKS_SERVICE_ACCOUNT_POLICIES: &str = "aws-iam:index:EKSServiceAccountPolicies";
/// IAM role assumable by EKS service accounts of named clusters.
pub const EKS_ROLE: &str = "aws-iam:index:EKSRole";
/// IAM role for EKS service accounts with optional add-on policies.
pub const ROLE_FOR_SERVICE_ACCOUNTS_EKS: &str = "aws-iam:index:RoleForServiceAccountsEks";
/// VPC CNI add-on policy input.
pub const EKS_VPN_CNI_POLICY: &str = "aws-iam:index:EKSVPNCNIPolicy";

struct AddOn {
	schema: &'static str,
	field: &'static str,
	description: &'static str,
	// `attach` is required when set; otherwise every toggle is optional.
	attach: bool,
	flags: &'static [(&'static str, bool, &'static str)],
	lists: &'static [(&'static str, &'static [&'static str], &'static str)],
	strings: &'static [(&'static str, Option<&'static str>, &'static str)],
}

const ADD_ONS: [AddOn; 14] = [
	AddOn {
		schema: "EKSCertManagerPolicy",
		field: "certManager",
		description: "The Cert Manager IAM policy to the role.",
		attach: true,
		flags: &[],
		lists: &[(
			"hostedZoneArns",
			&["arn:aws:route53:::hostedzone/*"],
			"Route53 hosted zone ARNs to allow Cert manager to manage records.",
		)],
		strings: &[],
	},
	AddOn {
		schema: "EKSClusterAutoscalerPolicy",
		field: "clusterAutoScaling",
		description: "The Cluster Autoscaler IAM policy to the role.",
		attach: true,
		flags: &[],
		lists: &[(
			"clusterIds",
			&[],
			"List of cluster IDs to appropriately scope permissions within.",
		)],
		strings: &[],
	},
	AddOn {
		schema: "EKSEBSCSIPolicy",
		field: "ebsCsi",
		description: "The EBS CSI IAM policy to the role.",
		attach: true,
		flags: &[],
		lists: &[("kmsCmkIds", &[], "KMS CMK IDs to allow EBS CSI to manage encrypted volumes.")],
		strings: &[],
	},
	AddOn {
		schema: "EKSEFSCSIPolicy",
		field: "efsCsi",
		description: "The EFS CSI IAM policy to the role.",
		attach: true,
		flags: &[],
		lists: &[],
		strings: &[],
	},
	AddOn {
		schema: "EKSExternalDNSPolicy",
		field: "externalDns",
		description: "The External DNS IAM policy to the role.",
		attach: true,
		flags: &[],
		lists: &[(
			"hostedZoneArns",
			&["arn:aws:route53:::hostedzone/*"],
			"Route53 hosted zone ARNs to allow External DNS to manage records.",
		)],
		strings: &[],
	},
	AddOn {
		schema: "EKSExternalSecretsPolicy",
		field: "externalSecrets",
		description: "The External Secrets policy to the role.",
		attach: true,
		flags: &[],
		lists: &[
			(
				"ssmParameterArns",
				&["arn:aws:ssm:*:*:parameter/*"],
				"List of Systems Manager Parameter ARNs that contain secrets to mount using External Secrets.",
			),
			(
				"secretsManagerArns",
				&["arn:aws:secretsmanager:*:*:secret:*"],
				"List of Secrets Manager ARNs that contain secrets to mount using External Secrets.",
			),
		],
		strings: &[],
	},
	AddOn {
		schema: "FSxLustreCSIPolicy",
		field: "fsxLustreCsi",
		description: "The FSx for Lustre CSI Driver IAM policy to the role.",
		attach: true,
		flags: &[],
		lists: &[(
			"serviceRoleArns",
			&["arn:aws:iam::*:role/aws-service-role/s3.data-source.lustre.fsx.amazonaws.com/*"],
			"Service role ARNs to allow FSx for Lustre CSI create and manage FSX for Lustre service linked roles.",
		)],
		strings: &[],
	},
	AddOn {
		schema: "EKSKarpenterControllerPolicy",
		field: "karpenterController",
		description: "The Karpenter Controller policy to the role.",
		attach: true,
		flags: &[],
		lists: &[
			(
				"ssmParameterArns",
				&["arn:aws:ssm:*:*:parameter/aws/service/*"],
				"List of SSM Parameter ARNs that contain AMI IDs launched by Karpenter.",
			),
			(
				"nodeIamRoleArns",
				&["*"],
				"List of node IAM role ARNs Karpenter can use to launch nodes.",
			),
		],
		strings: &[
			(
				"clusterId",
				None,
				"Cluster ID where the Karpenter controller is provisioned/managing.",
			),
			(
				"tagKey",
				Some("karpenter.sh/discovery"),
				"Tag key (`{key = value}`) applied to resources launched by Karpenter through the Karpenter provisioner.",
			),
			(
				"subnetAccountId",
				None,
				"Account ID of where the subnets Karpenter will utilize resides.",
			),
		],
	},
	AddOn {
		schema: "EKSLoadBalancerPolicy",
		field: "loadBalancer",
		description: "The Load Balancer policy to the role.",
		attach: false,
		flags: &[
			(
				"controller",
				false,
				"Determines whether to attach the Load Balancer Controller policy to the role.",
			),
			(
				"targetGroupBindingOnly",
				false,
				"Determines whether to attach the Load Balancer Controller policy for the TargetGroupBinding only.",
			),
		],
		lists: &[],
		strings: &[],
	},
	AddOn {
		schema: "EKSAppmeshPolicy",
		field: "appmesh",
		description: "The Appmesh policies.",
		attach: false,
		flags: &[
			(
				"controller",
				false,
				"Determines whether to attach the Appmesh Controller policy to the role.",
			),
			(
				"envoyProxy",
				false,
				"Determines whether to attach the Appmesh envoy proxy policy to the role.",
			),
		],
		lists: &[],
		strings: &[],
	},
	AddOn {
		schema: "EKSAmazonManagedServicePrometheusPolicy",
		field: "amazonManagedServicePrometheus",
		description: "The Amazon Managed Service for Prometheus IAM policy to the role.",
		attach: true,
		flags: &[],
		lists: &[(
			"workspaceArns",
			&["*"],
			"List of AMP Workspace ARNs to read and write metrics.",
		)],
		strings: &[],
	},
	AddOn {
		schema: "EKSVeleroPolicy",
		field: "velero",
		description: "The Velero IAM policy to the role.",
		attach: true,
		flags: &[],
		lists: &[("s3BucketArns", &["*"], "List of S3 Bucket ARNs that Velero needs access to.")],
		strings: &[],
	},
	AddOn {
		schema: "EKSVPNCNIPolicy",
		field: "vpnCni",
		description: "The VPC CNI IAM policy to the role.",
		attach: true,
		flags: &[
			(
				"enableIpv4",
				true,
				"Determines whether to enable IPv4 permissions for VPC CNI policy.",
			),
			(
				"enableIpv6",
				false,
				"Determines whether to enable IPv6 permissions for VPC CNI policy.",
			),
		],
		lists: &[],
		strings: &[],
	},
	AddOn {
		schema: "EKSNodeTerminationHandlerPolicy",
		field: "nodeTerminationHandler",
		description: "The Node Termination Handler policy to the role.",
		attach: true,
		flags: &[],
		lists: &[(
			"sqsQueueArns",
			&["*"],
			"List of SQS ARNs that contain node termination events.",
		)],
		strings: &[],
	},
];

pub(super) fn register(catalog: &mut Catalog) -> Result<()> {
	let service_role = catalog.insert_input(role::role_schema(
		"EKSServiceAccountRole",
		"An IAM role for EKS service accounts.",
	)?);
	let cluster_account = catalog.insert_input(cluster_service_account()?);
	let provider = catalog.insert_input(oidc_provider()?);
	let mut policies = catalog::builder(
		"EKSServiceAccountPolicies",
		"Add-on policies to attach to a service-account role.",
	)?;

	for add_on in &ADD_ONS {
		let schema = catalog.insert_input(add_on_schema(add_on)?);
		let field = catalog::optional(add_on.field, catalog::nested(&schema), add_on.description)?;

		policies = policies.field(field);
	}

	let policies = catalog.insert_input(policies.build()?);

	catalog.insert_resource(eks_role(&service_role, &cluster_account)?);
	catalog.insert_resource(role_for_service_accounts(&service_role, &provider, &policies)?);

	Ok(())
}

fn add_on_schema(add_on: &AddOn) -> Result<Schema> {
	let mut builder = catalog::builder(add_on.schema, add_on.description)?;

	if add_on.attach {
		builder = builder.field(catalog::required(
			"attach",
			ValueKind::BOOL,
			"Determines whether to attach the policy to the role.",
		)?);
	}

	for &(name, default, description) in add_on.flags {
		builder = builder
			.field(catalog::optional(name, ValueKind::BOOL, description)?.with_default(default));
	}
	for &(name, default, description) in add_on.lists {
		builder = builder.field(
			catalog::optional(name, ValueKind::STRING_LIST, description)?
				.with_default(default.to_vec()),
		);
	}
	for &(name, default, description) in add_on.strings {
		let spec = catalog::optional(name, ValueKind::STRING, description)?;

		builder = builder.field(match default {
			Some(default) => spec.with_default(default),
			None => spec,
		});
	}

	Ok(builder.build()?)
}

fn cluster_service_account() -> Result<Schema> {
	Ok(catalog::builder(
		"EKSClusterServiceAccount",
		"An EKS cluster and the service accounts allowed to assume the role.",
	)?
	.field(catalog::required("name", ValueKind::STRING, "Name of the EKS cluster.")?)
	.field(catalog::required(
		"serviceAccounts",
		ValueKind::STRING_LIST,
		"Service accounts of the cluster, as `namespace:serviceaccount`.",
	)?)
	.build()?)
}

fn oidc_provider() -> Result<Schema> {
	Ok(catalog::builder("OIDCProvider", "An OIDC provider trusted by the role.")?
		.field(catalog::required(
			"name",
			ValueKind::STRING,
			"Key identifying the provider among the role's providers.",
		)?)
		.field(catalog::required("providerArn", ValueKind::STRING, "ARN of the OIDC provider.")?)
		.field(catalog::required(
			"namespaceServiceAccounts",
			ValueKind::STRING_LIST,
			"Service accounts trusted through the provider, as `namespace:serviceaccount`.",
		)?)
		.build()?)
}

fn eks_role(service_role: &Schema, cluster_account: &Schema) -> Result<Schema> {
	Ok(catalog::builder("EKSRole", "An IAM role assumable by service accounts of EKS clusters.")?
		.field(catalog::tags()?)
		.field(catalog::optional("role", catalog::nested(service_role), "IAM role.")?)
		.field(role::max_session_duration()?)
		.field(role::force_detach_policies()?)
		.field(
			catalog::optional(
				"clusterServiceAccounts",
				catalog::nested_list(cluster_account),
				"EKS cluster and k8s ServiceAccount pairs.",
			)?
			.with_default(Value::NestedList(Vec::new())),
		)
		.field(string_list("rolePolicyArns", "ARNs of any policies to attach to the IAM role.")?)
		.outputs(catalog::outputs("", &role::ROLE_OUTPUTS, ValueKind::STRING)?)
		.build()?)
}

fn role_for_service_accounts(
	service_role: &Schema,
	provider: &Schema,
	policies: &Schema,
) -> Result<Schema> {
	Ok(catalog::builder(
		"RoleForServiceAccountsEks",
		"An IAM role for EKS service accounts with optional add-on policies attached.",
	)?
	.field(catalog::tags()?)
	.field(catalog::optional("role", catalog::nested(service_role), "IAM role.")?)
	.field(
		catalog::optional(
			"policyNamePrefix",
			ValueKind::STRING,
			"IAM policy name prefix.",
		)?
		.with_default(""),
	)
	.field(role::max_session_duration()?)
	.field(role::force_detach_policies()?)
	.field(
		catalog::optional(
			"oidcProviders",
			catalog::nested_list(provider),
			"OIDC providers trusted by the role.",
		)?
		.with_default(Value::NestedList(Vec::new())),
	)
	.field(
		catalog::optional(
			"assumeRoleConditionTest",
			ValueKind::STRING,
			"Name of the IAM condition operator to evaluate when assuming the role.",
		)?
		.with_default("StringEquals"),
	)
	.field(catalog::optional("policies", catalog::nested(policies), "The policies to attach.")?)
	.outputs(catalog::outputs("role", &role::ROLE_OUTPUTS, ValueKind::STRING)?)
	.build()?)
}

fn string_list(name: &str, description: &str) -> Result<FieldSpec> {
	Ok(catalog::optional(name, ValueKind::STRING_LIST, description)?
		.with_default(Vec::<String>::new()))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const PROVIDER_ARN: &str =
		"arn:aws:iam::012345678901:oidc-provider/oidc.eks.us-east-1.amazonaws.com/id/5C54";

	#[test]
	fn vpc_cni_requires_attach_and_enables_ipv4() {
		let catalog = Catalog::load().expect("Catalog should load.");
		let err = catalog
			.builder(EKS_VPN_CNI_POLICY)
			.expect("VPC CNI policy should be registered.")
			.finalize()
			.expect_err("Missing attach must fail.");

		assert_eq!(err.missing_fields().iter().map(|f| f.as_str()).collect::<Vec<_>>(), ["attach"]);

		let cni = catalog
			.builder(EKS_VPN_CNI_POLICY)
			.expect("VPC CNI policy should be registered.")
			.with("attach", true)
			.expect("Attach should be accepted.")
			.finalize()
			.expect("VPC CNI policy should finalize.");

		assert_eq!(
			cni.to_json(),
			serde_json::json!({ "attach": true, "enableIpv4": true, "enableIpv6": false })
		);
	}

	#[test]
	fn policies_table_covers_every_add_on() {
		let catalog = Catalog::load().expect("Catalog should load.");
		let policies = catalog
			.get(EKS_SERVICE_ACCOUNT_POLICIES)
			.expect("Policies input should be registered.");

		assert_eq!(policies.len(), ADD_ONS.len());
		assert!(policies.required_fields().next().is_none());
		assert!(catalog.get("aws-iam:index:EKSKarpenterControllerPolicy").is_some());
	}

	#[test]
	fn service_account_roles_nest_providers_and_policies() {
		let catalog = Catalog::load().expect("Catalog should load.");
		let provider = catalog
			.builder(OIDC_PROVIDER)
			.expect("OIDC provider should be registered.")
			.with("name", "main")
			.expect("Provider key should be accepted.")
			.with("providerArn", PROVIDER_ARN)
			.expect("Provider ARN should be accepted.")
			.with("namespaceServiceAccounts", vec!["default:my-app", "canary:my-app"])
			.expect("Service accounts should be accepted.")
			.finalize()
			.expect("OIDC provider should finalize.");
		let cni = catalog
			.builder(EKS_VPN_CNI_POLICY)
			.expect("VPC CNI policy should be registered.")
			.with("attach", true)
			.expect("Attach should be accepted.")
			.finalize()
			.expect("VPC CNI policy should finalize.");
		let policies = catalog
			.builder(EKS_SERVICE_ACCOUNT_POLICIES)
			.expect("Policies input should be registered.")
			.with("vpnCni", cni)
			.expect("VPC CNI policy should be accepted.")
			.finalize()
			.expect("Policies input should finalize.");
		let role = catalog
			.builder(ROLE_FOR_SERVICE_ACCOUNTS_EKS)
			.expect("Service-account role should be registered.")
			.with("oidcProviders", vec![provider])
			.expect("Providers should be accepted.")
			.with("policies", policies)
			.expect("Policies should be accepted.")
			.finalize()
			.expect("Service-account role should finalize.");
		let json = role.to_json();

		assert_eq!(json["assumeRoleConditionTest"], "StringEquals");
		assert_eq!(json["policies"]["vpnCni"]["enableIpv4"], true);
		assert_eq!(json["oidcProviders"][0]["name"], "main");
		assert_eq!(json["oidcProviders"][0]["namespaceServiceAccounts"][1], "canary:my-app");
		assert!(!role.contains("role"));
	}
}
