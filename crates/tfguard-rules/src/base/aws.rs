use tfguard_engine::BasePolicy;
use tfguard_types::Severity;

pub static DOCUMENTDB_ENCRYPTION_CUSTOMER_KEY: BasePolicy = BasePolicy {
    provider: "aws",
    service: "documentdb",
    short_code: "encryption-customer-key",
    summary: "DocumentDB encryption should use Customer Managed Keys",
    impact: "Using AWS managed keys does not allow for fine grained control",
    resolution: "Enable encryption using customer managed keys",
    explanation: "Encryption using AWS keys provides protection for your DocumentDB underlying storage. To increase control of the encryption and manage factors like rotation use customer managed keys.",
    severity: Severity::Low,
    links: &["https://docs.aws.amazon.com/documentdb/latest/developerguide/security.encryption.ssl.public-key.html"],
    evaluation: None,
};

pub static EBS_ENABLE_VOLUME_ENCRYPTION: BasePolicy = BasePolicy {
    provider: "aws",
    service: "ebs",
    short_code: "enable-volume-encryption",
    summary: "EBS volumes must be encrypted",
    impact: "Unencrypted sensitive data is vulnerable to compromise.",
    resolution: "Enable encryption of EBS volumes",
    explanation: "By enabling encryption on EBS volumes you protect the volume, the disk I/O and any derived snapshots from compromise if intercepted.",
    severity: Severity::High,
    links: &["https://docs.aws.amazon.com/AWSEC2/latest/UserGuide/EBSEncryption.html"],
    evaluation: None,
};

pub static ELASTICACHE_ADD_DESCRIPTION_FOR_SECURITY_GROUP: BasePolicy = BasePolicy {
    provider: "aws",
    service: "elasticache",
    short_code: "add-description-for-security-group",
    summary: "Missing description for security group/security group rule.",
    impact: "Descriptions provide context for the firewall rule reasons",
    resolution: "Add descriptions for all security groups and rules",
    explanation: "Security groups and security group rules should include a description for auditing purposes. Simplifies auditing, debugging, and managing security groups.",
    severity: Severity::Low,
    links: &["https://docs.aws.amazon.com/AmazonElastiCache/latest/mem-ug/SecurityGroups.Creating.html"],
    evaluation: None,
};

pub static IAM_REQUIRE_UPPERCASE_IN_PASSWORDS: BasePolicy = BasePolicy {
    provider: "aws",
    service: "iam",
    short_code: "require-uppercase-in-passwords",
    summary: "IAM Password policy should have requirement for at least one uppercase character.",
    impact: "Short, simple passwords are easier to compromise",
    resolution: "Enforce longer, more complex passwords in the policy",
    explanation: "IAM account password policies should ensure that passwords content including at least one uppercase character.",
    severity: Severity::Medium,
    links: &["https://docs.aws.amazon.com/IAM/latest/UserGuide/id_credentials_passwords_account-policy.html#password-policy-details"],
    evaluation: None,
};

pub static NEPTUNE_ENABLE_LOG_EXPORT: BasePolicy = BasePolicy {
    provider: "aws",
    service: "neptune",
    short_code: "enable-log-export",
    summary: "Neptune logs export should be enabled",
    impact: "Limited visibility of audit trail for changes to Neptune",
    resolution: "Enable export logs",
    explanation: "Neptune does not have auditing by default. To ensure that you are able to accurately audit the usage of your Neptune instance you should enable export logs.",
    severity: Severity::Medium,
    links: &["https://docs.aws.amazon.com/neptune/latest/userguide/auditing.html"],
    evaluation: None,
};

pub static REDSHIFT_NON_DEFAULT_VPC_DEPLOYMENT: BasePolicy = BasePolicy {
    provider: "aws",
    service: "redshift",
    short_code: "non-default-vpc-deployment",
    summary: "Redshift cluster should be deployed into a specific VPC",
    impact: "Redshift cluster does not benefit from VPC security if it is deployed in EC2 classic mode",
    resolution: "Deploy Redshift cluster into a non default VPC",
    explanation: "Redshift clusters that are created in the EC2 classic mode should be moved to a VPC for added security and network isolation.",
    severity: Severity::High,
    links: &["https://docs.aws.amazon.com/redshift/latest/mgmt/managing-clusters-vpc.html"],
    evaluation: None,
};

pub static SSM_SECRET_USE_CUSTOMER_KEY: BasePolicy = BasePolicy {
    provider: "aws",
    service: "ssm",
    short_code: "secret-use-customer-key",
    summary: "Secrets Manager should use customer managed keys",
    impact: "Using AWS managed keys reduces the flexibility and control over the encryption key",
    resolution: "Use customer managed keys",
    explanation: "Secrets Manager encrypts secrets by default using a default key created by AWS. To ensure control and granularity of secret encryption, CMK's should be used explicitly.",
    severity: Severity::Low,
    links: &["https://docs.aws.amazon.com/kms/latest/developerguide/services-secrets-manager.html#asm-encrypt"],
    evaluation: None,
};
