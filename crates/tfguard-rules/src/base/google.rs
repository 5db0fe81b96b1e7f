use tfguard_engine::{BasePolicy, Results};
use tfguard_model::{AttributeQuery, Block, Module};
use tfguard_types::Severity;

pub static DNS_NO_RSA_SHA1: BasePolicy = BasePolicy {
    provider: "google",
    service: "dns",
    short_code: "no-rsa-sha1",
    summary: "Zone signing should not use RSA SHA1",
    impact: "Less secure encryption algorithm than others available",
    resolution: "Use RSA SHA512",
    explanation: "RSA SHA1 is a weaker algorithm than SHA2-based algorithms such as RSA SHA256/512",
    severity: Severity::Medium,
    links: &["https://cloud.google.com/dns/docs/dnssec-advanced#algorithms"],
    evaluation: Some(no_rsa_sha1),
};

pub static PLATFORM_NO_FOLDER_LEVEL_SERVICE_ACCOUNT_IMPERSONATION: BasePolicy = BasePolicy {
    provider: "google",
    service: "platform",
    short_code: "no-folder-level-service-account-impersonation",
    summary: "Users should not be granted service account access at the folder level",
    impact: "Privilege escalation, impersonation of any/all services",
    resolution: "Provide access at the service-level instead of folder-level, if required",
    explanation: "Users with service account access at folder level can impersonate any service account in that folder",
    severity: Severity::Medium,
    links: &["https://cloud.google.com/iam/docs/impersonating-service-accounts"],
    evaluation: None,
};

fn no_rsa_sha1(block: &Block, _module: &Module) -> Results {
    let mut results = Results::new();
    for kind in ["key_signing_keys", "zone_signing_keys"] {
        for keys in block.blocks(kind) {
            if let Some(algorithm) = keys.attribute("algorithm")
                && algorithm.equals_ordinal("rsasha1")
            {
                results.add(format!("Resource uses RSA SHA1 in {kind}."), algorithm);
            }
        }
    }
    results
}
