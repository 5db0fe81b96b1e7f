use tfguard_engine::BasePolicy;
use tfguard_types::Severity;

pub static NETWORK_SSH_BLOCKED_FROM_INTERNET: BasePolicy = BasePolicy {
    provider: "azure",
    service: "network",
    short_code: "ssh-blocked-from-internet",
    summary: "SSH access should not be accessible from the Internet, should be blocked on port 22",
    impact: "Its dangerous to allow SSH access from the internet",
    resolution: "Block port 22 access from the internet",
    explanation: "SSH access can be configured on either the network security group or in the network security group rule. SSH access should not be permitted from the internet (*, 0.0.0.0, /0, internet, any).",
    severity: Severity::Critical,
    links: &["https://docs.microsoft.com/en-us/azure/bastion/tutorial-create-host-portal"],
    evaluation: None,
};
