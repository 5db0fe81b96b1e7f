use tfguard_engine::{BasePolicy, Results};
use tfguard_model::{AttributeQuery, Block, Module};
use tfguard_types::Severity;

const PUBLIC_CIDRS: &[&str] = &["0.0.0.0/0", "::/0"];

pub static COMPUTE_NO_PUBLIC_INGRESS: BasePolicy = BasePolicy {
    provider: "digitalocean",
    service: "compute",
    short_code: "no-public-ingress",
    summary: "The firewall has an inbound rule with open access",
    impact: "Your port is exposed to the internet",
    resolution: "Set a more restrictive CIDR range",
    explanation: "Opening up ports to the public internet is generally to be avoided. You should restrict access to IP addresses or ranges that explicitly require it where possible.",
    severity: Severity::Critical,
    links: &["https://docs.digitalocean.com/products/networking/firewalls/how-to/configure-rules/"],
    evaluation: Some(no_public_ingress),
};

fn no_public_ingress(block: &Block, _module: &Module) -> Results {
    let mut results = Results::new();
    for rule in block.blocks("inbound_rule") {
        let Some(addresses) = rule.attribute("source_addresses") else {
            continue;
        };
        if PUBLIC_CIDRS.iter().any(|cidr| addresses.contains(cidr)) {
            results.add(
                "Resource has an inbound rule with a public source address.",
                addresses,
            );
        }
    }
    results
}
