use tfguard_engine::{BasePolicy, Results};
use tfguard_model::{AttributeQuery, Block, Module};
use tfguard_types::Severity;

pub static COMPUTE_NO_PUBLIC_IP: BasePolicy = BasePolicy {
    provider: "oracle",
    service: "compute",
    short_code: "no-public-ip",
    summary: "Compute instance requests an IP reservation from a public pool",
    impact: "The compute instance has the ability to be reached from outside",
    resolution: "Reserve ip from private pool",
    explanation: "Compute instance requests an IP reservation from a public pool. The compute instance has the ability to be reached from outside, you might want to consider the use of a non public IP.",
    severity: Severity::Critical,
    links: &[],
    evaluation: Some(no_public_ip),
};

fn no_public_ip(block: &Block, _module: &Module) -> Results {
    let mut results = Results::new();
    if let Some(pool) = block.attribute("ip_address_pool")
        && pool.equals_ordinal("public-ippool")
    {
        results.add("Reservation made for public IP address.", pool);
    }
    results
}
