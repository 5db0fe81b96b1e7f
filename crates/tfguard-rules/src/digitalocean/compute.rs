use crate::base::digitalocean::COMPUTE_NO_PUBLIC_INGRESS;
use tfguard_engine::{Check, Rule};

pub(crate) static NO_PUBLIC_INGRESS: Rule = Rule {
    base: &COMPUTE_NO_PUBLIC_INGRESS,
    legacy_id: Some("DIG001"),
    required_types: &["resource"],
    required_labels: &["digitalocean_firewall"],
    check: Check::Delegated(&COMPUTE_NO_PUBLIC_INGRESS),
    bad_example: &[r#"
resource "digitalocean_firewall" "bad_example" {
  name = "only-22-80-and-443"

  droplet_ids = [digitalocean_droplet.web.id]

  inbound_rule {
    protocol         = "tcp"
    port_range       = "22"
    source_addresses = ["0.0.0.0/0", "::/0"]
  }
}
"#],
    good_example: &[r#"
resource "digitalocean_firewall" "good_example" {
  name = "only-22-80-and-443"

  droplet_ids = [digitalocean_droplet.web.id]

  inbound_rule {
    protocol         = "tcp"
    port_range       = "22"
    source_addresses = ["192.168.1.0/24", "2002:1:2::/48"]
  }
}
"#],
    links: &["https://registry.terraform.io/providers/digitalocean/digitalocean/latest/docs/resources/firewall"],
};
