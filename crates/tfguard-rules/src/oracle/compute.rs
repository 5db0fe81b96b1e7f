use crate::base::oracle::COMPUTE_NO_PUBLIC_IP;
use tfguard_engine::{Check, Rule};

pub(crate) static NO_PUBLIC_IP: Rule = Rule {
    base: &COMPUTE_NO_PUBLIC_IP,
    legacy_id: Some("OCI001"),
    required_types: &["resource"],
    required_labels: &["opc_compute_ip_address_reservation"],
    check: Check::Delegated(&COMPUTE_NO_PUBLIC_IP),
    bad_example: &[r#"
resource "opc_compute_ip_address_reservation" "bad_example" {
  name            = "my-ip-address"
  ip_address_pool = "public-ippool"
}
"#],
    good_example: &[r#"
resource "opc_compute_ip_address_reservation" "good_example" {
  name            = "my-ip-address"
  ip_address_pool = "cloud-ippool"
}
"#],
    links: &[
        "https://registry.terraform.io/providers/hashicorp/opc/latest/docs/resources/opc_compute_ip_address_reservation",
        "https://registry.terraform.io/providers/hashicorp/opc/latest/docs/resources/opc_compute_instance",
    ],
};
