use crate::base::azure::NETWORK_SSH_BLOCKED_FROM_INTERNET;
use tfguard_engine::{Check, Results, Rule};
use tfguard_model::{AttributeQuery, Block, CaseSensitivity, Module};

const INTERNET_SOURCES: &[&str] = &["*", "0.0.0.0", "/0", "internet", "any"];

pub(crate) static SSH_BLOCKED_FROM_INTERNET: Rule = Rule {
    base: &NETWORK_SSH_BLOCKED_FROM_INTERNET,
    legacy_id: Some("AZU017"),
    required_types: &["resource"],
    required_labels: &["azurerm_network_security_group", "azurerm_network_security_rule"],
    check: Check::Programmatic(check),
    bad_example: &[r#"
resource "azurerm_network_security_rule" "bad_example" {
  name                       = "bad_example_security_rule"
  direction                  = "Inbound"
  access                     = "Allow"
  protocol                   = "TCP"
  source_port_range          = "*"
  destination_port_range     = ["22"]
  source_address_prefix      = "*"
  destination_address_prefix = "*"
}

resource "azurerm_network_security_group" "example" {
  name                = "tf-appsecuritygroup"
  location            = azurerm_resource_group.example.location
  resource_group_name = azurerm_resource_group.example.name

  security_rule {
    source_port_range          = "any"
    destination_port_range     = ["22"]
    source_address_prefix      = "*"
    destination_address_prefix = "*"
  }
}
"#],
    good_example: &[r#"
resource "azurerm_network_security_rule" "good_example" {
  name                       = "good_example_security_rule"
  direction                  = "Inbound"
  access                     = "Allow"
  protocol                   = "TCP"
  source_port_range          = "*"
  destination_port_range     = ["22"]
  source_address_prefix      = "82.102.23.23"
  destination_address_prefix = "*"
}

resource "azurerm_network_security_group" "example" {
  name                = "tf-appsecuritygroup"
  location            = azurerm_resource_group.example.location
  resource_group_name = azurerm_resource_group.example.name

  security_rule {
    source_port_range          = "any"
    destination_port_range     = ["22"]
    source_address_prefix      = "82.102.23.23"
    destination_address_prefix = "*"
  }
}
"#],
    links: &[
        "https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/data-sources/network_security_group#security_rule",
        "https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/resources/network_security_rule#source_port_ranges",
    ],
};

fn check(block: &Block, _module: &Module) -> Results {
    let mut results = Results::new();
    // A security group carries its rules inline; a standalone rule is checked as itself.
    let security_rules = if block.is_resource_type("azurerm_network_security_group") {
        block.blocks("security_rule")
    } else {
        vec![block]
    };

    for rule in security_rules {
        if rule
            .attribute("access")
            .equals("Deny", CaseSensitivity::IgnoreCase)
        {
            continue;
        }
        if !rule.attribute("destination_port_range").contains("22") {
            continue;
        }
        if rule
            .attribute("source_address_prefix")
            .is_any(INTERNET_SOURCES)
        {
            results.add(
                "Resource has a security rule allowing SSH access from the internet.",
                rule,
            );
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfguard_engine::Registry;
    use tfguard_test_util::scan_hcl;
    use tfguard_types::LocatorKind;

    fn registry() -> Registry {
        Registry::from_rules([SSH_BLOCKED_FROM_INTERNET]).expect("registry")
    }

    #[test]
    fn deny_matches_regardless_of_case() {
        let src = r#"
resource "azurerm_network_security_rule" "deny" {
  access                 = "deny"
  destination_port_range = "22"
  source_address_prefix  = "*"
}
"#;
        assert!(scan_hcl(src, &registry()).findings.is_empty());
    }

    #[test]
    fn nested_security_rules_are_located_individually() {
        let src = r#"
resource "azurerm_network_security_group" "example" {
  security_rule {
    access                 = "Allow"
    destination_port_range = "22"
    source_address_prefix  = "internet"
  }

  security_rule {
    access                 = "Allow"
    destination_port_range = "443"
    source_address_prefix  = "*"
  }

  security_rule {
    access                 = "Allow"
    destination_port_range = "22"
    source_address_prefix  = "0.0.0.0"
  }
}
"#;
        let outcome = scan_hcl(src, &registry());
        let lines: Vec<u32> = outcome.findings.iter().map(|f| f.range.start_line).collect();
        assert_eq!(lines, vec![3, 15]);
        assert!(outcome.findings.iter().all(|f| f.locator == LocatorKind::Block));
        assert!(
            outcome
                .findings
                .iter()
                .all(|f| f.resource == "azurerm_network_security_group.example")
        );
    }

    #[test]
    fn unresolved_source_prefix_is_not_reported() {
        let src = r#"
resource "azurerm_network_security_rule" "dynamic" {
  destination_port_range = "22"
  source_address_prefix  = var.source_prefix
}
"#;
        assert!(scan_hcl(src, &registry()).findings.is_empty());
    }
}
