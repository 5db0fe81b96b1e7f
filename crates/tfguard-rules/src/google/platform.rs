use crate::base::google::PLATFORM_NO_FOLDER_LEVEL_SERVICE_ACCOUNT_IMPERSONATION;
use tfguard_engine::{Check, Results, Rule};
use tfguard_model::{AttributeQuery, Block, Module};

pub(crate) static NO_FOLDER_LEVEL_SERVICE_ACCOUNT_IMPERSONATION: Rule = Rule {
    base: &PLATFORM_NO_FOLDER_LEVEL_SERVICE_ACCOUNT_IMPERSONATION,
    legacy_id: None,
    required_types: &["resource"],
    required_labels: &["google_folder_iam_binding", "google_folder_iam_member"],
    check: Check::Programmatic(check),
    bad_example: &[
        r#"
resource "google_folder_iam_binding" "folder-123" {
  folder = "folder-123"
  role   = "roles/iam.serviceAccountUser"
}
"#,
        r#"
resource "google_folder_iam_binding" "folder-123" {
  folder = "folder-123"
  role   = "roles/iam.serviceAccountTokenCreator"
}
"#,
    ],
    good_example: &[r#"
resource "google_folder_iam_binding" "folder-123" {
  folder = "folder-123"
  role   = "roles/nothingInParticular"
}
"#],
    links: &["https://registry.terraform.io/providers/hashicorp/google/latest/docs/resources/google_folder_iam"],
};

fn check(block: &Block, _module: &Module) -> Results {
    let mut results = Results::new();
    let Some(role) = block.attribute("role") else {
        return results;
    };
    if role.is_string()
        && role.is_any(&[
            "roles/iam.serviceAccountUser",
            "roles/iam.serviceAccountTokenCreator",
        ])
    {
        results.add(
            "Resource grants service account access to a user at folder level.",
            role,
        );
    }
    results
}
