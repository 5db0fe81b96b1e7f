use tfguard_engine::Rule;

mod dns;
mod platform;

pub(crate) fn rules() -> Vec<Rule> {
    vec![
        dns::NO_RSA_SHA1,
        platform::NO_FOLDER_LEVEL_SERVICE_ACCOUNT_IMPERSONATION,
    ]
}
