use tfguard_engine::Rule;

mod network;

pub(crate) fn rules() -> Vec<Rule> {
    vec![network::SSH_BLOCKED_FROM_INTERNET]
}
