use tfguard_engine::Rule;

mod compute;

pub(crate) fn rules() -> Vec<Rule> {
    vec![compute::NO_PUBLIC_INGRESS]
}
