use tfguard_engine::Rule;

mod documentdb;
mod ebs;
mod elasticache;
mod iam;
mod neptune;
mod redshift;
mod ssm;

pub(crate) fn rules() -> Vec<Rule> {
    vec![
        documentdb::ENCRYPTION_CUSTOMER_KEY,
        ebs::ENABLE_VOLUME_ENCRYPTION,
        elasticache::ADD_DESCRIPTION_FOR_SECURITY_GROUP,
        iam::REQUIRE_UPPERCASE_IN_PASSWORDS,
        neptune::ENABLE_LOG_EXPORT,
        redshift::NON_DEFAULT_VPC_DEPLOYMENT,
        ssm::SECRET_USE_CUSTOMER_KEY,
    ]
}
