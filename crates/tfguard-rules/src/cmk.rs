use tfguard_engine::Results;
use tfguard_model::{Attribute, AttributeQuery, Block, Module};

/// Shared shape of the "encrypt with a customer-managed key" rules.
///
/// `kms_key_id` absent is reported at the block. When it points at a `data` block, the data
/// block's `key_id` is checked with `is_default_key` and reported at that attribute.
/// References that do not resolve are not reported.
pub(crate) fn check_customer_key(
    block: &Block,
    module: &Module,
    is_default_key: fn(&Attribute) -> bool,
) -> Results {
    let mut results = Results::new();
    let Some(kms_key) = block.attribute("kms_key_id") else {
        results.add("Resource does not use CMK", block);
        return results;
    };
    if !kms_key.is_data_block_reference() {
        return results;
    }

    let key_data = match module.referenced_block(kms_key, block) {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!(block = %block.full_name(), error = %e, "kms key reference not resolved");
            return results;
        }
    };
    if let Some(key_id) = key_data.attribute("key_id")
        && key_id.is_not_nil()
        && is_default_key(key_id)
    {
        results.add("Resource explicitly uses the default CMK", key_id);
    }
    results
}
