use crate::attribute::Attribute;
use crate::block::Block;
use crate::module::Module;
use crate::reference::Reference;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("attribute `{attribute}` is not a reference (`{expr}`)")]
    NotAReference { attribute: String, expr: String },

    #[error("`{reference}` does not refer to a block")]
    NotABlockReference { reference: String },

    #[error("no block matches `{reference}`")]
    NoMatch { reference: String },

    #[error("`{reference}` is ambiguous: {count} blocks match")]
    Ambiguous { reference: String, count: usize },

    #[error("block `{block}` is not in scope of module `{module}`")]
    ContextOutOfScope { block: String, module: String },
}

impl Module {
    /// Resolve the block an attribute points at, e.g. `kms_key_id = aws_kms_key.main.arn`.
    ///
    /// The lookup starts in the module owning `context` and walks outwards; the nearest scope
    /// with a match wins.
    pub fn referenced_block(
        &self,
        attribute: &Attribute,
        context: &Block,
    ) -> Result<&Block, ResolveError> {
        let Some(reference) = attribute.reference() else {
            return Err(ResolveError::NotAReference {
                attribute: attribute.name().to_string(),
                expr: attribute.expr().to_string(),
            });
        };
        self.resolve_reference(&reference, context)
    }

    pub fn resolve_reference(
        &self,
        reference: &Reference,
        context: &Block,
    ) -> Result<&Block, ResolveError> {
        if !reference.is_block_reference() {
            return Err(ResolveError::NotABlockReference {
                reference: reference.to_string(),
            });
        }
        let Some(owner) = self.scopes().find(|m| m.id == context.id().module) else {
            return Err(ResolveError::ContextOutOfScope {
                block: context.full_name(),
                module: self.name().to_string(),
            });
        };

        for scope in owner.scopes() {
            match scope.index.lookup(reference.kind(), reference.labels()) {
                [] => continue,
                [i] => {
                    if let Some(b) = scope.blocks.get(*i) {
                        return Ok(b);
                    }
                }
                many => {
                    return Err(ResolveError::Ambiguous {
                        reference: reference.block_address(),
                        count: many.len(),
                    });
                }
            }
        }
        Err(ResolveError::NoMatch {
            reference: reference.block_address(),
        })
    }
}
