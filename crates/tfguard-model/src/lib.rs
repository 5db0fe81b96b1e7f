//! Document model for parsed Terraform configurations (no IO).
//!
//! Input: blocks produced by `tfguard-parser`, grouped into one [`ModuleBuilder`] per scope.
//! Output: immutable [`Module`]s exposing block queries, attribute predicates and
//! reference resolution to policy rules.

#![forbid(unsafe_code)]

pub mod attribute;
pub mod block;
pub mod eval;
pub mod expr;
pub mod ignore;
pub mod module;
pub mod reference;
pub mod value;

mod index;
mod resolve;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod proptest;

pub use attribute::{Attribute, AttributeQuery, CaseSensitivity};
pub use block::{Block, BlockId};
pub use expr::{Expr, Step, TemplatePart, Traversal};
pub use ignore::IgnoreDirective;
pub use module::{Module, ModuleBuilder, ModuleId};
pub use reference::Reference;
pub use resolve::ResolveError;
pub use value::Value;

/// Block kinds with special meaning to the model.
pub mod kinds {
    pub const RESOURCE: &str = "resource";
    pub const DATA: &str = "data";
    pub const MODULE: &str = "module";
    pub const PROVIDER: &str = "provider";
    pub const VARIABLE: &str = "variable";
    pub const LOCALS: &str = "locals";
    pub const OUTPUT: &str = "output";
    pub const TERRAFORM: &str = "terraform";
}
