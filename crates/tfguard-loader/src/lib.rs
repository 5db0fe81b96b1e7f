//! Filesystem adapter: discover Terraform configurations, read and parse them, and
//! evaluate each scope into a [`tfguard_model::Module`].
//!
//! This crate is allowed to do filesystem IO. Remote module sources are never fetched.

#![forbid(unsafe_code)]

mod discover;
mod load;

pub use discover::{ConfigDir, discover_config_dirs, is_local_source, resolve_local_source};
pub use load::{
    DEFAULT_MAX_MODULE_DEPTH, LoadOptions, LoadedModules, load_from_sources, load_modules,
};
