use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tfguard_types::SourcePath;
use walkdir::{DirEntry, WalkDir};

const TERRAFORM_DIR: &str = ".terraform";
const TFVARS: &str = "terraform.tfvars";
const AUTO_TFVARS_SUFFIX: &str = ".auto.tfvars";

/// Configuration files found in one directory, relative to the scan root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigDir {
    pub tf_files: Vec<SourcePath>,
    /// `terraform.tfvars` first, then `*.auto.tfvars` sorted by name.
    pub tfvars_files: Vec<SourcePath>,
}

/// Directories under `root` that contain `.tf` files.
///
/// Skips hidden directories (including `.terraform`) and anything matching `exclude`.
pub fn discover_config_dirs(
    root: &Utf8Path,
    exclude: &GlobSet,
) -> anyhow::Result<BTreeMap<SourcePath, ConfigDir>> {
    let mut out: BTreeMap<SourcePath, ConfigDir> = BTreeMap::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !skip_entry(e, root, exclude));

    for entry in walker {
        let entry = entry.with_context(|| format!("walk {root}"))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(abs) = pathbuf_to_utf8(entry.path().to_path_buf()) else {
            continue;
        };
        let rel = SourcePath::new(abs.strip_prefix(root).unwrap_or(&abs).as_str());
        let Some(name) = abs.file_name() else {
            continue;
        };

        if name.ends_with(".tf") {
            out.entry(rel.parent()).or_default().tf_files.push(rel);
        } else if name == TFVARS || name.ends_with(AUTO_TFVARS_SUFFIX) {
            out.entry(rel.parent()).or_default().tfvars_files.push(rel);
        }
    }

    out.retain(|_, dir| !dir.tf_files.is_empty());
    for dir in out.values_mut() {
        dir.tf_files.sort();
        dir.tfvars_files
            .sort_by_key(|p| (p.file_name() != TFVARS, p.clone()));
    }
    Ok(out)
}

fn skip_entry(entry: &DirEntry, root: &Utf8Path, exclude: &GlobSet) -> bool {
    let name = entry.file_name().to_string_lossy();
    if entry.file_type().is_dir() && (name == TERRAFORM_DIR || name.starts_with('.')) {
        return true;
    }
    let Some(abs) = pathbuf_to_utf8(entry.path().to_path_buf()) else {
        return true;
    };
    let rel = abs.strip_prefix(root).unwrap_or(&abs).as_str().replace('\\', "/");
    exclude.is_match(&rel)
}

/// Compile `exclude_paths` patterns.
pub fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p).with_context(|| format!("invalid exclude glob: {p}"))?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}

/// Resolve a local module `source` (`./x`, `../x`) against the calling module's directory.
///
/// Returns `None` when the result would leave the scan root.
pub fn resolve_local_source(base: &SourcePath, source: &str) -> Option<SourcePath> {
    let mut parts: Vec<&str> = base
        .as_str()
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    for segment in source.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(SourcePath::new(parts.join("/")))
}

pub fn is_local_source(source: &str) -> bool {
    source.starts_with("./") || source.starts_with("../")
}
