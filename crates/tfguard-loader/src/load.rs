use crate::discover::{
    ConfigDir, build_globset, discover_config_dirs, is_local_source, resolve_local_source,
};
use anyhow::Context;
use camino::Utf8Path;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tfguard_model::{AttributeQuery, Module, ModuleBuilder, ModuleId, Value, kinds};
use tfguard_parser::{ParsedFile, parse_file, parse_tfvars};
use tfguard_types::{Diagnostic, SourcePath, ids};

/// Arguments of a `module` block that configure the call rather than feed variables.
const MODULE_META_ARGUMENTS: &[&str] = &[
    "source",
    "version",
    "providers",
    "count",
    "for_each",
    "depends_on",
];

pub const DEFAULT_MAX_MODULE_DEPTH: usize = 8;

#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Globs (relative to the scan root) for paths that are never read.
    pub exclude_paths: Vec<String>,
    /// Extra variable files, relative to the scan root, applied to every root module after
    /// `terraform.tfvars` and `*.auto.tfvars`.
    pub tfvars_files: Vec<String>,
    pub max_module_depth: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            exclude_paths: Vec::new(),
            tfvars_files: Vec::new(),
            max_module_depth: DEFAULT_MAX_MODULE_DEPTH,
        }
    }
}

/// Every module scope found under a scan root: roots first, each followed by its children.
#[derive(Debug, Default)]
pub struct LoadedModules {
    pub modules: Vec<Arc<Module>>,
    pub diagnostics: Vec<Diagnostic>,
    pub files_parsed: usize,
}

impl LoadedModules {
    fn merge(&mut self, other: LoadedModules) {
        self.modules.extend(other.modules);
        self.diagnostics.extend(other.diagnostics);
        self.files_parsed += other.files_parsed;
    }
}

/// Parsed `.tf` files for one directory. Shared by every call that instantiates it.
#[derive(Debug, Default)]
struct ParsedDir {
    files: Vec<ParsedFile>,
    diagnostics: Vec<Diagnostic>,
}

struct Loader<'a> {
    root: &'a Utf8Path,
    options: &'a LoadOptions,
    dirs: HashMap<SourcePath, ParsedDir>,
    next_id: AtomicU32,
}

/// Discover, parse and evaluate every Terraform configuration under `root`.
pub fn load_modules(root: &Utf8Path, options: &LoadOptions) -> anyhow::Result<LoadedModules> {
    anyhow::ensure!(root.is_dir(), "scan root {root} is not a directory");
    let exclude = build_globset(&options.exclude_paths).context("compile exclude_paths")?;
    let config_dirs = discover_config_dirs(root, &exclude).context("discover configurations")?;

    let parsed: Vec<(SourcePath, ParsedDir)> = config_dirs
        .par_iter()
        .map(|(dir, files)| (dir.clone(), parse_dir(root, files)))
        .collect();
    let dirs: HashMap<SourcePath, ParsedDir> = parsed.into_iter().collect();

    let called: BTreeSet<SourcePath> = dirs
        .iter()
        .flat_map(|(dir, parsed)| local_calls(dir, parsed))
        .collect();
    // The scan root is always a root, even when a child module calls back into it.
    let scan_root = SourcePath::default();
    let roots: Vec<&SourcePath> = config_dirs
        .keys()
        .filter(|d| **d == scan_root || !called.contains(*d))
        .collect();
    tracing::info!(
        %root,
        directories = config_dirs.len(),
        roots = roots.len(),
        "discovered configurations"
    );

    let loader = Loader {
        root,
        options,
        dirs,
        next_id: AtomicU32::new(0),
    };

    let per_root: Vec<LoadedModules> = roots
        .par_iter()
        .map(|dir| {
            let (inputs, mut diagnostics) = loader.root_inputs(dir, &config_dirs[*dir]);
            let mut loaded = loader.load(dir, "root", inputs, None, &[]);
            diagnostics.append(&mut loaded.diagnostics);
            loaded.diagnostics = diagnostics;
            loaded
        })
        .collect();

    let mut out = LoadedModules::default();
    for loaded in per_root {
        out.merge(loaded);
    }
    let reached: BTreeSet<&SourcePath> = out.modules.iter().map(|m| m.dir()).collect();
    let unreached: Vec<Diagnostic> = config_dirs
        .keys()
        .filter(|d| !reached.contains(d))
        .map(|d| {
            tracing::warn!(dir = %d, "configuration directory not reachable from any root");
            Diagnostic::new(
                ids::CODE_MODULE_LOAD_ERROR,
                format!("directory `{d}` is not reachable from any root module and was not scanned"),
            )
            .at(d.clone(), None)
        })
        .collect();
    out.diagnostics.extend(unreached);
    out.diagnostics.sort();
    out.diagnostics.dedup();
    Ok(out)
}

/// Build one root module from in-memory sources. Local module calls are not followed.
pub fn load_from_sources(sources: &[(&str, &str)]) -> LoadedModules {
    let mut builder = ModuleBuilder::new(ModuleId(0), "root", SourcePath::default());
    let mut diagnostics = Vec::new();
    let mut files_parsed = 0;
    for (path, text) in sources {
        let path = SourcePath::new(path);
        match parse_file(&path, text) {
            Ok(parsed) => {
                files_parsed += 1;
                builder.add_file(parsed.path, parsed.blocks, parsed.ignores);
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping file that failed to parse");
                diagnostics.push(parse_diagnostic(&path, &e.to_string()));
            }
        }
    }
    LoadedModules {
        modules: vec![Arc::new(builder.build())],
        diagnostics,
        files_parsed,
    }
}

fn parse_dir(root: &Utf8Path, files: &ConfigDir) -> ParsedDir {
    let mut out = ParsedDir::default();
    for path in &files.tf_files {
        let abs = root.join(path.as_str());
        let text = match std::fs::read_to_string(&abs) {
            Ok(text) => text,
            Err(e) => {
                out.diagnostics
                    .push(parse_diagnostic(path, &format!("read {abs}: {e}")));
                continue;
            }
        };
        match parse_file(path, &text) {
            Ok(parsed) => out.files.push(parsed),
            Err(e) => {
                tracing::warn!(%path, error = %e, "skipping file that failed to parse");
                out.diagnostics.push(parse_diagnostic(path, &e.to_string()));
            }
        }
    }
    out
}

fn parse_diagnostic(path: &SourcePath, message: &str) -> Diagnostic {
    Diagnostic::new(ids::CODE_PARSE_ERROR, message).at(path.clone(), None)
}

/// Literal `source` values of `module` blocks, when they point at a local directory.
fn module_sources(file: &ParsedFile) -> impl Iterator<Item = (&str, String)> + '_ {
    file.blocks
        .iter()
        .filter(|b| b.is_kind(kinds::MODULE))
        .filter_map(|b| {
            let name = b.name_label()?;
            let source = match b.attribute("source")?.expr() {
                tfguard_model::Expr::Literal(Value::String(s)) => s.clone(),
                _ => return None,
            };
            Some((name, source))
        })
}

fn local_calls<'a>(dir: &'a SourcePath, parsed: &'a ParsedDir) -> impl Iterator<Item = SourcePath> + 'a {
    parsed
        .files
        .iter()
        .flat_map(module_sources)
        .filter(|(_, source)| is_local_source(source))
        .filter_map(|(_, source)| resolve_local_source(dir, &source))
}

struct ChildCall {
    name: String,
    dir: SourcePath,
    inputs: BTreeMap<String, Value>,
}

impl Loader<'_> {
    fn root_inputs(
        &self,
        dir: &SourcePath,
        files: &ConfigDir,
    ) -> (BTreeMap<String, Value>, Vec<Diagnostic>) {
        let mut inputs = BTreeMap::new();
        let mut diagnostics = Vec::new();
        let explicit = self.options.tfvars_files.iter().map(SourcePath::new);
        for path in files.tfvars_files.iter().cloned().chain(explicit) {
            let abs = self.root.join(path.as_str());
            let text = match std::fs::read_to_string(&abs) {
                Ok(text) => text,
                Err(e) => {
                    diagnostics.push(parse_diagnostic(&path, &format!("read {abs}: {e}")));
                    continue;
                }
            };
            match parse_tfvars(&path, &text) {
                Ok(values) => {
                    tracing::debug!(module = %dir, tfvars = %path, values = values.len(), "applied tfvars");
                    inputs.extend(values);
                }
                Err(e) => diagnostics.push(parse_diagnostic(&path, &e.to_string())),
            }
        }
        (inputs, diagnostics)
    }

    fn load(
        &self,
        dir: &SourcePath,
        name: &str,
        inputs: BTreeMap<String, Value>,
        parent: Option<Arc<Module>>,
        stack: &[SourcePath],
    ) -> LoadedModules {
        let fallback;
        let parsed = match self.dirs.get(dir) {
            Some(p) => p,
            None => {
                let files = ConfigDir {
                    tf_files: list_tf_files(self.root, dir),
                    tfvars_files: Vec::new(),
                };
                fallback = parse_dir(self.root, &files);
                &fallback
            }
        };

        let id = ModuleId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut builder = ModuleBuilder::new(id, name, dir.clone()).inputs(inputs);
        if let Some(parent) = parent {
            builder = builder.parent(parent);
        }
        let mut diagnostics = parsed.diagnostics.clone();
        for file in &parsed.files {
            builder.add_file(file.path.clone(), file.blocks.clone(), file.ignores.clone());
        }
        let module = Arc::new(builder.build());
        tracing::debug!(module = name, %dir, files = parsed.files.len(), "loaded module");

        let mut stack = stack.to_vec();
        stack.push(dir.clone());
        let calls = self.child_calls(&module, &stack, &mut diagnostics);

        let mut out = LoadedModules {
            modules: vec![module.clone()],
            diagnostics,
            files_parsed: parsed.files.len(),
        };
        let children: Vec<LoadedModules> = calls
            .into_par_iter()
            .map(|call| self.load(&call.dir, &call.name, call.inputs, Some(module.clone()), &stack))
            .collect();
        for child in children {
            out.merge(child);
        }
        out
    }

    fn child_calls(
        &self,
        module: &Module,
        stack: &[SourcePath],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<ChildCall> {
        let mut calls = Vec::new();
        for block in module.blocks_of_kind(kinds::MODULE) {
            let Some(name) = block.name_label() else {
                continue;
            };
            let Some(source) = block.attribute("source").and_then(|a| a.value().as_str()) else {
                continue;
            };
            let at = |message: String| {
                Diagnostic::new(ids::CODE_MODULE_LOAD_ERROR, message)
                    .at(block.range().path.clone(), Some(block.range().start_line))
            };
            if !is_local_source(source) {
                tracing::debug!(module = name, source, "skipping remote module source");
                continue;
            }
            let Some(dir) = resolve_local_source(module.dir(), source) else {
                diagnostics.push(at(format!(
                    "module `{name}`: source `{source}` is outside the scan root"
                )));
                continue;
            };
            if stack.contains(&dir) {
                diagnostics.push(at(format!(
                    "module `{name}`: cyclic module call through `{dir}`"
                )));
                continue;
            }
            if stack.len() > self.options.max_module_depth {
                diagnostics.push(at(format!(
                    "module `{name}`: nesting deeper than {} modules",
                    self.options.max_module_depth
                )));
                continue;
            }
            if !self.root.join(dir.as_str()).is_dir() {
                diagnostics.push(at(format!(
                    "module `{name}`: source directory `{dir}` does not exist"
                )));
                continue;
            }
            let inputs = block
                .attributes()
                .iter()
                .filter(|a| !MODULE_META_ARGUMENTS.contains(&a.name()))
                .map(|a| (a.name().to_string(), a.value().clone()))
                .collect();
            calls.push(ChildCall {
                name: name.to_string(),
                dir,
                inputs,
            });
        }
        calls
    }
}

/// `.tf` files directly inside a directory that discovery did not visit (e.g. excluded paths).
fn list_tf_files(root: &Utf8Path, dir: &SourcePath) -> Vec<SourcePath> {
    let Ok(entries) = root.join(dir.as_str()).read_dir_utf8() else {
        return Vec::new();
    };
    let mut files: Vec<SourcePath> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .filter(|e| e.file_name().ends_with(".tf"))
        .map(|e| dir.join(e.file_name()))
        .collect();
    files.sort();
    files
}
