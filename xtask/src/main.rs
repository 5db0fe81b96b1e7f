//! Developer tasks (schema generation, rule example coverage, config checks).
//!
//! Keeping this separate keeps the scanner crates free of schema and filesystem plumbing.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};
use tfguard_engine::{CancellationToken, Registry, Rule};
use walkdir::WalkDir;

const CONFIG_FILE_NAME: &str = "tfguard.toml";

/// Get the project root (parent of the xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(tfguard_types::ScanReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(tfguard_settings::TfguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "tfguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "tfguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn compile_schema(schema: &schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let value = serde_json::to_value(schema).context("Failed to convert schema to JSON")?;
    jsonschema::validator_for(&value).map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas in the repo match what would be generated, and that they compile.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let schema = (spec.generate)();
        compile_schema(&schema).with_context(|| format!("{} does not compile", spec.filename))?;

        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }
        let expected = serialize_schema(&schema)?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Problems with one rule's metadata or examples.
fn rule_example_errors(rule: &Rule, registry: &Registry) -> Vec<String> {
    let id = rule.id();
    let mut errors = Vec::new();

    if rule.base.summary.is_empty() {
        errors.push(format!("{id}: empty summary"));
    }
    if rule.base.resolution.is_empty() {
        errors.push(format!("{id}: empty resolution"));
    }
    if rule.all_links().is_empty() {
        errors.push(format!("{id}: no links"));
    }
    if rule.bad_example.is_empty() {
        errors.push(format!("{id}: no bad examples"));
    }
    if rule.good_example.is_empty() {
        errors.push(format!("{id}: no good examples"));
    }

    for (i, example) in rule.bad_example.iter().enumerate() {
        match example_findings(example, registry, &id) {
            Ok(0) => errors.push(format!("{id}: bad example {i} produced no finding")),
            Ok(_) => {}
            Err(e) => errors.push(format!("{id}: bad example {i}: {e:#}")),
        }
    }
    for (i, example) in rule.good_example.iter().enumerate() {
        match example_findings(example, registry, &id) {
            Ok(0) => {}
            Ok(n) => errors.push(format!("{id}: good example {i} produced {n} findings")),
            Err(e) => errors.push(format!("{id}: good example {i}: {e:#}")),
        }
    }
    errors
}

/// Number of findings `rule_id` raises on one example snippet.
fn example_findings(source: &str, registry: &Registry, rule_id: &str) -> anyhow::Result<usize> {
    let loaded = tfguard_loader::load_from_sources(&[("main.tf", source)]);
    if let Some(d) = loaded
        .diagnostics
        .iter()
        .find(|d| d.code == tfguard_types::ids::CODE_PARSE_ERROR)
    {
        bail!("{}: {}", d.code, d.message);
    }
    let outcome = tfguard_engine::scan(
        &loaded.modules,
        registry,
        &tfguard_test_util::test_policy(),
        &CancellationToken::new(),
    )?;
    Ok(outcome
        .findings
        .iter()
        .filter(|f| f.rule_id == rule_id)
        .count())
}

/// Every registered rule has metadata, and its examples behave as documented.
fn example_coverage() -> anyhow::Result<()> {
    let registry = tfguard_rules::default_registry().context("build rule registry")?;
    let rules = tfguard_rules::all_rules();

    let errors: Vec<String> = rules
        .iter()
        .flat_map(|rule| rule_example_errors(rule, &registry))
        .collect();

    if errors.is_empty() {
        println!("✓ {} rules have metadata and consistent examples", rules.len());
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("Example coverage failed with {} errors", errors.len())
}

/// Config files to check: explicit arguments, or every `tfguard.toml` under the project.
fn config_paths(args: &[String]) -> Vec<PathBuf> {
    if !args.is_empty() {
        return args.iter().map(PathBuf::from).collect();
    }
    let root = project_root();
    WalkDir::new(&root)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            name != "target" && name != "examples" && !name.starts_with('.')
        })
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && e.file_name() == CONFIG_FILE_NAME)
        .map(|e| e.into_path())
        .collect()
}

/// Problems with one config file: schema violations, then resolution errors.
fn config_errors(path: &Path, validator: &jsonschema::Validator) -> anyhow::Result<Vec<String>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let shown = path.display();

    let value: serde_json::Value = match toml::from_str(&text) {
        Ok(value) => value,
        Err(e) => return Ok(vec![format!("{shown}: invalid TOML: {e}")]),
    };
    let mut errors: Vec<String> = validator
        .iter_errors(&value)
        .map(|e| format!("{shown}: schema validation: {e}"))
        .collect();
    if !errors.is_empty() {
        return Ok(errors);
    }

    let resolved = tfguard_settings::parse_config_toml(&text)
        .and_then(|cfg| tfguard_settings::resolve_config(cfg, Default::default()));
    match resolved {
        Ok(resolved) => {
            for unknown in resolved.unknown_rules {
                println!("  ! {shown}: `{unknown}` matches no registered rule");
            }
        }
        Err(e) => errors.push(format!("{shown}: {e:#}")),
    }
    Ok(errors)
}

fn validate_config(args: &[String]) -> anyhow::Result<()> {
    let validator = compile_schema(&generate_config_schema())?;
    let paths = config_paths(args);
    if paths.is_empty() {
        bail!("No {CONFIG_FILE_NAME} files found");
    }

    let mut errors = Vec::new();
    for path in &paths {
        let found = config_errors(path, &validator)?;
        if found.is_empty() {
            println!("  ✓ {} validates", path.display());
        }
        errors.extend(found);
    }

    if errors.is_empty() {
        println!("\n✓ All {} config files are valid!", paths.len());
        return Ok(());
    }
    eprintln!("\nConfig errors:");
    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("Config validation failed with {} errors", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help                     Show this message");
    eprintln!("  emit-schemas             Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas         Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids         Print known schema IDs");
    eprintln!("  example-coverage         Check every rule's metadata and bad/good examples");
    eprintln!("  validate-config [FILE]   Validate tfguard.toml files against the config schema");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");
    let rest = args.get(2..).unwrap_or_default();

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "example-coverage" => example_coverage(),
        "validate-config" => validate_config(rest),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
