//! Developer tasks (schema generation, fixture validation).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(depwitness_types::VerificationReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(depwitness_settings::WitnessConfigV1)
}

fn generate_snapshot_schema() -> schemars::Schema {
    schema_for!(depwitness_repo::ResolutionSnapshotV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "depwitness.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "depwitness.config.v1.json",
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: "depwitness.snapshot.v1.json",
            generate: generate_snapshot_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn compile(schema: &schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let value = serde_json::to_value(schema).context("Failed to convert schema")?;
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

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
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

/// Check every fixture under tests/fixtures/: snapshots and expected receipts against their
/// schemas, configs through the settings parser.
fn validate_fixtures() -> anyhow::Result<()> {
    validate_fixtures_in(&fixtures_dir())
}

fn validate_fixtures_in(root: &Path) -> anyhow::Result<()> {
    let snapshot_schema = compile(&generate_snapshot_schema())?;
    let report_schema = compile(&generate_report_schema())?;

    let mut checked = 0;
    let mut errors = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.context("Failed to walk fixtures")?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let shown = path.strip_prefix(root).unwrap_or(path).display().to_string();
        let name = entry.file_name().to_string_lossy();

        match name.as_ref() {
            "snapshot.json" => {
                let value = read_json(path)?;
                for err in snapshot_schema.iter_errors(&value) {
                    errors.push(format!("{shown}: schema validation: {err}"));
                }
                let text = fs::read_to_string(path)?;
                if let Err(err) = depwitness_repo::parse_snapshot_json(&text) {
                    errors.push(format!("{shown}: {err:#}"));
                }
            }
            "expected.report.json" => {
                let value = read_json(path)?;
                for err in report_schema.iter_errors(&value) {
                    errors.push(format!("{shown}: schema validation: {err}"));
                }
                if depwitness_test_util::normalize_nondeterministic(value.clone()) != value {
                    errors.push(format!(
                        "{shown}: timestamps and tool.version must use placeholders"
                    ));
                }
            }
            "depwitness.toml" => {
                let text = fs::read_to_string(path)?;
                let parsed = depwitness_settings::parse_config_toml(&text).and_then(|cfg| {
                    depwitness_settings::resolve_config(cfg, Default::default())
                });
                if let Err(err) = parsed {
                    errors.push(format!("{shown}: {err:#}"));
                }
            }
            _ => continue,
        }
        checked += 1;
        println!("  ✓ {shown}");
    }

    if checked == 0 {
        bail!("No fixtures found in {}", root.display());
    }

    if !errors.is_empty() {
        eprintln!("\nFixture errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Fixture validation failed with {} errors", errors.len());
    }

    println!("\n✓ {checked} fixture files validate");
    Ok(())
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))
}

/// Validate that all failure codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let codes = depwitness_types::explain::all_codes();
    let mut errors = Vec::new();

    for code in codes {
        match depwitness_types::explain::lookup_explanation(code) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Code '{code}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Code '{code}' has empty description"));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Code '{code}' has empty remediation"));
                }
            }
            None => errors.push(format!("Code '{code}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} codes have explanations", codes.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help               Show this message");
    eprintln!("  emit-schemas       Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas   Check if schemas/ matches generated output (for CI)");
    eprintln!("  validate-fixtures  Check tests/fixtures/ against schemas and parsers");
    eprintln!("  print-schema-ids   Print known schema IDs");
    eprintln!("  explain-coverage   Validate all failure codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "validate-fixtures" => validate_fixtures(),
        "explain-coverage" => explain_coverage(),
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
