use std::path::Path;
use std::process;

use crate::{load_with_schema, OutputFormat};

pub(crate) fn cmd_check(file: &Path, schema_path: &Path, output: OutputFormat, quiet: bool) {
    let params = load_with_schema(file, schema_path, output, quiet);

    let mut values = serde_json::Map::new();
    let mut errors: Vec<String> = Vec::new();
    let mut lines: Vec<String> = Vec::new();

    for spec in params.specs() {
        match params.value(&spec.name) {
            Ok(value) => {
                lines.push(format!("{} ({}) = {}", spec.name, spec.param_type, value));
                values.insert(
                    spec.name.clone(),
                    serde_json::json!({
                        "type": spec.param_type,
                        "value": value.to_json(),
                    }),
                );
            }
            Err(e) => errors.push(e.to_string()),
        }
    }

    let unused = params.unused();
    for name in &unused {
        tracing::warn!(name, "parameter not declared in schema");
    }

    match output {
        OutputFormat::Text => {
            if !quiet {
                for line in &lines {
                    println!("{}", line);
                }
                for name in &unused {
                    eprintln!("warning: '{}' is not declared in the schema", name);
                }
                for err in &errors {
                    eprintln!("error: {}", err);
                }
                if errors.is_empty() {
                    println!("ok: {} parameters", lines.len());
                }
            }
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "valid": errors.is_empty(),
                "values": values,
                "errors": errors,
                "unused": unused,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&report)
                    .unwrap_or_else(|e| format!("serialization error: {}", e))
            );
        }
    }

    if !errors.is_empty() {
        process::exit(1);
    }
}
