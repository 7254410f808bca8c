use std::path::Path;

use crate::{load_params, OutputFormat};

pub(crate) fn cmd_show(file: &Path, output: OutputFormat, quiet: bool) {
    let params = load_params(file, output, quiet);
    if quiet {
        return;
    }
    let raw = params.raw_source();
    match output {
        OutputFormat::Text => {
            for (name, value) in raw.iter() {
                println!("{}={}", name, value);
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&raw.to_json())
                    .unwrap_or_else(|e| format!("serialization error: {}", e))
            );
        }
    }
}
