use std::path::Path;
use std::process;

use crate::{load_with_schema, report_error, OutputFormat};

pub(crate) fn cmd_get(
    file: &Path,
    schema_path: &Path,
    name: &str,
    output: OutputFormat,
    quiet: bool,
) {
    let params = load_with_schema(file, schema_path, output, quiet);

    match params.value(name) {
        Ok(value) => {
            if quiet {
                return;
            }
            match output {
                OutputFormat::Text => println!("{}", value),
                OutputFormat::Json => println!("{}", value.to_json()),
            }
        }
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}
