mod check;
mod get;
mod logging;
mod schema;
mod show;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use simparams_core::Params;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Inspect and validate simulation parameter files.
#[derive(Parser)]
#[command(
    name = "simparams",
    version,
    about = "Inspect and validate simulation parameter files"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log parsing and definition events to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the raw name=value assignments of a parameter file
    Show {
        /// Path to the parameter file
        file: PathBuf,
    },

    /// Define every parameter from a schema and read it back
    Check {
        /// Path to the parameter file
        file: PathBuf,
        /// Path to the TOML schema declaring parameter types
        #[arg(long)]
        schema: PathBuf,
    },

    /// Print a single typed parameter
    Get {
        /// Path to the parameter file
        file: PathBuf,
        /// Path to the TOML schema declaring parameter types
        #[arg(long)]
        schema: PathBuf,
        /// Parameter name
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Show { file } => {
            show::cmd_show(&file, cli.output, cli.quiet);
        }
        Commands::Check { file, schema } => {
            check::cmd_check(&file, &schema, cli.output, cli.quiet);
        }
        Commands::Get { file, schema, name } => {
            get::cmd_get(&file, &schema, &name, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Load a parameter file or exit with status 1.
pub(crate) fn load_params(file: &Path, output: OutputFormat, quiet: bool) -> Params {
    match Params::from_file(file) {
        Ok(params) => params,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

/// Load a parameter file and define everything in `schema_path`, or exit
/// with status 1 if either file cannot be read or a definition conflicts.
pub(crate) fn load_with_schema(
    file: &Path,
    schema_path: &Path,
    output: OutputFormat,
    quiet: bool,
) -> Params {
    let mut params = load_params(file, output, quiet);
    let schema = match schema::load_schema(schema_path) {
        Ok(s) => s,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let errors = schema::apply(&schema, &mut params);
    if !errors.is_empty() {
        for err in &errors {
            report_error(&format!("error: {}", err), output, quiet);
        }
        process::exit(1);
    }
    params
}
