//! tapgen CLI entry point.

// CLI binary needs to output to stdout/stderr - this is intentional
#![allow(clippy::print_stdout, clippy::print_stderr)]

use tapgen::cli::{self, CliError, EXIT_OK, exit_code_for, render_error};
use tapgen::tracing::{self, TracingConfig, TracingFormat};

fn main() {
    let cli = cli::parse();
    let json = cli.log_format == TracingFormat::Json;

    let tracing_config = TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
        ..TracingConfig::default()
    };
    if let Err(e) = tracing::init_tracing(tracing_config) {
        let err = CliError::setup(e.to_string());
        let code = exit_code_for(&err);
        render_error(err, json);
        std::process::exit(code);
    }

    match tapgen::execute(&cli) {
        Ok(outcome) => {
            for path in outcome.paths() {
                println!("{}", path.display());
            }
            std::process::exit(EXIT_OK);
        }
        Err(err) => {
            let code = exit_code_for(&err);
            render_error(err, json);
            std::process::exit(code);
        }
    }
}
