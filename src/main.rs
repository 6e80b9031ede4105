//! casex - case conversion and regex testing CLI
//!
//! Convert naming conventions, test patterns, validate, explain.

#[cfg(feature = "cli")]
mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    #[cfg(feature = "cli")]
    {
        use cli::{parse, Commands};

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

        let args = parse();

        // If no command, show help
        let Some(command) = args.command else {
            eprintln!("casex: case conversion and regex testing CLI");
            eprintln!();
            eprintln!("Usage: casex <COMMAND>");
            eprintln!();
            eprintln!("Commands:");
            eprintln!("  case      Convert text to another naming convention");
            eprintln!("  test      Test a regex pattern against input");
            eprintln!("  validate  Validate regex syntax");
            eprintln!("  explain   Explain a regex pattern");
            eprintln!();
            eprintln!("Options:");
            eprintln!("  -f, --format <FORMAT>  Output format [json|text] (default: json)");
            eprintln!("  -c, --config <FILE>    JSON settings file");
            eprintln!("  -h, --help             Print help");
            eprintln!("  -V, --version          Print version");
            return ExitCode::SUCCESS;
        };

        let format = args.format;

        let result = cli::load_settings(args.config.as_deref()).and_then(|settings| {
            match command {
                Commands::Case {
                    target,
                    input,
                    preserve_acronyms,
                    delimiter,
                } => cli::handle_case(
                    &target,
                    input.as_deref(),
                    preserve_acronyms,
                    delimiter.as_deref(),
                    &settings,
                    format,
                ),

                Commands::Test(test_args) => cli::handle_test(&test_args, &settings, format),

                Commands::Validate { pattern } => cli::handle_validate(&pattern, format),

                Commands::Explain { pattern } => cli::handle_explain(&pattern, format),
            }
        });

        match result {
            Ok(output) => {
                println!("{}", output);
                ExitCode::SUCCESS
            }
            Err(e) => {
                // Output error as structured JSON for tooling
                let message = format!("{:#}", e);
                let error = casex::output::ErrorResponse::new(cli::error_code(&e), &message);
                let error_json = serde_json::to_string(&error)
                    .unwrap_or_else(|_| format!(r#"{{"error":true,"message":"{}"}}"#, message));
                eprintln!("{}", error_json);
                ExitCode::FAILURE
            }
        }
    }

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("CLI feature not enabled. Build with --features cli");
        ExitCode::FAILURE
    }
}
