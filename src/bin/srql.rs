//! Command-line interface for srql
//! Parses SRQL queries and dumps their tokens or syntax tree.
//!
//! Usage:
//!   srql parse `<query>` [--format `<format>`] [--config `<file>`]  - Parse a query and print the AST
//!   srql tokens `<query>` [--format `<format>`]                   - Print the token stream
//!   srql formats                                              - List all processing specs
//!
//! A query of `-` is read from stdin. Set `RUST_LOG=debug` to see processing events.

use clap::{Arg, ArgMatches, Command};
use srql::processor::{
    available_formats, OutputFormat, ProcessingError, ProcessingSpec, ProcessingStage,
    QueryProcessor,
};
use srql_config::{AstFormat, ConfigError, Loader, SrqlConfig};
use std::io::Read;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();

    let matches = Command::new("srql")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse and inspect SRQL queries")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a query and print its syntax tree")
                .arg(query_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["debug", "json", "yaml", "canonical"])
                        .help("AST output format (defaults to output.format from the config)"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a query")
                .arg(query_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["simple", "json", "yaml"])
                        .default_value("simple")
                        .help("Token output format"),
                ),
        )
        .subcommand(Command::new("formats").about("List available processing specs"))
        .get_matches();

    match matches.subcommand() {
        Some(("formats", _)) => {
            for format in available_formats() {
                println!("{}", format);
            }
            ExitCode::SUCCESS
        }
        Some((name, sub_matches)) => {
            let config = match load_config(&matches) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("error: failed to load config: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            let stage = if name == "tokens" {
                ProcessingStage::Token
            } else {
                ProcessingStage::Ast
            };
            run(sub_matches, stage, &config)
        }
        None => ExitCode::FAILURE,
    }
}

fn query_arg() -> Arg {
    Arg::new("query")
        .help("The query to process, or '-' to read it from stdin")
        .required(true)
        .index(1)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<SrqlConfig, ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader.build()
}

/// Handle the parse and tokens commands
fn run(matches: &ArgMatches, stage: ProcessingStage, config: &SrqlConfig) -> ExitCode {
    let query = match read_query(matches) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("error: failed to read query: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let format = match matches.get_one::<String>("format") {
        Some(name) => match ProcessingSpec::from_string(&format!("{}-{}", stage_name(stage), name))
        {
            Ok(spec) => spec.format,
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => default_format(stage, config.output.format),
    };

    let processor = QueryProcessor::from_config(config);
    let spec = ProcessingSpec::new(stage, format);
    match processor.process(&query, &spec) {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprint!("{}", with_newline(processor.describe_error(&query, &e)));
            if let ProcessingError::Diagnostic(diagnostic) = &e {
                tracing::debug!(?diagnostic, "parse failed");
            }
            ExitCode::FAILURE
        }
    }
}

fn stage_name(stage: ProcessingStage) -> &'static str {
    match stage {
        ProcessingStage::Token => "token",
        ProcessingStage::Ast => "ast",
    }
}

fn default_format(stage: ProcessingStage, configured: AstFormat) -> OutputFormat {
    match stage {
        ProcessingStage::Token => OutputFormat::Simple,
        ProcessingStage::Ast => OutputFormat::from(configured),
    }
}

fn read_query(matches: &ArgMatches) -> std::io::Result<String> {
    match matches.get_one::<String>("query").map(String::as_str) {
        Some("-") | None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end().to_string())
        }
        Some(query) => Ok(query.to_string()),
    }
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
