use clap::{Parser, ValueEnum};
use loyalty_dryrun::prelude::*;
use std::fs;
use tracing_subscriber::EnvFilter;

/// CLI mirror of `AggregationPolicy`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum AggregationCli {
    Distributions,
    RootNodes,
    AllNodes,
}

impl From<AggregationCli> for AggregationPolicy {
    fn from(value: AggregationCli) -> Self {
        match value {
            AggregationCli::Distributions => AggregationPolicy::Distributions,
            AggregationCli::RootNodes => AggregationPolicy::RootNodes,
            AggregationCli::AllNodes => AggregationPolicy::AllNodes,
        }
    }
}

/// Dry-test a loyalty program against a single event record
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the program JSON file (`{ nodes, edges }`)
    program_path: String,
    /// Path to the event data JSON file (`{ attribute: value }`)
    event_path: String,

    /// Which node results make up the total points
    #[arg(short, long, value_enum)]
    aggregation: Option<AggregationCli>,

    /// Path to an engine options JSON file
    #[arg(short, long)]
    options: Option<String>,

    /// Validate the program and print the issues before running
    #[arg(long)]
    validate: bool,

    /// Print the result as JSON instead of the formatted audit trail
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let program_json = read_file(&cli.program_path, "program");
    let event_json = read_file(&cli.event_path, "event data");
    let program = ProgramDefinition::from_json(&program_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load program: {}", e)));
    let event = EventData::from_json(&event_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load event data: {}", e)));

    let mut options = match &cli.options {
        Some(path) => EngineOptions::from_json(&read_file(path, "options"))
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid options file '{}': {}", path, e))),
        None => EngineOptions::default(),
    };
    if let Some(aggregation) = cli.aggregation {
        options.aggregation = aggregation.into();
    }

    if cli.validate {
        print_validation(&validate_program(&program));
    }

    let engine = DryTestEngine::builder().options(options).build();
    let result = engine
        .run(&program, &event)
        .unwrap_or_else(|e| exit_with_error(&format!("Dry test failed: {}", e)));

    if cli.json {
        let json = result
            .to_json_pretty()
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize result: {}", e)));
        println!("{}", json);
    } else {
        print!("{}", TraceFormatter::format_result(&result));
    }
}

fn print_validation(report: &ValidationReport) {
    let summary = &report.summary;
    eprintln!(
        "Validation: {} error(s), {} warning(s), {} info",
        summary.errors, summary.warnings, summary.info
    );
    for issue in &report.issues {
        eprintln!("  [{}] {}", issue.severity, issue.message);
    }
    eprintln!();
}

fn read_file(path: &str, what: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read {} file '{}': {}", what, path, e))
    })
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
