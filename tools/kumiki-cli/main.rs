use clap::{Parser, Subcommand};
use itertools::Itertools;
use kumiki::prelude::*;
use serde_json::Value;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Inspect, validate and round-trip pipeline files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Infer a schema from a JSON array of records
    Infer {
        records_path: String,
        /// Number of leading records to keep in the preview sample
        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_SIZE)]
        sample_size: usize,
    },
    /// Validate the configuration of every node in a pipeline file
    Validate { pipeline_path: String },
    /// Check whether data shaped like one schema can flow into another
    Check {
        source_schema_path: String,
        target_schema_path: String,
    },
    /// Decode, re-encode and compare a pipeline file
    Roundtrip { pipeline_path: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Infer {
            records_path,
            sample_size,
        } => run_infer(&records_path, sample_size),
        Command::Validate { pipeline_path } => run_validate(&pipeline_path),
        Command::Check {
            source_schema_path,
            target_schema_path,
        } => run_check(&source_schema_path, &target_schema_path),
        Command::Roundtrip { pipeline_path } => run_roundtrip(&pipeline_path),
    }
}

fn run_infer(records_path: &str, sample_size: usize) {
    let records: Vec<Value> = serde_json::from_str(&read_file(records_path))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse records JSON: {}", e)));

    let preview = create_data_preview(&records, sample_size, None);
    println!("Rows: {} (sampled {})", preview.total_rows, preview.sample.len());
    for field in &preview.schema.fields {
        let nullability = if field.nullable { "nullable" } else { "required" };
        println!("  {:<24} {:<8} {}", field.name, field.field_type, nullability);
    }

    let problems = validate_data_against_schema(&records, &preview.schema);
    if !problems.is_empty() {
        println!("\n{} rows disagree with the inferred schema:", problems.len());
        for problem in problems {
            println!("  -> {}", problem);
        }
    }
}

fn run_validate(pipeline_path: &str) {
    let pipeline = load_pipeline(pipeline_path);
    println!(
        "Validating '{}' ({} nodes, {} edges)",
        pipeline.name,
        pipeline.nodes.len(),
        pipeline.edges.len()
    );

    let mut invalid = 0;
    for node in &pipeline.nodes {
        let result = validate_node_config(node.node_type, &node.config);
        let verdict = if result.is_valid { "ok" } else { "INVALID" };
        println!("  [{}] {} ({})", verdict, node.data.label, node.node_type);
        if !result.errors.is_empty() {
            println!("      errors: {}", result.errors.iter().join("; "));
        }
        if !result.warnings.is_empty() {
            println!("      warnings: {}", result.warnings.iter().join("; "));
        }
        if !result.is_valid {
            invalid += 1;
        }
    }

    if invalid > 0 {
        exit_with_error(&format!("{} node(s) have invalid configuration", invalid));
    }
}

fn run_check(source_schema_path: &str, target_schema_path: &str) {
    let parse = |path: &str| -> DataSchema {
        serde_json::from_str(&read_file(path)).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to parse schema '{}': {}", path, e))
        })
    };
    let source = parse(source_schema_path);
    let target = parse(target_schema_path);

    let result = schemas_compatible(&source, &target);
    if result.compatible {
        println!("Compatible");
    } else {
        println!("Incompatible:");
        for issue in &result.issues {
            println!("  -> {}", issue);
        }
        std::process::exit(2);
    }
}

fn run_roundtrip(pipeline_path: &str) {
    let start = Instant::now();
    let pipeline = load_pipeline(pipeline_path);
    let text = serialize_pipeline(&pipeline)
        .unwrap_or_else(|e| exit_with_error(&format!("Serialization failed: {}", e)));
    let restored = deserialize_pipeline(&text)
        .unwrap_or_else(|e| exit_with_error(&format!("Re-decoding failed: {}", e)));

    if pipelines_equal(&pipeline, &restored) {
        println!(
            "Round trip OK: {} bytes in {:?}",
            text.len(),
            start.elapsed()
        );
    } else {
        exit_with_error("Round trip changed the pipeline");
    }
}

fn load_pipeline(path: &str) -> Pipeline {
    deserialize_pipeline(&read_file(path))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load pipeline '{}': {}", path, e)))
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read file '{}': {}", path, e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
