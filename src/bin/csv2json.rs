//! csv2json - Convert a CSV file to a JSON array of objects
//!
//! The first row is treated as the header; header names are cleaned up
//! (trimmed, lower-cased, spaces replaced with underscores) and used as the
//! JSON object keys for every following row.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// csv2json - convert a CSV file to a JSON array of objects.
#[derive(Parser, Debug)]
#[command(name = "csv2json")]
#[command(
    author,
    version,
    about,
    long_about = r#"Convert a CSV file to a JSON array of objects, using the first row as keys.

Header names are normalized before use: trimmed, lower-cased, and spaces
replaced with underscores. Non-ASCII content is preserved as-is in the JSON
output.

Examples:
    csv2json data.csv
    csv2json data.csv -o data.json -i 2
    csv2json legacy.csv --encoding iso-8859-1
"#
)]
struct Cli {
    /// Path to the input CSV file.
    #[arg(value_name = "INPUT_CSV")]
    input_csv_file: PathBuf,

    /// Path to the output JSON file. If omitted, prints JSON to stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Encoding of the input CSV file.
    #[arg(
        short,
        long,
        default_value = "utf-8",
        value_name = "LABEL",
        long_help = "Encoding label of the input CSV file (e.g. utf-8, iso-8859-1,\n\
windows-1252). A byte order mark, when present, is honored and stripped."
    )]
    encoding: String,

    /// Number of spaces for JSON indentation (pretty-printing). Omit for compact output.
    #[arg(short, long, value_name = "SPACES")]
    indent: Option<usize>,
}

fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

fn decode_input(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = encoding_rs::Encoding::for_label(label.as_bytes())
        .with_context(|| format!("unknown encoding label '{}'", label))?;

    let (decoded, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        bail!(
            "could not decode input with encoding '{}'. Verify the file encoding and try \
             --encoding (common alternatives: utf-8, iso-8859-1, windows-1252)",
            label
        );
    }
    Ok(decoded.into_owned())
}

/// Parse CSV content into JSON row objects plus the normalized header list
fn convert(content: &str) -> Result<(Vec<Value>, Vec<String>)> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("failed to read CSV header row")?
        .iter()
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // Row 1 is the header, so data rows start at 2.
        let record = record.with_context(|| format!("failed to read CSV row {}", index + 2))?;

        let mut object = Map::new();
        for (key, field) in headers.iter().zip(record.iter()) {
            object.insert(key.clone(), Value::String(field.to_string()));
        }
        rows.push(Value::Object(object));
    }

    Ok((rows, headers))
}

fn to_json_string(rows: &[Value], indent: Option<usize>) -> Result<String> {
    match indent {
        None => serde_json::to_string(&rows).context("failed to serialize JSON"),
        Some(width) => {
            let indent_bytes = vec![b' '; width];
            let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
            let mut buf = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            rows.serialize(&mut serializer)
                .context("failed to serialize JSON")?;
            String::from_utf8(buf).context("serialized JSON was not valid UTF-8")
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if !cli.input_csv_file.is_file() {
        bail!(
            "input CSV file not found at '{}'",
            cli.input_csv_file.display()
        );
    }

    println!(
        "Reading CSV file: '{}' with encoding '{}'...",
        cli.input_csv_file.display(),
        cli.encoding
    );

    let bytes = fs::read(&cli.input_csv_file)
        .with_context(|| format!("failed to read '{}'", cli.input_csv_file.display()))?;
    let content = decode_input(&bytes, &cli.encoding)?;

    let (rows, headers) = convert(&content)?;

    if headers.is_empty() {
        eprintln!("Warning: CSV file appears to have no header row.");
    } else {
        println!("Using cleaned headers as JSON keys: {:?}", headers);
    }

    if rows.is_empty() && !headers.is_empty() {
        eprintln!("Warning: CSV file contained headers but no data rows.");
    }

    let json = to_json_string(&rows, cli.indent)?;

    match &cli.output {
        Some(dest) => {
            println!("Writing JSON output to: '{}'...", dest.display());
            fs::write(dest, &json)
                .with_context(|| format!("failed to write JSON to '{}'", dest.display()))?;
            println!(
                "Successfully converted {} rows to '{}'.",
                rows.len(),
                dest.display()
            );
        }
        None => {
            println!("{}", json);
            println!("Successfully converted {} rows to JSON (stdout).", rows.len());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
