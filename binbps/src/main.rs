//! BPS command-line tool for checking and dumping BPS documents.
//!
//! Usage: bps [OPTIONS] [FILE|DIR]
//!
//! Options:
//!       --check                Check if input is valid (exit 0 if valid, 1 if invalid)
//!       --decimal-point <C>    Decimal point used in number literals [default: .]
//!   -h, --help                 Print help
//!   -V, --version              Print version
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use libbps::{parse_with_options, Document, NumberFormat, ParseOptions};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut check_only = false;
    let mut number_format = NumberFormat::INVARIANT;
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("bps {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "--check" => {
                check_only = true;
            }
            "--decimal-point" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --decimal-point requires a character argument");
                    process::exit(1);
                }
                number_format = match parse_decimal_point(&args[i]) {
                    Some(format) => format,
                    None => {
                        eprintln!("Error: Unusable decimal point: {}", args[i]);
                        process::exit(1);
                    }
                };
            }
            "-" => {
                // Explicit stdin
                // input_path stays None, which means stdin
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            arg => {
                if input_path.is_some() {
                    eprintln!("Error: Only one input may be given");
                    process::exit(1);
                }
                input_path = Some(arg);
            }
        }
        i += 1;
    }

    // Directory mode: check or dump every .bps file in it
    if let Some(path) = input_path {
        if Path::new(path).is_dir() {
            process::exit(process_directory(path, number_format, check_only));
        }
    }

    let input = match input_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    process::exit(process_input(&input, input_path, number_format, check_only));
}

/// A decimal point argument must be exactly one usable character.
fn parse_decimal_point(arg: &str) -> Option<NumberFormat> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => NumberFormat::with_decimal_point(c),
        _ => None,
    }
}

fn process_directory(dir_path: &str, number_format: NumberFormat, check_only: bool) -> i32 {
    let entries = match fs::read_dir(dir_path) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error reading directory {}: {}", dir_path, e);
            return 1;
        }
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|e| e == "bps").unwrap_or(false))
        .collect();
    paths.sort();
    debug!(dir = dir_path, files = paths.len(), "processing directory");

    let mut had_errors = false;
    for path in &paths {
        let path_str = path.to_string_lossy();
        let input = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path_str, e);
                had_errors = true;
                continue;
            }
        };
        if !check_only {
            println!("# {}", path_str);
        }
        if process_input(&input, Some(&*path_str), number_format, check_only) != 0 {
            had_errors = true;
        }
    }

    if had_errors {
        1
    } else {
        0
    }
}

fn process_input(
    input: &str,
    input_file: Option<&str>,
    number_format: NumberFormat,
    check_only: bool,
) -> i32 {
    let filename = input_file.map(|p| {
        Path::new(p)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| p.to_string())
    });

    let options = ParseOptions::new()
        .with_filename(filename.as_deref())
        .with_number_format(number_format);

    match parse_with_options(input, &options) {
        Ok(doc) => {
            info!(file = ?filename, entries = doc.len(), "parsed");
            if check_only {
                match input_file {
                    Some(path) => println!("{}: ok", path),
                    None => println!("ok"),
                }
            } else {
                print_document(&doc);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// One `key = value` line per entry, values in their debug form.
fn print_document(doc: &Document) {
    for (key, value) in doc.iter() {
        println!("{} = {:?}", key, value);
    }
}

fn print_help() {
    println!(
        "bps - BPS command-line tool

USAGE:
    bps [OPTIONS] [FILE|DIR]

ARGS:
    [FILE|DIR]    Input file or directory (reads from stdin if not provided)
                  When a directory is given, processes all .bps files in it

OPTIONS:
    --check                  Check if input is valid (exit 0 if valid, 1 if invalid)

    --decimal-point <C>      Character used as decimal point in numbers [default: .]
                             Must not be a digit, letter, whitespace or a BPS symbol

    -h, --help               Print help

    -V, --version            Print version

ENVIRONMENT:
    RUST_LOG                 Log filter, e.g. RUST_LOG=libbps=debug

EXAMPLES:
    # Print every key and value of a document
    bps settings.bps

    # Validate all documents in a directory
    bps --check conf/"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_point() {
        assert_eq!(parse_decimal_point("."), Some(NumberFormat::INVARIANT));
        assert!(parse_decimal_point("·").is_some());
        assert!(parse_decimal_point(",").is_none());
        assert!(parse_decimal_point("..").is_none());
        assert!(parse_decimal_point("").is_none());
    }

    #[test]
    fn test_process_input_exit_codes() {
        assert_eq!(process_input("a: 1;", None, NumberFormat::INVARIANT, true), 0);
        assert_eq!(process_input("a: [1,,2];", None, NumberFormat::INVARIANT, true), 1);
    }
}
