use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use ptidecode_core::{Field, FieldFilter, FieldName};
use serde::Serialize;

mod logging;

const EXAMPLES: &str = "Examples:\n  ptidecode dch decode capture.dch -o report.json\n  ptidecode dch decode capture.dch --stdout --filter 'mac.dest_pan==0xabcd'\n  ptidecode fields --json";

#[derive(Parser, Debug)]
#[command(name = "ptidecode")]
#[command(version)]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (commit ", env!("PTIDECODE_BUILD_COMMIT"), ")"))]
#[command(
    about = "Offline decoder for packet trace interface (PTI) debug channel captures.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Enable debug logging on stderr (also: PTIDECODE_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on Debug Channel (DCH) captures.
    Dch {
        #[command(subcommand)]
        command: DchCommands,
    },
    /// List the known field names with their byte order and width.
    Fields {
        /// Print the field table as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum DchCommands {
    /// Decode a capture file and generate a versioned JSON report.
    #[command(visible_alias = "analyze", alias = "analyse")]
    #[command(after_help = EXAMPLES)]
    Decode {
        /// Path to a .dch, .pti or .bin capture (a glob matching one file is accepted)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Keep only frames matching NAME, NAME==VALUE or NAME!=VALUE (repeatable)
        #[arg(short = 'f', long = "filter", value_name = "EXPR")]
        filters: Vec<String>,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any frame failed to decode
        #[arg(long)]
        strict: bool,

        /// List frame decode errors after decoding
        #[arg(long)]
        list_errors: bool,
    },
}

struct DecodeArgs {
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    filters: Vec<String>,
    quiet: bool,
    strict: bool,
    list_errors: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Dch { command } => match command {
            DchCommands::Decode {
                input,
                report,
                stdout,
                pretty,
                compact: _,
                filters,
                quiet,
                strict,
                list_errors,
            } => cmd_dch_decode(DecodeArgs {
                input,
                report,
                stdout,
                pretty,
                filters,
                quiet,
                strict,
                list_errors,
            }),
        },
        Commands::Fields { json } => cmd_fields(json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_dch_decode(args: DecodeArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let filters = parse_filters(&args.filters)?;
    let report = if args.stdout {
        None
    } else {
        Some(args.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        let report_abs = report_path
            .parent()
            .map(|parent| {
                if parent.as_os_str().is_empty() {
                    fs::canonicalize(".")
                } else {
                    fs::canonicalize(parent)
                }
            })
            .transpose()
            .ok()
            .flatten();
        if let Some(report_dir) = report_abs {
            let report_target = report_dir.join(
                report_path
                    .file_name()
                    .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?,
            );
            if report_target == input_abs {
                return Err(CliError::new(
                    format!(
                        "report path must differ from input: {}",
                        report_path.display()
                    ),
                    Some("choose a different output path".to_string()),
                ));
            }
        }
    }

    let rep = ptidecode_core::decode_capture_file(&resolved_input, &filters)
        .context("DCH capture decoding failed")?;
    let json = serialize_report(&rep, args.pretty)?;

    if let Some(report) = report {
        if let Some(parent) = report.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(&report, json)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
        if !args.quiet {
            eprintln!(
                "OK: {} frames decoded, {} matched, {} errors -> {}",
                rep.summary.frames_decoded,
                rep.summary.frames_matched,
                rep.summary.frame_errors,
                report.display()
            );
        }
    } else {
        print!("{}", json);
    }

    if args.list_errors && !args.quiet {
        print_errors(&rep);
    }
    if args.strict && !rep.errors.is_empty() {
        return Err(CliError::new(
            format!("{} frame decode errors detected", rep.errors.len()),
            Some("use --list-errors to inspect".to_string()),
        ));
    }
    Ok(())
}

fn parse_filters(exprs: &[String]) -> Result<Vec<FieldFilter>, CliError> {
    exprs
        .iter()
        .map(|expr| {
            FieldFilter::parse(expr).map_err(|err| {
                CliError::new(
                    format!("invalid filter '{}': {}", expr, err),
                    Some("run `ptidecode fields` to list known field names".to_string()),
                )
            })
        })
        .collect()
}

fn serialize_report(rep: &ptidecode_core::Report, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_errors(rep: &ptidecode_core::Report) {
    eprintln!("Frame decode errors:");
    for error in &rep.errors {
        eprintln!("  @{} {}", error.offset, error.message);
    }
}

#[derive(Serialize)]
struct FieldInfo {
    name: &'static str,
    byte_order: &'static str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<usize>,
}

fn cmd_fields(json: bool) -> Result<(), CliError> {
    let fields: Vec<FieldInfo> = Field::ALL
        .into_iter()
        .map(|field| FieldInfo {
            name: field.as_str(),
            byte_order: field.endianness().as_str(),
            kind: field.kind().as_str(),
            width: field.fixed_width(),
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&fields).context("JSON serialization failed")?;
        println!("{}", out);
        return Ok(());
    }

    for info in fields {
        let width = info
            .width
            .map(|w| w.to_string())
            .unwrap_or_else(|| "var".to_string());
        println!(
            "{:<22} {:<12} {:<9} {}",
            info.name, info.byte_order, info.kind, width
        );
    }
    Ok(())
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .dch, .pti or .bin capture".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .dch, .pti or .bin capture".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !matches!(ext.as_str(), "dch" | "pti" | "bin") {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .dch, .pti or .bin capture".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single capture file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
