mod output;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use netscrape_core::{NeighborRecord, NetscrapeConfig, validate_neighbor_records};
use netscrape_parser::report::{FailureCode, ParseReport, ReportBundle, TableKind};
use netscrape_parser::{
    InterfaceParse, NeighborParse, parse_interface_status_output, parse_neighbor_output,
};
use netscrape_summary::{SheetTable, Workbook, summarize_workbook};
use netscrape_topology::resolve_topology;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use output::{OutputFormat, connections_sheet, format_report_bundle, format_sheets, to_structured};

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(name = "netscrape")]
#[command(about = "Parse captured network-device CLI tables into records, topology, and summaries")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse `show cdp neighbors` captures and print every connection.
    Neighbors(ParseArgs),
    /// Parse `show interface status` captures into one sheet per device.
    Interfaces(ParseArgs),
    /// Resolve device identities and print the topology graph as JSON.
    Topology(TopologyArgs),
    /// Count active physical interfaces per switch by speed and type.
    Summary(SummaryArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Capture files, one per device. The device label is the file stem.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Device label to use instead of the file stem (single input only).
    #[arg(long)]
    device: Option<String>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Output per-device parse reports alongside the records.
    #[arg(long)]
    with_report: bool,
}

#[derive(Debug, Args)]
struct TopologyArgs {
    /// Neighbor capture files, one per device.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Organizational domain suffix; overrides the config file.
    #[arg(long)]
    domain: Option<String>,
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the graph JSON to this path instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct SummaryArgs {
    /// Workbook file (`.json`, `.yaml`, or `.yml`) as written by `interfaces`.
    workbook: PathBuf,
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Neighbors(args) => run_neighbors(args),
        Command::Interfaces(args) => run_interfaces(args),
        Command::Topology(args) => run_topology(args),
        Command::Summary(args) => run_summary(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// neighbors / interfaces
// ---------------------------------------------------------------------------

fn run_neighbors(args: ParseArgs) -> Result<(), String> {
    let parses = parse_neighbor_files(&args.inputs, args.device.as_deref())?;
    report_empty_devices(parses.iter().map(|parse| &parse.report));

    let reports: Vec<ParseReport> = parses.iter().map(|parse| parse.report.clone()).collect();
    let records: Vec<NeighborRecord> = parses.into_iter().flat_map(|parse| parse.records).collect();
    for problem in validate_neighbor_records(&records) {
        warn!(%problem, "Invalid neighbor record");
    }

    #[derive(Serialize)]
    struct NeighborOutput<'a> {
        records: &'a [NeighborRecord],
        report: &'a ReportBundle,
    }

    let bundle = ReportBundle::new(PACKAGE_VERSION, reports);
    match args.format {
        OutputFormat::Json | OutputFormat::Yaml if args.with_report => {
            let output = NeighborOutput {
                records: &records,
                report: &bundle,
            };
            println!("{}", to_structured(&output, args.format)?);
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            println!("{}", to_structured(&records, args.format)?);
        }
        OutputFormat::Markdown | OutputFormat::Table => {
            print!("{}", format_sheets(&[connections_sheet(&records)], args.format)?);
            if args.with_report {
                print!("\n{}", format_report_bundle(&bundle, args.format)?);
            }
        }
    }
    Ok(())
}

fn run_interfaces(args: ParseArgs) -> Result<(), String> {
    let captures = read_captures(&args.inputs, args.device.as_deref())?;
    let parses: Vec<InterfaceParse> = captures
        .par_iter()
        .map(|capture| match &capture.text {
            Ok(raw) => parse_interface_status_output(&capture.device, raw),
            Err(err) => InterfaceParse {
                records: Vec::new(),
                report: ParseReport::read_failed(&capture.device, TableKind::InterfaceStatus, err),
            },
        })
        .collect();
    report_empty_devices(parses.iter().map(|parse| &parse.report));

    let workbook = Workbook::new(parses.iter().map(interface_sheet).collect());
    for name in colliding_sheet_names(&workbook.sheets) {
        warn!(sheet = %name, "Several devices share this sheet name; their summary rows will merge");
    }

    #[derive(Serialize)]
    struct InterfaceOutput<'a> {
        workbook: &'a Workbook,
        report: &'a ReportBundle,
    }

    let bundle = ReportBundle::new(
        PACKAGE_VERSION,
        parses.into_iter().map(|parse| parse.report).collect(),
    );
    match args.format {
        OutputFormat::Json | OutputFormat::Yaml if args.with_report => {
            let output = InterfaceOutput {
                workbook: &workbook,
                report: &bundle,
            };
            println!("{}", to_structured(&output, args.format)?);
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            println!("{}", to_structured(&workbook, args.format)?);
        }
        OutputFormat::Markdown | OutputFormat::Table => {
            print!("{}", format_sheets(&workbook.sheets, args.format)?);
            if args.with_report {
                print!("\n{}", format_report_bundle(&bundle, args.format)?);
            }
        }
    }
    Ok(())
}

fn interface_sheet(parse: &InterfaceParse) -> SheetTable {
    let report = &parse.report;
    if report.failure_code == Some(FailureCode::ReadFailed) {
        let message = report.warnings.first().map_or("", String::as_str);
        return SheetTable::error(&report.device, message);
    }
    SheetTable::from_interfaces(&report.device, &parse.records)
}

fn report_empty_devices<'a>(reports: impl Iterator<Item = &'a ParseReport>) {
    for report in reports.filter(|report| report.records == 0) {
        eprintln!("{}: {}", report.device, report.status_message());
    }
}

// ---------------------------------------------------------------------------
// topology
// ---------------------------------------------------------------------------

fn run_topology(args: TopologyArgs) -> Result<(), String> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(domain) = args.domain {
        config.domain_suffix = domain;
    }
    config
        .validate()
        .map_err(|err| format!("Invalid configuration: {err}"))?;

    let parses = parse_neighbor_files(&args.inputs, None)?;
    report_empty_devices(parses.iter().map(|parse| &parse.report));
    let records: Vec<NeighborRecord> = parses.into_iter().flat_map(|parse| parse.records).collect();

    if records.is_empty() {
        eprintln!("No CDP neighbors found in any input; nothing to build.");
        return Ok(());
    }
    eprintln!("Total connections: {}", records.len());

    let topology = resolve_topology(&records, config.domain());
    let problems = topology.validate();
    if !problems.is_empty() {
        let details: Vec<String> = problems.iter().map(ToString::to_string).collect();
        return Err(format!("Topology failed validation: {}", details.join("; ")));
    }

    let json = to_structured(&topology, OutputFormat::Json)?;
    match args.output {
        Some(path) => {
            fs::write(&path, format!("{json}\n"))
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            info!(path = %path.display(), "Wrote topology");
        }
        None => println!("{json}"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// summary
// ---------------------------------------------------------------------------

fn run_summary(args: SummaryArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let workbook = load_workbook(&args.workbook)?;

    let tables =
        summarize_workbook(&workbook, &config.aggregation).map_err(|err| err.to_string())?;

    match args.format {
        OutputFormat::Json | OutputFormat::Yaml => {
            println!("{}", to_structured(&tables, args.format)?);
        }
        OutputFormat::Markdown | OutputFormat::Table => {
            print!("{}", format_sheets(&tables.to_sheets(), args.format)?);
        }
    }
    Ok(())
}

fn load_workbook(path: &Path) -> Result<Workbook, String> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&text)
            .map_err(|err| format!("Failed to parse workbook '{}': {err}", path.display()))
    } else {
        serde_json::from_str(&text)
            .map_err(|err| format!("Failed to parse workbook '{}': {err}", path.display()))
    }
}

// ---------------------------------------------------------------------------
// shared helpers
// ---------------------------------------------------------------------------

fn load_config(path: Option<&Path>) -> Result<NetscrapeConfig, String> {
    match path {
        Some(path) => NetscrapeConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => Ok(NetscrapeConfig::default()),
    }
}

fn parse_neighbor_files(inputs: &[PathBuf], device: Option<&str>) -> Result<Vec<NeighborParse>, String> {
    let captures = read_captures(inputs, device)?;
    Ok(captures
        .par_iter()
        .map(|capture| match &capture.text {
            Ok(raw) => parse_neighbor_output(&capture.device, raw),
            Err(err) => NeighborParse {
                records: Vec::new(),
                report: ParseReport::read_failed(&capture.device, TableKind::Neighbors, err),
                schema: None,
            },
        })
        .collect())
}

/// One input file: its device label and either its text or the read error.
#[derive(Debug)]
struct Capture {
    device: String,
    text: Result<String, String>,
}

/// Reads every capture in parallel, in input order.
///
/// An unreadable file stays in the batch as a failed [`Capture`] so the other
/// devices are still parsed. Fails only when no file could be read at all.
fn read_captures(inputs: &[PathBuf], device: Option<&str>) -> Result<Vec<Capture>, String> {
    if device.is_some() && inputs.len() > 1 {
        return Err("--device can only be used with a single input file".to_string());
    }

    let captures: Vec<Capture> = inputs
        .par_iter()
        .map(|path| {
            let device = device.map_or_else(|| device_label(path), str::to_string);
            let text = fs::read(path)
                .map(|raw| String::from_utf8_lossy(&raw).into_owned())
                .map_err(|err| format!("Failed to read '{}': {err}", path.display()));
            if let Err(err) = &text {
                warn!(device = %device, error = %err, "Skipping unreadable capture");
            }
            Capture { device, text }
        })
        .collect();

    if captures.iter().all(|capture| capture.text.is_err()) {
        let errors: Vec<&str> = captures
            .iter()
            .filter_map(|capture| capture.text.as_ref().err())
            .map(String::as_str)
            .collect();
        return Err(format!("No capture could be read: {}", errors.join("; ")));
    }
    Ok(captures)
}

/// Sheet names that occur more than once, e.g. device labels sharing their
/// first 31 characters.
fn colliding_sheet_names(sheets: &[SheetTable]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut colliding = Vec::new();
    for sheet in sheets {
        let name = sheet.name.as_str();
        if !seen.insert(name) && !colliding.contains(&name) {
            colliding.push(name);
        }
    }
    colliding
}

fn device_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_label_uses_file_stem() {
        assert_eq!(device_label(Path::new("captures/core-sw1.txt")), "core-sw1");
        assert_eq!(device_label(Path::new("10.0.0.1.log")), "10.0.0.1");
    }

    #[test]
    fn test_device_override_requires_single_input() {
        let inputs = [PathBuf::from("a.txt"), PathBuf::from("b.txt")];
        let err = read_captures(&inputs, Some("sw1")).unwrap_err();
        assert!(err.contains("--device"));
    }

    #[test]
    fn test_all_captures_missing_is_error() {
        let err = read_captures(&[PathBuf::from("/nonexistent/sw.txt")], None).unwrap_err();
        assert!(err.starts_with("No capture could be read: Failed to read"));
    }

    #[test]
    fn test_unreadable_capture_stays_in_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("acc-sw3.txt");
        fs::write(&good, "acc-sw3#show interface status\n").unwrap();
        let missing = dir.path().join("acc-sw4.txt");

        let captures = read_captures(&[good, missing], None).unwrap();
        assert_eq!(captures.len(), 2);
        assert_eq!(captures[0].device, "acc-sw3");
        assert!(captures[0].text.is_ok());
        assert_eq!(captures[1].device, "acc-sw4");
        assert!(captures[1].text.as_ref().unwrap_err().starts_with("Failed to read"));
    }

    #[test]
    fn test_read_failure_becomes_error_sheet() {
        let parse = InterfaceParse {
            records: Vec::new(),
            report: ParseReport::read_failed("acc-sw4", TableKind::InterfaceStatus, "Failed to read 'x'"),
        };
        let sheet = interface_sheet(&parse);
        assert_eq!(sheet.columns, ["Error"]);
        assert_eq!(sheet.cell(0, "Error"), Some("Failed to read 'x'"));
    }

    #[test]
    fn test_colliding_sheet_names_after_truncation() {
        let prefix = "building-a-floor-3-idf-west-acc";
        let sheets = [
            SheetTable::from_interfaces(&format!("{prefix}-01"), &[]),
            SheetTable::from_interfaces(&format!("{prefix}-02"), &[]),
            SheetTable::from_interfaces(&format!("{prefix}-03"), &[]),
            SheetTable::from_interfaces("acc-sw3", &[]),
        ];
        assert_eq!(colliding_sheet_names(&sheets), [prefix]);
        assert!(colliding_sheet_names(&sheets[2..]).is_empty());
    }

    #[test]
    fn test_cli_parses_verbosity_and_subcommand() {
        let cli = Cli::try_parse_from(["netscrape", "-vv", "topology", "a.txt", "--domain", "corp.example"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Topology(args) => assert_eq!(args.domain.as_deref(), Some("corp.example")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
