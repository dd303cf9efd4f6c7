use serde::Serialize;
use sfclint_core::{
    Analysis, Analyzer, MatrixView, PathOutcome, PathReport, PathSummary, TypeTags,
};
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Analysis(sfclint_core::Error),
    Json(serde_json::Error),
    NotApplicable,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Analysis(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NotApplicable => write!(f, "No node templates found in input"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<sfclint_core::Error> for CliError {
    fn from(value: sfclint_core::Error) -> Self {
        Self::Analysis(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Check,
    Model,
}

#[derive(Debug, Clone, Copy, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    format: OutputFormat,
    pretty: bool,
    cp_type: Option<String>,
    fp_type: Option<String>,
}

fn usage() -> &'static str {
    "sfclint-cli\n\
\n\
USAGE:\n\
  sfclint-cli [check] [--format text|json] [--pretty] [--cp-type <tag>] [--fp-type <tag>] [<path>|-]\n\
  sfclint-cli model [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - check prints the connection points, the connectivity matrix and one block per\n\
    forwarding path; --format json prints the raw analysis instead.\n\
  - check exits 1 when any forwarding path loops, traverses missing links or fails,\n\
    and 3 when the template has no node templates at all.\n\
  - model prints the ingested node templates as JSON (for debugging ingestion).\n\
  - --cp-type / --fp-type override the node type tags used to classify templates\n\
    (defaults: tosca.nodes.nfv.CP / tosca.nodes.nfv.FP).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "check" => args.command = Command::Check,
            "model" => args.command = Command::Model,
            "--pretty" => args.pretty = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--cp-type" => {
                let Some(tag) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.cp_type = Some(tag.clone());
            }
            "--fp-type" => {
                let Some(tag) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.fp_type = Some(tag.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                while it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn print_matrix(view: &MatrixView) {
    print!("\t---");
    for name in &view.names {
        print!(" {name}");
    }
    println!();
    for (name, row) in view.names.iter().zip(&view.rows) {
        println!("\t{name} {row:?}");
    }
}

fn print_path(path: &PathReport) {
    match &path.outcome {
        PathOutcome::Failed { error } => {
            println!("path {}: failed", path.name);
            println!("  {error}");
        }
        PathOutcome::Analyzed {
            matrix,
            total_cps,
            loop_finding,
            missing_links,
            ..
        } => {
            let verdict = match path.summary() {
                PathSummary::Clean => "clean",
                PathSummary::LoopFound => "loop found",
                PathSummary::ConnectivityProblem => "connectivity problem",
                PathSummary::Failed => "failed",
            };
            println!(
                "path {} ({} connection points): {verdict}",
                path.name, total_cps
            );
            print_matrix(matrix);
            if let Some(finding) = loop_finding {
                println!(
                    "  loop of length {} through {}",
                    finding.length,
                    finding.nodes.join(", ")
                );
                println!("  matrix at power {}:", finding.length);
                print_matrix(&finding.powered);
            }
            for pair in missing_links {
                println!("  no declared link for traversal {} -> {}", pair.from, pair.to);
            }
        }
    }
}

fn print_report(analysis: &Analysis) {
    println!("connection points ({}):", analysis.connection_points.len());
    for cp in &analysis.connection_points {
        if cp.virtual_link.is_empty() {
            println!("  {} (no virtual link)", cp.name);
        } else {
            println!("  {} -> {}", cp.name, cp.virtual_link);
        }
    }
    println!();
    println!("connectivity:");
    print_matrix(&analysis.connectivity);
    for path in &analysis.paths {
        println!();
        print_path(path);
    }
}

fn run(args: Args) -> Result<i32, CliError> {
    let text = read_input(args.input.as_deref())?;

    let mut tags = TypeTags::default();
    if let Some(tag) = args.cp_type {
        tags.connection_point = tag;
    }
    if let Some(tag) = args.fp_type {
        tags.forwarding_path = tag;
    }
    let analyzer = Analyzer::new().with_tags(tags);

    match args.command {
        Command::Model => {
            let Some(template) = sfclint_core::load_template(&text)? else {
                return Err(CliError::NotApplicable);
            };
            write_json(&template, args.pretty)?;
            Ok(0)
        }
        Command::Check => {
            let Some(analysis) = analyzer.analyze(&text)? else {
                return Err(CliError::NotApplicable);
            };
            match args.format {
                OutputFormat::Json => write_json(&analysis, args.pretty)?,
                OutputFormat::Text => print_report(&analysis),
            }
            Ok(if analysis.has_findings() { 1 } else { 0 })
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(CliError::NotApplicable) => {
            eprintln!("{}", CliError::NotApplicable);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
