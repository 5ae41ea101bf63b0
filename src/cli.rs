use std::env;
use std::path::PathBuf;

use chrono::NaiveDateTime;

pub struct CliOptions {
    pub request: Option<PathBuf>,
    pub preset: Option<String>,
    pub at: Option<NaiveDateTime>,
    pub report_out: Option<PathBuf>,
    pub serve: bool,
    pub port: u16,
}

/// Outcome of argument parsing.
pub enum Command {
    Run(CliOptions),
    Help,
}

pub fn parse_args() -> Result<Command, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<Command, String> {
    let mut i = 0usize;
    let mut request = None;
    let mut preset = None;
    let mut at = None;
    let mut report_out = None;
    let mut serve = false;
    let mut port = None;

    while i < args.len() {
        match args[i].as_str() {
            "--request" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --request (expected a TOML file path)",
                )?;
                if request.replace(PathBuf::from(path)).is_some() {
                    return Err("--request provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--at" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --at (expected YYYY-MM-DDTHH:MM[:SS])",
                )?;
                let parsed = parse_datetime(raw)
                    .ok_or_else(|| format!("--at value \"{raw}\" is not a valid datetime"))?;
                if at.replace(parsed).is_some() {
                    return Err("--at provided more than once".to_string());
                }
            }
            "--report-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --report-out (expected a file path)")?;
                if report_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--report-out provided more than once".to_string());
                }
            }
            "--serve" => serve = true,
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let p = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                if port.replace(p).is_some() {
                    return Err("--port provided more than once".to_string());
                }
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if request.is_some() && preset.is_some() {
        return Err(
            "arguments `--request` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if request.is_none() && preset.is_none() {
        preset = Some("baseline".to_string());
    }

    Ok(Command::Run(CliOptions {
        request,
        preset,
        at,
        report_out,
        serve,
        port: port.unwrap_or(3000),
    }))
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("home-energy: smart-home energy decision engine");
    eprintln!();
    eprintln!("Usage:");
    eprintln!(
        "  home-energy [--request <path> | --preset <name>] [--at <datetime>] [--report-out <path>]"
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --request <path>      Load an evaluation request from a TOML file");
    eprintln!("  --preset <name>       Use a built-in request (default: baseline)");
    eprintln!("  --at <datetime>       Override the evaluation time");
    eprintln!("  --report-out <path>   Write the device decisions to CSV");
    eprintln!("  --serve               Start the REST API (requires the `api` feature)");
    eprintln!("  --port <u16>          API server port (default: 3000)");
    eprintln!("  --help                Show this help message");
}
