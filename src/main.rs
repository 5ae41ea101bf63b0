//! Energy decision entry point: CLI wiring and config-driven evaluation.

use std::process;

use tracing::{error, info};

use home_energy::cli::{self, CliOptions, Command};
use home_energy::config::RequestConfig;
use home_energy::io::export::export_csv;
use home_energy::logging;

fn load_request(cli: &CliOptions) -> RequestConfig {
    // --request takes priority, then --preset (the parser defaults it to baseline)
    let loaded = if let Some(ref path) = cli.request {
        RequestConfig::from_toml_file(path)
    } else {
        RequestConfig::from_preset(cli.preset.as_deref().unwrap_or("baseline"))
    };

    let mut request = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Some(at) = cli.at {
        request.clock.current_time = at;
    }

    let errors = request.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    request
}

fn main() {
    logging::init();

    let cli = match cli::parse_args() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            cli::print_usage();
            return;
        }
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    let request = load_request(&cli);
    info!(time = %request.clock.current_time, devices = request.devices.len(), "evaluating request");

    let report = match request.evaluate() {
        Ok(report) => report,
        Err(e) => {
            error!(field = e.field(), "evaluation rejected");
            eprintln!("{e}");
            process::exit(1);
        }
    };

    println!("{report}");

    if let Some(ref path) = cli.report_out {
        if let Err(e) = export_csv(&report, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "report written");
    }

    if cli.serve {
        serve(request, report, cli.port);
    }
}

#[cfg(feature = "api")]
fn serve(request: RequestConfig, report: home_energy::engine::DecisionReport, port: u16) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(home_energy::api::AppState { request, report });
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(home_energy::api::serve(state, addr)) {
        eprintln!("error: API server failed: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "api"))]
fn serve(_request: RequestConfig, _report: home_energy::engine::DecisionReport, _port: u16) {
    eprintln!("error: --serve requires building with `--features api`");
    process::exit(1);
}
