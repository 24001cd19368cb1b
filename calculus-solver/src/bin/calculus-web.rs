use calculus_solver::{logging, web};
use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

/// Serves the calculus solver as a web page.
#[derive(Debug, Parser)]
#[command(name = "calculus-web", version)]
struct Args {
    /// The address to listen on.
    #[arg(long, env = "CALCULUS_SOLVER_ADDR", default_value = "127.0.0.1:5000")]
    addr: String,

    /// Minimum level of log messages written to stderr.
    #[arg(long, env = "CALCULUS_SOLVER_LOG", default_value = "info", value_parser = logging::parse_level)]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.log_level);

    match web::serve(&args.addr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        },
    }
}
