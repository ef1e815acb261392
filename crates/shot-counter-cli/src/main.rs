//! shot-counter - Basketball shot charting and shooting statistics
//!
//! Usage:
//!   shot-counter <command> [options]   Run a command
//!   shot-counter --help                Show help

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        cli::print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("shot-counter v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match cli::parse_args(&args) {
        Ok((command, options)) => {
            init_logging(options.verbose);
            cli::run(command, options)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Run 'shot-counter --help' for usage");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    // stdout carries command output (and JSON), so logs go to stderr
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
