use console::style;
use git_diff_report::cli::Cli;
use git_diff_report::error::ReportError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // GIT_DIFF_REPORT_LOG takes precedence over RUST_LOG
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("GIT_DIFF_REPORT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli.execute() {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);

        let exit_code = match e.downcast_ref::<ReportError>() {
            Some(ReportError::Config(_)) => 2,
            Some(ReportError::Revision(_)) => 3,
            _ => 1,
        };
        process::exit(exit_code);
    }
}
