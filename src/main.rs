//! invisible-scan CLI entry point

use std::process::ExitCode;

use clap::Parser;

use invisible_scan::config::Settings;
use invisible_scan::git::Git;
use invisible_scan::github::HttpFetcher;
use invisible_scan::orchestrator::Orchestrator;
use invisible_scan::report::{exit_status, render};
use invisible_scan::{logging, Cli};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> invisible_scan::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = Settings::from_cli(&cli)?;
    let git = Git::new(&settings.repo_root);
    let fetcher = HttpFetcher::new(settings.api_timeout)?;
    let orchestrator = Orchestrator {
        vcs: &git,
        fetcher: &fetcher,
        token: settings.token.as_deref(),
    };

    let findings = orchestrator.run(&settings.plan)?;
    print!("{}", render(&findings, settings.format)?);
    Ok(exit_status(&findings))
}
