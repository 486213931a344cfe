//! Terminal entry point.

use std::io;

use clap::Parser;

use kebab_desktop::{AppState, ConfigArgs, shell};

#[derive(Debug, Parser)]
#[command(name = "kebab-desktop")]
#[command(about = "Daily kebab skewer inventory ledger", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() {
    kebab_observability::init();

    let cli = Cli::parse();
    let config = match cli.config.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        data_file = %config.data_file.display(),
        report_file = %config.report_file.display(),
        products = config.catalog.len(),
        "starting inventory shell"
    );

    let (mut state, outcome) = AppState::open(&config);
    println!("{outcome}");
    println!("{}", shell::HELP);

    if let Err(e) = shell::run(&mut state, io::stdin().lock(), io::stdout().lock()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
