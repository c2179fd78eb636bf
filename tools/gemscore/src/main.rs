//! gemscore command-line entry point

use clap::Parser;
use gemscore::{init_logging, run, Cli};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
