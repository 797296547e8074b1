use clap::Parser;
use ntexport::cli::{init_logging, Cli};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = ntexport::cli::commands::export::execute(&cli) {
        ntexport::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
