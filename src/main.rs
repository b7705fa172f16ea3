//! CLI entry point for joining images side by side

use clap::Parser;
use hconcat::io::cli::{Cli, CompositionRunner};

fn main() -> hconcat::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let runner = CompositionRunner::new(cli);
    runner.run().map(|_| ())
}
