mod cli;
mod scene;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    cli::run_walkthrough(&args)
}
