use anyhow::Result;
use clap::Parser;

mod platform;

fn main() -> Result<()> {
    let cli = platform::settings::Cli::parse();
    platform::run_app(cli.into_settings())
}
