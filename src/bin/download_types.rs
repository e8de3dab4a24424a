// src/bin/download_types.rs
use poke_scrape::{cli, config::options::DatasetKind};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run_standalone(DatasetKind::Types)
}
