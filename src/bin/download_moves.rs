// src/bin/download_moves.rs
use poke_scrape::{cli, config::options::DatasetKind};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run_standalone(DatasetKind::Moves)
}
