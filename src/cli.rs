// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};

use crate::{
    analysis,
    config::{
        consts::{LOG_FILE, STORE_DIR},
        options::{AppOptions, DatasetKind, ExportFormat},
    },
    core::HttpClient,
    error::LoadError,
    logger,
    progress::LogProgress,
    records::{MoveRecord, PokemonRecord, TypeRecord},
    runner::{self, RunSummary},
    store,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PageArg {
    Pokemon,
    Moves,
    Types,
    All,
}

impl PageArg {
    fn kinds(self) -> Vec<DatasetKind> {
        match self {
            PageArg::Pokemon => vec![DatasetKind::Pokemon],
            PageArg::Moves => vec![DatasetKind::Moves],
            PageArg::Types => vec![DatasetKind::Types],
            PageArg::All => DatasetKind::ALL.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "poke_scrape", version, about = "Download PokéAPI catalogs into flat datasets")]
pub struct Cli {
    /// Which dataset(s) to download.
    #[arg(long, value_enum, default_value_t = PageArg::All)]
    pub page: PageArg,

    /// Skip downloading; load the published datasets and print rankings.
    #[arg(long)]
    pub summary: bool,

    #[command(flatten)]
    pub overrides: Overrides,
}

/// Arguments for the single-dataset binaries. All optional.
#[derive(Parser, Debug)]
#[command(version)]
pub struct StandaloneCli {
    #[command(flatten)]
    pub overrides: Overrides,
}

/// Per-run overrides layered on top of the config file.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// JSON config file (default: ./poke_scrape.json if present).
    #[arg(long, env = "POKE_SCRAPE_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "POKE_SCRAPE_BASE_URL")]
    pub base_url: Option<String>,

    /// Output directory.
    #[arg(short, long, env = "POKE_SCRAPE_OUT")]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    #[arg(long)]
    pub page_size: Option<usize>,

    /// Only take the first N catalog entries.
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long)]
    pub max_attempts: Option<u32>,

    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Pause between requests.
    #[arg(long)]
    pub pause_ms: Option<u64>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Don't write .store/debug.log.
    #[arg(long)]
    pub no_log_file: bool,
}

impl Overrides {
    /// Defaults, then config file, then these flags.
    pub fn resolve(&self) -> Result<AppOptions> {
        let mut opts = AppOptions::load_or_default(self.config.as_deref())?;
        let f = &mut opts.fetch;
        if let Some(v) = &self.base_url { f.base_url = v.clone(); }
        if let Some(v) = self.page_size { f.page_size = v; }
        if self.limit.is_some() { f.limit = self.limit; }
        if let Some(v) = self.timeout_secs { f.timeout_secs = v; }
        if let Some(v) = self.pause_ms { f.pause_ms = v; }
        if let Some(v) = self.max_attempts { f.retry.max_attempts = v; }
        if let Some(v) = self.retry_delay_ms { f.retry.base_delay_ms = v; }
        if let Some(v) = &self.out { opts.export.out_dir = v.clone(); }
        if let Some(v) = self.format { opts.export.format = v; }
        opts.validate()?;
        Ok(opts)
    }

    fn init_logging(&self) -> Result<()> {
        let level = logger::level_from_flags(self.verbose, self.quiet);
        let file = (!self.no_log_file).then(|| PathBuf::from(STORE_DIR).join(LOG_FILE));
        logger::init(level, file.as_deref()).wrap_err("could not initialise logging")
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.overrides.init_logging()?;
    let opts = cli.overrides.resolve()?;

    if cli.summary {
        return print_summary(&opts);
    }
    download(&opts, &cli.page.kinds())
}

/// Entry point of the `download_<kind>` binaries.
pub fn run_standalone(kind: DatasetKind) -> Result<()> {
    let cli = StandaloneCli::parse();
    cli.overrides.init_logging()?;
    let opts = cli.overrides.resolve()?;
    download(&opts, &[kind])
}

fn download(opts: &AppOptions, kinds: &[DatasetKind]) -> Result<()> {
    let client = HttpClient::new(&opts.fetch)?;
    let label = kinds.iter().map(|k| k.stem()).collect::<Vec<_>>().join("+");
    let mut progress = LogProgress::new(label, 100);

    let summary = runner::run(opts, kinds, &client, &mut progress)
        .wrap_err("download failed; existing datasets were left untouched")?;
    print_written(&summary);
    Ok(())
}

fn print_written(summary: &RunSummary) {
    for w in &summary.written {
        println!(
            "{}\t{} rows\t{:?}\t{}",
            w.kind,
            w.manifest.rows,
            w.manifest.status,
            w.path.display()
        );
    }
    let skipped = summary.skipped_total();
    if skipped > 0 {
        println!("{skipped} record(s) skipped; see the manifest(s) for names");
    }
}

/// Load an optional dataset: absent is fine, corrupt is not.
fn load_optional<R>(opts: &AppOptions) -> Result<Option<Vec<R>>>
where
    R: crate::records::Record + serde::de::DeserializeOwned,
{
    match store::load_records::<R>(&opts.export) {
        Ok(l) => Ok(Some(l.records)),
        Err(LoadError::MissingManifest { path }) => {
            log::warn!("{} not published yet; skipping its section", path.display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_summary(opts: &AppOptions) -> Result<()> {
    let pokemon = store::load_records::<PokemonRecord>(&opts.export)
        .wrap_err("could not load the pokemon dataset")?
        .records;
    let moves = load_optional::<MoveRecord>(opts)?;
    let types = load_optional::<TypeRecord>(opts)?;
    let top_n = opts.analysis.top_n;

    println!("== Top {top_n} by base stat total ==");
    for (i, p) in analysis::rank_by_bst(&pokemon).iter().take(top_n).enumerate() {
        println!("{:>3}. {:<24} {:>4}", i + 1, p.name, p.bst());
    }

    let exclusions = analysis::legendary_exclusions(&pokemon, &opts.analysis.extra_legendaries);
    match analysis::strongest_non_legendary(&pokemon, &exclusions) {
        Some(p) => println!("\nStrongest non-legendary: {} ({})", p.name, p.bst()),
        None => println!("\nStrongest non-legendary: none"),
    }

    println!("\n== Pokémon per generation ==");
    let avg_gen = analysis::average_bst_by_generation(&pokemon, false);
    for (g, n) in analysis::count_by_generation(&pokemon) {
        println!("gen {g:<2} {n:>5}   avg BST {:>6.1}", avg_gen.get(&g).copied().unwrap_or(0.0));
    }

    println!("\n== Pokémon per type (avg BST, fully evolved) ==");
    let avg_type = analysis::average_bst_by_type(&pokemon, true);
    for (t, n) in analysis::count_by_type(&pokemon) {
        match avg_type.get(&t) {
            Some(avg) => println!("{t:<10} {n:>5}   {avg:>6.1}"),
            None => println!("{t:<10} {n:>5}   {:>6}", "-"),
        }
    }

    println!("\n== Leaders per generation ==");
    for (g, leaders) in analysis::stat_leaders_by_generation(&pokemon, 3) {
        let names: Vec<String> = leaders.iter().map(|p| format!("{} ({})", p.name, p.bst())).collect();
        println!("gen {g:<2} {}", names.join(", "));
    }

    if let Some(moves) = &moves {
        println!("\n== Strongest move power per type ==");
        for (t, power) in analysis::max_power_by_type(moves) {
            println!("{t:<10} {power:>4}");
        }
    }

    if let Some(types) = &types {
        println!("\n== Weaknesses per type ==");
        for (t, n) in analysis::weakness_count(types) {
            println!("{t:<10} {n:>2}");
        }
        if let Some(top) = analysis::rank_by_bst(&pokemon).first() {
            let weak: Vec<String> = analysis::pokemon_weaknesses(top, types)
                .into_iter()
                .map(|(t, m)| format!("{t} x{m}"))
                .collect();
            println!("\n{} is weak to: {}", top.name, weak.join(", "));
        }
    }
    Ok(())
}
