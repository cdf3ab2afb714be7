//! Command-line interface for `sunbox`.

#![forbid(unsafe_code)]

mod parse;
mod render;
mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sunbox_analysis::{SearchConfig, Sbox, Searcher, Table};
use tracing_subscriber::EnvFilter;

use crate::parse::{parse_table, Base};

/// S-box analysis CLI.
#[derive(Parser)]
#[command(
    name = "sunbox",
    version,
    author,
    about = "An open-source S-box analysis utility"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the LAT, DDT and/or ACT of each S-box.
    Table {
        /// Input files containing the S-boxes to analyze.
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
        /// Tables to compute, comma separated (e.g. `lat,ddt`).
        #[arg(long, value_enum, required = true, value_delimiter = ',')]
        kind: Vec<TableKind>,
        /// Output format for the tables.
        #[arg(long, value_enum, default_value_t = Format::Ansi)]
        format: Format,
        /// Output directory; tables go to stdout when omitted.
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,
        /// Numeric base of the input values (detected when omitted).
        #[arg(long, value_enum)]
        base: Option<Base>,
    },
    /// Classify each S-box and report biases, linear structures and the metric.
    Auto {
        /// Input files containing the S-boxes to analyze.
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
        /// Numeric base of the input values (detected when omitted).
        #[arg(long, value_enum)]
        base: Option<Base>,
    },
    /// Probe the XOR/rotation/multiplication orbit for a lower Biryukov-Perrin metric.
    Search {
        /// Input file containing the S-box.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Number of best-first expansions to run.
        #[arg(long, default_value_t = 1)]
        rounds: usize,
        /// Numeric base of the input values (detected when omitted).
        #[arg(long, value_enum)]
        base: Option<Base>,
    },
    /// Print a random bijective S-box.
    Random {
        /// Width of the S-box in bits.
        #[arg(long, default_value_t = 4)]
        bits: u32,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// Base used to print the values.
        #[arg(long, value_enum, default_value_t = Base::Hex)]
        base: Base,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TableKind {
    Lat,
    Ddt,
    Act,
}

impl TableKind {
    fn name(self) -> &'static str {
        match self {
            TableKind::Lat => "lat",
            TableKind::Ddt => "ddt",
            TableKind::Act => "act",
        }
    }

    fn title(self) -> &'static str {
        match self {
            TableKind::Lat => "Linear Approximation Table",
            TableKind::Ddt => "Difference Distribution Table",
            TableKind::Act => "Autocorrelation Table",
        }
    }

    fn select(self, sbox: &Sbox) -> &Table {
        match self {
            TableKind::Lat => sbox.lat(),
            TableKind::Ddt => sbox.ddt(),
            TableKind::Act => sbox.act(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Ansi,
    Csv,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Ansi => "ansi",
            Format::Csv => "csv",
        }
    }

    fn render(self, table: &Table) -> String {
        match self {
            Format::Ansi => render::ansi(table),
            Format::Csv => render::csv(table),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Table {
            files,
            kind,
            format,
            output,
            base,
        } => cmd_table(&files, &kind, format, output.as_deref(), base),
        Commands::Auto { files, base } => cmd_auto(&files, base),
        Commands::Search { file, rounds, base } => cmd_search(&file, rounds, base),
        Commands::Random { bits, seed, base } => cmd_random(bits, seed, base),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_table(
    files: &[PathBuf],
    kinds: &[TableKind],
    format: Format,
    output: Option<&Path>,
    base: Option<Base>,
) -> Result<()> {
    if let Some(dir) = output {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    for path in files {
        let sbox = load_sbox(path, base)?;
        for &kind in kinds {
            let rendered = format.render(kind.select(&sbox));
            match output {
                Some(dir) => {
                    let target = dir.join(format!(
                        "{}_{}.{}",
                        kind.name(),
                        file_stem(path),
                        format.extension()
                    ));
                    fs::write(&target, rendered)
                        .with_context(|| format!("write {}", target.display()))?;
                    tracing::info!(table = kind.name(), path = %target.display(), "table written");
                }
                None => {
                    eprintln!("{}: {}", path.display(), kind.title());
                    println!("{rendered}");
                }
            }
        }
    }
    Ok(())
}

fn cmd_auto(files: &[PathBuf], base: Option<Base>) -> Result<()> {
    for path in files {
        let sbox = load_sbox(path, base)?;
        println!("{}", path.display());
        let report = report::auto_report(&sbox)
            .with_context(|| format!("formatting report for {}", path.display()))?;
        println!("{report}");
    }
    Ok(())
}

fn cmd_search(path: &Path, rounds: usize, base: Option<Base>) -> Result<()> {
    let sbox = load_sbox(path, base)?;
    let searcher = Searcher::with_config(SearchConfig { rounds });
    let outcome = searcher.run(&sbox);
    if outcome.expansions < rounds {
        tracing::warn!(
            requested = rounds,
            executed = outcome.expansions,
            "search queue drained early"
        );
    }
    println!("input metric: {}", sbox.biryukov_perrin_metric());
    println!(
        "best candidate after {} expansion(s), {} generated: {} (metric {})",
        outcome.expansions, outcome.generated, outcome.best.label, outcome.best.metric
    );
    println!(
        "{}",
        render::truth_table(
            outcome.best.sbox.table(),
            outcome.best.sbox.output_bits(),
            Base::Hex
        )
    );
    Ok(())
}

fn cmd_random(bits: u32, seed: Option<u64>, base: Base) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let sbox = Sbox::random_permutation(bits, &mut rng).context("generate S-box")?;
    println!(
        "{}",
        render::truth_table(sbox.table(), sbox.output_bits(), base)
    );
    Ok(())
}

fn load_sbox(path: &Path, base: Option<Base>) -> Result<Sbox> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let values = parse_table(&text, base).with_context(|| format!("parse {}", path.display()))?;
    let sbox = Sbox::new(values).with_context(|| format!("load {}", path.display()))?;
    if sbox.input_bits() > 16 || sbox.output_bits() > 16 {
        bail!(
            "{}: {}x{}-bit S-boxes are beyond what the table engine can handle",
            path.display(),
            sbox.input_bits(),
            sbox.output_bits()
        );
    }
    tracing::info!(
        path = %path.display(),
        m = sbox.input_bits(),
        n = sbox.output_bits(),
        "loaded S-box"
    );
    Ok(sbox)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sbox".to_owned())
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
