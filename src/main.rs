//! chunkwise: split text into overlapping chunks from the command line.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chunkwise::{split, Chunk, ChunkConfig, Credentials, SplitterSettings, Strategy};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Chunk size used by `demo`.
const DEMO_CHUNK_SIZE: usize = 26;
/// Chunk overlap used by `demo`.
const DEMO_CHUNK_OVERLAP: usize = 4;
const DEMO_TEXTS: [&str; 2] = [
    "abcdefghijklmnopqrstuvwxyzvwxyzvwxyzvwxyzvwxyzvwxyzvwxyz",
    "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz",
];

#[derive(Parser)]
#[command(name = "chunkwise")]
#[command(about = "Split text into overlapping chunks for retrieval pipelines")]
#[command(version)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a file (or stdin) into chunks
    Split {
        /// Input file; stdin when omitted or "-"
        input: Option<PathBuf>,

        /// Settings file (TOML)
        #[arg(short, long, env = "CHUNKWISE_CONFIG")]
        config: Option<PathBuf>,

        /// Maximum characters per chunk
        #[arg(short = 's', long)]
        chunk_size: Option<usize>,

        /// Characters shared between consecutive chunks
        #[arg(short = 'o', long)]
        chunk_overlap: Option<usize>,

        /// Segmentation strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Recursive separator, coarsest first; repeat for more. Accepts \n, \t and \\
        #[arg(long = "separator")]
        separators: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Split the two alphabet samples with both strategies (size 26, overlap 4)
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Recursive,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Loaded up front so a missing key fails before any work is done.
    let _credentials = Credentials::from_env().context("failed to load API credentials")?;
    info!("API credential loaded");

    match cli.command {
        Commands::Split {
            input,
            config,
            chunk_size,
            chunk_overlap,
            strategy,
            separators,
            format,
        } => {
            let mut settings = match &config {
                Some(path) => SplitterSettings::load(path)
                    .with_context(|| format!("failed to load settings from {}", path.display()))?,
                None => SplitterSettings::default(),
            };
            apply_overrides(&mut settings, chunk_size, chunk_overlap, strategy, &separators)?;

            let config = settings
                .chunk_config()
                .context("invalid chunk size/overlap")?;
            let text = read_input(input.as_deref())?;

            let chunks = split(&text, &config, &settings.strategy);
            info!(chunks = chunks.len(), strategy = settings.strategy.name(), "split input");
            print_chunks(&chunks, format)?;
        }
        Commands::Demo => run_demo()?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn apply_overrides(
    settings: &mut SplitterSettings,
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
    strategy: Option<StrategyArg>,
    separators: &[String],
) -> Result<()> {
    if let Some(size) = chunk_size {
        settings.chunk_size = size;
    }
    if let Some(overlap) = chunk_overlap {
        settings.chunk_overlap = overlap;
    }

    match strategy {
        Some(StrategyArg::Fixed) => {
            if !separators.is_empty() {
                bail!("--separator only applies to the recursive strategy");
            }
            settings.strategy = Strategy::FixedCount;
        }
        Some(StrategyArg::Recursive) if separators.is_empty() => {
            if !matches!(settings.strategy, Strategy::Recursive { .. }) {
                settings.strategy = Strategy::recursive();
            }
        }
        Some(StrategyArg::Recursive) | None if !separators.is_empty() => {
            settings.strategy = Strategy::Recursive {
                separators: separators.iter().map(|s| unescape(s)).collect(),
            };
        }
        _ => {}
    }

    debug!(?settings, "resolved settings");
    Ok(())
}

/// Expand `\n`, `\t`, `\r` and `\\` so separators can be typed in a shell.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_chunks(chunks: &[Chunk], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(chunks)?);
        }
        OutputFormat::Text => {
            for chunk in chunks {
                println!(
                    "--- chunk {} [{}..{}] {} chars, overlap {} ---",
                    chunk.index,
                    chunk.start,
                    chunk.end,
                    chunk.char_len(),
                    chunk.overlap
                );
                println!("{}", chunk.text);
            }
        }
    }
    Ok(())
}

fn run_demo() -> Result<()> {
    let config = ChunkConfig::new(DEMO_CHUNK_SIZE, DEMO_CHUNK_OVERLAP)?;

    for strategy in [Strategy::recursive(), Strategy::FixedCount] {
        for text in DEMO_TEXTS {
            let chunks: Vec<String> = split(text, &config, &strategy)
                .into_iter()
                .map(|c| c.text)
                .collect();
            println!("{:<9} {:?}", strategy.name(), chunks);
        }
    }
    Ok(())
}
