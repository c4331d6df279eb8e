//! alzw CLI - adaptive LZW over a restricted alphabet
//!
//! Compresses text drawn from a declared alphabet with variable-width LZW
//! codes, and expands or inspects the resulting streams.

mod commands;
mod error;
mod utils;

use alzw_codec::{LzwConfig, PolicyKind};
use clap::{Parser, ValueEnum};
use commands::{cmd_compress, cmd_expand, cmd_inspect};
use error::{CliError, CliResult, exit_with_error};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "alzw")]
#[command(
    author,
    version,
    about = "Adaptive LZW compression over a restricted alphabet"
)]
#[command(long_about = "
alzw compresses input drawn from a declared alphabet with LZW codes that grow
from --minW to --maxW bits. Once the codebook is full, --policy decides what
happens: freeze it, reset it, or evict the least recently (lru) or least
frequently (lfu) used entry. Carriage return and line feed always join the
alphabet unless --no-line-breaks is given.

Examples:
  alzw --mode compress --alphabet dna.txt -i genome.txt -o genome.alz
  alzw --mode compress --minW 3 --maxW 12 --policy lru --alphabet ab.txt < in.txt > out.alz
  alzw --mode expand -i genome.alz -o genome.txt
  alzw --mode inspect -i genome.alz --json
")]
struct Cli {
    /// Operation to perform
    #[arg(long, value_enum)]
    mode: Mode,

    /// Initial codeword width in bits (compress)
    #[arg(long = "minW", value_name = "BITS", default_value_t = LzwConfig::DEFAULT.min_width)]
    min_width: u8,

    /// Maximum codeword width in bits (compress)
    #[arg(long = "maxW", value_name = "BITS", default_value_t = LzwConfig::DEFAULT.max_width)]
    max_width: u8,

    /// What to do once the codebook is full (compress)
    #[arg(long, value_enum, default_value = "freeze")]
    policy: PolicyArg,

    /// Alphabet file, one symbol per line (compress)
    #[arg(long, value_name = "FILE")]
    alphabet: Option<PathBuf>,

    /// Leave carriage return and line feed out of the alphabet (compress)
    #[arg(long)]
    no_line_breaks: bool,

    /// Input file (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output as JSON (inspect)
    #[arg(long)]
    json: bool,

    /// Log progress and statistics to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logging
    #[arg(short, long)]
    quiet: bool,
}

/// Operation selected by `--mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Compress input into a stream
    Compress,
    /// Expand a stream back into the original input
    Expand,
    /// Describe a stream's header
    Inspect,
}

/// Full-codebook policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Stop learning new entries
    Freeze,
    /// Start over with an empty codebook
    Reset,
    /// Replace the least recently used entry
    Lru,
    /// Replace the least frequently used entry
    Lfu,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Freeze => PolicyKind::Freeze,
            PolicyArg::Reset => PolicyKind::Reset,
            PolicyArg::Lru => PolicyKind::Lru,
            PolicyArg::Lfu => PolicyKind::Lfu,
        }
    }
}

fn init_tracing(cli: &Cli) {
    // --quiet: nothing. --verbose: RUST_LOG if set, else info.
    // Default: warnings only, so stdout pipelines stay clean.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        exit_with_error(e);
    }
}

/// Validate arguments, run the selected mode, then write the result.
///
/// Nothing reaches the output until the whole run has succeeded.
fn run(cli: Cli) -> CliResult<()> {
    let output = match cli.mode {
        Mode::Compress => {
            let path = cli.alphabet.as_deref().ok_or_else(|| {
                CliError::Usage("--mode compress requires --alphabet FILE".to_string())
            })?;
            let config = LzwConfig::new(cli.min_width, cli.max_width, cli.policy.into());
            config.validate()?;
            let alphabet = utils::load_alphabet(path, !cli.no_line_breaks)?;
            let input = utils::read_input(cli.input.as_deref())?;
            cmd_compress(&input, alphabet, config)?
        }
        Mode::Expand => {
            let input = utils::read_input(cli.input.as_deref())?;
            cmd_expand(&input)?
        }
        Mode::Inspect => {
            let input = utils::read_input(cli.input.as_deref())?;
            cmd_inspect(&input, cli.json)?
        }
    };

    utils::write_output(cli.output.as_deref(), &output)
}
