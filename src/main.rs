//! wide-layout CLI entry point.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use wide_layout::{LayoutConfig, OutputFormat, UnreachablePolicy, layout_text};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Svg,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Json => OutputFormat::Json,
            Format::Svg => OutputFormat::Svg,
        }
    }
}

/// Wide grid layout for control-flow graphs.
#[derive(Parser, Debug)]
#[command(
    name = "wide-layout",
    version = env!("WIDE_LAYOUT_VERSION"),
    about = "Wide grid layout for control-flow graphs"
)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    format: Format,

    /// JSON file with layout settings
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Lay out only the blocks reachable from the entry instead of failing
    #[arg(long = "exclude-unreachable")]
    exclude_unreachable: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match cli.config {
        Some(ref path) => LayoutConfig::from_path(path)
            .unwrap_or_else(|e| fail(format!("cannot load config '{path}': {e}"))),
        None => LayoutConfig::default(),
    };
    if cli.exclude_unreachable {
        config.unreachable = UnreachablePolicy::Exclude;
    }

    // Read input from file or stdin
    let text = if let Some(ref path) = cli.input {
        fs::read_to_string(path).unwrap_or_else(|e| fail(format!("cannot read '{path}': {e}")))
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            fail(format!("cannot read stdin: {e}"));
        }
        buf
    };

    let rendered = layout_text(&text, &config, cli.format.into()).unwrap_or_else(|e| fail(e));

    // Write output to file or stdout
    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered) {
            fail(format!("cannot write '{path}': {e}"));
        }
    } else {
        println!("{rendered}");
        if let Err(e) = io::stdout().flush() {
            fail(format!("cannot flush stdout: {e}"));
        }
    }
}
