//! chmdict - help-archive dictionary converter

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use chmdict::archive::{DirArchive, EntryFilter};
use chmdict::export::{DictionarySink, PlainTextSink, SlobConfig, SlobWriter};
use chmdict::{ConvertConfig, ConvertStats, OutputMode, convert};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `:key:body` lines with ANSI styling
    Plain,
    /// Slob container with HTML bodies
    Slob,
}

#[derive(Parser)]
#[command(name = "chmdict")]
#[command(version, about = "Convert an extracted help-archive dictionary", long_about = None)]
#[command(after_help = "EXAMPLES:
    chmdict dict/ > dict.txt            Plain-text index on stdout
    chmdict dict/ dict.slob             Slob container (format from extension)
    chmdict -f slob -l Dict dict/ out   Slob container with a label")]
struct Cli {
    /// Directory holding the extracted archive
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (stdout if omitted, plain format only)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output format (default: slob for *.slob, plain otherwise)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Dictionary name stored in the container
    #[arg(short, long)]
    label: Option<String>,

    /// Fail on the first malformed entry instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Encoding of pages that are not UTF-8 (e.g. windows-1251)
    #[arg(short, long)]
    encoding: Option<String>,

    /// Accept entry pages of any path length
    #[arg(long)]
    any_length: bool,

    /// Print conversion statistics as JSON on stderr
    #[arg(long)]
    stats: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log progress
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn format(&self) -> Format {
        self.format.unwrap_or_else(|| {
            match self.output.as_deref().and_then(Path::extension) {
                Some(ext) if ext.eq_ignore_ascii_case("slob") => Format::Slob,
                _ => Format::Plain,
            }
        })
    }

    fn config(&self) -> ConvertConfig {
        let mode = match self.format() {
            Format::Plain => OutputMode::Plain,
            Format::Slob => OutputMode::Html,
        };
        let mut config = ConvertConfig::new(mode).with_strict(self.strict);
        if let Some(label) = &self.label {
            config = config.with_label(label.clone());
        }
        if let Some(encoding) = &self.encoding {
            config = config.with_encoding(encoding.clone());
        }
        if self.any_length {
            config = config.with_filter(EntryFilter::any_length(EntryFilter::default().suffix));
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(stats) => {
            if cli.stats {
                match serde_json::to_string(&stats) {
                    Ok(json) => eprintln!("{json}"),
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let default = if cli.quiet {
        "error"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<ConvertStats, String> {
    let archive = DirArchive::open(&cli.input).map_err(|e| e.to_string())?;
    let config = cli.config();

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| format!("{}: {e}", path.display()))?,
        )),
        None if cli.format() == Format::Slob => {
            return Err("slob output needs an OUTPUT file".to_string());
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut sink: Box<dyn DictionarySink> = match cli.format() {
        Format::Plain => Box::new(PlainTextSink::new(writer)),
        Format::Slob => {
            let mut slob = SlobConfig::default();
            slob.label = config.label.clone();
            Box::new(SlobWriter::with_config(writer, slob))
        }
    };

    convert(&archive, &mut sink, &config).map_err(|e| e.to_string())
}
