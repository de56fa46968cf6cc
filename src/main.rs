use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use xlsx_multiheader::{convert, ConvertOptions, Layout, Translator};

const USAGE: &str = "Usage: convert <input.xlsx> <output.xlsx>";

/// Convert a fixed-layout report workbook into a two-sheet workbook with a
/// translated two-level header and a description sheet.
#[derive(Parser)]
#[command(name = "convert", version)]
struct Args {
    /// Source workbook.
    input: PathBuf,

    /// Workbook to write.
    output: PathBuf,

    /// JSON object of extra `"source": "target"` label translations.
    #[arg(long, value_name = "PATH")]
    translations: Option<PathBuf>,

    /// Zero-based row holding the level-1 header labels.
    #[arg(long, default_value_t = Layout::default().header_row_1)]
    header_row_1: usize,

    /// Zero-based row holding the level-2 header labels.
    #[arg(long, default_value_t = Layout::default().header_row_2)]
    header_row_2: usize,

    /// Zero-based row where the data region starts.
    #[arg(long, default_value_t = Layout::default().data_start_row)]
    data_start_row: usize,

    /// Number of preamble rows read into the description sheet.
    #[arg(long = "preamble-rows", default_value_t = Layout::default().preamble_row_count)]
    preamble_row_count: usize,
}

impl Args {
    fn options(&self) -> Result<ConvertOptions> {
        let translator = match &self.translations {
            Some(path) => Translator::from_json_file(path).context("Failed to load translations")?,
            None => Translator::builtin(),
        };
        let layout = Layout {
            header_row_1: self.header_row_1,
            header_row_2: self.header_row_2,
            data_start_row: self.data_start_row,
            preamble_row_count: self.preamble_row_count,
        };
        Ok(ConvertOptions { layout, translator })
    }
}

fn main() -> Result<ExitCode> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => error.exit(),
        Err(error) if error.kind() == ErrorKind::MissingRequiredArgument => {
            eprintln!("{USAGE}");
            return Ok(ExitCode::from(1));
        }
        Err(error) => error.exit(),
    };

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let options = args.options()?;
    let summary = convert(&args.input, &args.output, &options)
        .with_context(|| format!("Failed to convert '{}'", args.input.display()))?;
    info!(?summary, "conversion finished");

    println!("Saved -> {}", args.output.display());
    Ok(ExitCode::SUCCESS)
}
