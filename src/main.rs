use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use contract_intake::{
    IngestConfig, IngestEnv, SourceFormat, TEMPLATE_FILE_NAME, import, template_csv,
};
use tracing_subscriber::EnvFilter;

/// Bulk contract intake: validate a CSV or JSON upload offline and print the
/// batch report the server would return.
#[derive(Parser)]
#[command(name = "contract-intake", version, about)]
struct Cli {
    /// Ingest configuration (JSON). Defaults apply to any field left out.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process an upload file and print its batch report as JSON.
    ///
    /// Exits non-zero when the file is rejected as a whole (unparseable CSV,
    /// JSON without a non-empty `records` array).
    Import {
        /// CSV or JSON file to process.
        path: PathBuf,

        /// Upload format. Inferred from the file extension when omitted.
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// CSV field delimiter. Overrides the configured one.
        #[arg(long)]
        delimiter: Option<char>,

        /// Pretty-print the report.
        #[arg(long)]
        pretty: bool,
    },

    /// Write the CSV upload template.
    Template {
        /// Destination file. Use `-` for stdout.
        #[arg(long, default_value = TEMPLATE_FILE_NAME)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for SourceFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => SourceFormat::Csv,
            FormatArg::Json => SourceFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Import {
            path,
            format,
            delimiter,
            pretty,
        } => {
            if let Some(delimiter) = delimiter {
                config.delimiter = delimiter;
            }
            config.validate().context("invalid ingest configuration")?;

            let format = match format {
                Some(format) => SourceFormat::from(format),
                None => match SourceFormat::from_path(&path) {
                    Some(format) => format,
                    None => bail!(
                        "cannot infer format of {}; pass --format csv or --format json",
                        path.display()
                    ),
                },
            };

            let bytes =
                fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
            let report = import(&bytes, format, &IngestEnv::system(&config))?;

            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
        Commands::Template { output } => {
            config.validate().context("invalid ingest configuration")?;
            let text = template_csv(config.delimiter_byte()).context("failed to render template")?;
            if output.as_os_str() == "-" {
                io::stdout().lock().write_all(text.as_bytes())?;
            } else {
                fs::write(&output, text)
                    .with_context(|| format!("failed to write {}", output.display()))?;
                eprintln!("wrote {}", output.display());
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<IngestConfig> {
    let Some(path) = path else {
        return Ok(IngestConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))
}
