use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sbci::models::{AppConfig, OutputFormat};
use sbci_format::PaletteTable;
use sbci::services::Converter;

#[derive(Parser)]
#[command(name = "sbci")]
#[command(about = "Convert images to the 16-color sbci format")]
struct Cli {
    /// Image files to convert (PNG, JPEG, GIF, BMP)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Fit images inside a SIZE x SIZE box (0 keeps the source size)
    #[arg(short, long)]
    size: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write ASCII sbci (not implemented)
    #[arg(long)]
    ascii: bool,

    /// Do not write the <name>-quantized.png preview
    #[arg(long)]
    skip_quantized: bool,

    /// Write all 16 palette records, including unused slots
    #[arg(long)]
    full_palette: bool,

    /// Map to the nearest reduced color without dithering
    #[arg(long)]
    no_dither: bool,

    /// Fail instead of mapping colors without a slot to slot 0
    #[arg(long)]
    strict: bool,

    /// YAML config file (defaults to $SBCI_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for output files
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

impl Cli {
    /// Apply command line overrides on top of the loaded config
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.ascii {
            config.ascii = true;
        }
        if self.skip_quantized {
            config.write_quantized = false;
        }
        if self.full_palette {
            config.palette_table = PaletteTable::Full;
        }
        if self.no_dither {
            config.dither = false;
        }
        if self.strict {
            config.strict = true;
        }
        if let Some(dir) = &self.out_dir {
            config.out_dir = Some(dir.clone());
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sbci=info,sbci_format=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("SBCI_CONFIG").ok().map(PathBuf::from));
    let config = cli.apply(AppConfig::load(config_path.as_deref())?);

    tracing::debug!(
        format = ?config.format,
        size = config.size,
        strict = config.strict,
        "Effective configuration"
    );
    if config.format == OutputFormat::Nfp && config.ascii {
        tracing::warn!("--ascii only applies to sbci output, ignoring");
    }

    let converter = Arc::new(Converter::new(config)?);
    let results = converter.convert_all(cli.files).await;

    let mut failed = 0usize;
    for (input, result) in &results {
        match result {
            Ok(report) => {
                println!(
                    "{} -> {} ({}x{}, {} bytes)",
                    input.display(),
                    report.output.display(),
                    report.width,
                    report.height,
                    report.bytes
                );
            }
            Err(e) => {
                failed += 1;
                tracing::error!(input = %input.display(), error = %e, "Conversion failed");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} file(s) failed to convert", results.len());
    }

    Ok(())
}
