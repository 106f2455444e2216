use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::{fmt, EnvFilter};
use trendlens_core::TrendDetector;
use trendlens_detectors::{
    CoupleRsiConfig, CoupleRsiTrendDetector, HmaTrendConfig, HmaTrendDetector, RsiTrendDetector,
};

#[derive(Parser)]
#[command(name = "trendlens")]
#[command(about = "Price trend detection — triple-HMA and TradingView-compatible RSI classifiers")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DetectorKind {
    Hma,
    Rsi,
    Couple,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Server {
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0:3000")]
        bind: String,
    },

    /// Classify the trend of a close series loaded from CSV
    Analyze {
        /// Path to a CSV file; closes are read from the first column
        #[arg(short, long)]
        data: PathBuf,

        /// Which detector to run
        #[arg(long, value_enum, default_value_t = DetectorKind::Hma)]
        detector: DetectorKind,

        /// Fastest HMA period
        #[arg(long, default_value = "5")]
        fastest_period: usize,

        /// Fast HMA period
        #[arg(long, default_value = "10")]
        fast_period: usize,

        /// Slow HMA period
        #[arg(long, default_value = "20")]
        slow_period: usize,

        /// RSI period (small timeframe for the couple detector)
        #[arg(long, default_value = "14")]
        rsi_period: usize,

        /// Big-timeframe RSI period (couple detector only)
        #[arg(long, default_value = "14")]
        rsi_big_period: usize,

        /// Big-timeframe close series (couple detector only)
        #[arg(long)]
        big_data: Option<PathBuf>,
    },

    /// List available detectors
    Detectors,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Server { bind } => {
            trendlens_api::start_server(&bind).await?;
        }
        Commands::Analyze {
            data,
            detector,
            fastest_period,
            fast_period,
            slow_period,
            rsi_period,
            rsi_big_period,
            big_data,
        } => {
            run_analyze(
                &data,
                detector,
                fastest_period,
                fast_period,
                slow_period,
                rsi_period,
                rsi_big_period,
                big_data.as_deref(),
            )?;
        }
        Commands::Detectors => {
            println!("Available detectors:");
            println!("  hma    - Triple Hull Moving Average comparison (fastest/fast/slow)");
            println!("  rsi    - Single RSI threshold at 50 (TradingView-compatible RSI)");
            println!("  couple - Two RSI detectors on different timeframes, combined");
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_analyze(
    data: &Path,
    detector: DetectorKind,
    fastest_period: usize,
    fast_period: usize,
    slow_period: usize,
    rsi_period: usize,
    rsi_big_period: usize,
    big_data: Option<&Path>,
) -> Result<()> {
    let closes = load_closes_from_csv(data)?;
    tracing::info!(closes = closes.len(), "Loaded close series");
    if closes.is_empty() {
        anyhow::bail!("No closes loaded from CSV file");
    }

    match detector {
        DetectorKind::Hma => {
            let mut det = HmaTrendDetector::new(HmaTrendConfig {
                fastest_period,
                fast_period,
                slow_period,
            })?;
            if closes.len() < det.required_period() {
                tracing::warn!(
                    required = det.required_period(),
                    supplied = closes.len(),
                    "series shorter than the recommended warm-up length"
                );
            }
            det.initialize(&closes);
            println!("trend:   {}", det.current_trend());
            println!("fastest: {}", fmt_value(det.fastest_value()));
            println!("fast:    {}", fmt_value(det.fast_value()));
            println!("slow:    {}", fmt_value(det.slow_value()));
        }
        DetectorKind::Rsi => {
            let mut det = RsiTrendDetector::new(rsi_period)?;
            if closes.len() < det.required_period() {
                tracing::warn!(
                    required = det.required_period(),
                    supplied = closes.len(),
                    "series shorter than the recommended warm-up length"
                );
            }
            det.initialize(&closes);
            println!("trend: {}", det.current_trend());
            println!("rsi:   {}", fmt_value(det.current_rsi()));
        }
        DetectorKind::Couple => {
            let big_path = big_data
                .ok_or_else(|| anyhow::anyhow!("--big-data is required for the couple detector"))?;
            let big_closes = load_closes_from_csv(big_path)?;

            let mut det = CoupleRsiTrendDetector::new(CoupleRsiConfig {
                small_tf_period: rsi_period,
                big_tf_period: rsi_big_period,
            })?;
            det.small_tf.initialize(&closes);
            det.big_tf.initialize(&big_closes);
            det.recompute();
            println!("trend:        {}", det.current_trend());
            println!("small trend:  {}", det.small_tf.current_trend());
            println!("small rsi:    {}", fmt_value(det.small_tf.current_rsi()));
            println!("big trend:    {}", det.big_tf.current_trend());
            println!("big rsi:      {}", fmt_value(det.big_tf.current_rsi()));
        }
    }

    Ok(())
}

fn fmt_value(value: Option<Decimal>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

/// Load a close series from the first column of a CSV file.
///
/// A header row is skipped automatically when its first field does not parse
/// as a number.
fn load_closes_from_csv(path: &Path) -> Result<Vec<Decimal>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| anyhow::anyhow!("Failed to open CSV {}: {}", path.display(), e))?;

    let mut closes = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| anyhow::anyhow!("CSV record error: {}", e))?;
        let field = record
            .get(0)
            .ok_or_else(|| anyhow::anyhow!("Empty CSV record at line {}", index + 1))?;

        match Decimal::from_str(field) {
            Ok(close) => closes.push(close),
            Err(e) if index == 0 => {
                tracing::debug!(header = field, "skipping non-numeric header row: {}", e);
            }
            Err(e) => {
                anyhow::bail!("Invalid close '{}' at line {}: {}", field, index + 1, e);
            }
        }
    }

    Ok(closes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_closes_plain_column() {
        let file = write_csv("10.5\n11\n12.25\n");
        let closes = load_closes_from_csv(file.path()).unwrap();
        assert_eq!(closes.len(), 3);
        assert_eq!(closes[0], Decimal::from_str("10.5").unwrap());
    }

    #[test]
    fn test_load_closes_skips_header_row() {
        let file = write_csv("close\n10.5\n11\n");
        let closes = load_closes_from_csv(file.path()).unwrap();
        assert_eq!(closes.len(), 2);
    }

    #[test]
    fn test_load_closes_rejects_bad_value_mid_file() {
        let file = write_csv("10.5\nnot-a-number\n");
        assert!(load_closes_from_csv(file.path()).is_err());
    }
}
