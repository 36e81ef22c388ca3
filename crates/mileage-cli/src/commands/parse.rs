//! Parse command - extract a fill-up from a single transcript.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use mileage_core::models::config::MileageConfig;
use mileage_core::{parser_for, FuelFillUp, ParseStrategy, ParsedFillUp};

use super::config::load_config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Transcript text (reads stdin when neither TEXT nor --input is given)
    text: Option<String>,

    /// Read the transcript from a file
    #[arg(short, long, conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Parser strategy, overriding the configured one (token_scan or regex)
    #[arg(short, long)]
    strategy: Option<ParseStrategy>,

    /// Report unrecognized numbers as zero instead of omitting them
    #[arg(long)]
    zero_default: bool,

    /// Report required fields that were not recognized
    #[arg(long)]
    check: bool,

    /// Odometer reading at the previous fill-up, for fuel consumption in --check
    #[arg(long, requires = "check")]
    since: Option<Decimal>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(strategy) = args.strategy {
        config.extraction.strategy = strategy;
    }

    let transcript = read_transcript(&args)?;
    debug!("Transcript: {:?}", transcript);

    let parser = parser_for(&config.extraction);
    let parsed = parser.parse(&transcript);
    info!("Parsed with {}: {:?}", parser.name(), parsed);

    let output = format_fill_up(&parsed, args.format, args.zero_default)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    if args.check {
        report_completeness(&parsed, &config, args.since);
    }

    Ok(())
}

fn read_transcript(args: &ParseArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.input {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        return Ok(fs::read_to_string(path)?);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Print missing fields, or the derived values when the record is complete.
fn report_completeness(parsed: &ParsedFillUp, config: &MileageConfig, since: Option<Decimal>) {
    let today = chrono::Local::now().date_naive();

    match FuelFillUp::from_parsed(parsed, today, &config.logbook) {
        Ok(fill_up) => {
            eprintln!("{} All required fields recognized", style("✓").green());

            let rate = config.logbook.gst_rate;
            let percent = rate
                .checked_mul(Decimal::ONE_HUNDRED)
                .map(|p| p.normalize().to_string())
                .unwrap_or_else(|| "?".to_string());
            match fill_up.gst(rate) {
                Some(gst) => eprintln!("   GST: {} ({}%)", gst.round_dp(2), percent),
                None => warn!("GST at {}% is out of range for amount {}", percent, fill_up.amount),
            }

            if let Some(price) = fill_up.price_per_liter() {
                eprintln!("   Price per liter: {}", price.round_dp(3));
            }

            if let Some(odometer) = since {
                let previous = FuelFillUp {
                    odometer,
                    ..fill_up.clone()
                };
                match fill_up.consumption_since(&previous) {
                    Some(consumption) => {
                        eprintln!("   Distance: {} km", consumption.distance);
                        eprintln!(
                            "   Consumption: {} L/100 km",
                            consumption.liters_per_100.round_dp(2)
                        );
                    }
                    None => eprintln!(
                        "{} Previous odometer {} is not below {}",
                        style("⚠").yellow(),
                        odometer,
                        fill_up.odometer
                    ),
                }
            }
        }
        Err(_) => {
            let missing = parsed.missing_fields(config.logbook.require_location);
            eprintln!("{} Missing fields:", style("⚠").yellow());
            for field in missing {
                eprintln!("   - {}", field);
            }
        }
    }
}

/// Render a parsed fill-up in the requested format.
pub fn format_fill_up(
    parsed: &ParsedFillUp,
    format: OutputFormat,
    zero_default: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            if zero_default {
                Ok(serde_json::to_string_pretty(&parsed.to_zero_default())?)
            } else {
                Ok(serde_json::to_string_pretty(parsed)?)
            }
        }
        OutputFormat::Csv => format_csv(parsed, zero_default),
        OutputFormat::Text => Ok(format_text(parsed, zero_default)),
    }
}

fn format_csv(parsed: &ParsedFillUp, zero_default: bool) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["volume", "amount", "odometer", "location"])?;
    wtr.write_record([
        &number_cell(parsed.volume, zero_default),
        &number_cell(parsed.amount, zero_default),
        &number_cell(parsed.odometer, zero_default),
        &parsed.location,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(parsed: &ParsedFillUp, zero_default: bool) -> String {
    let show = |value: Option<Decimal>, unit: &str| match value {
        Some(v) => format!("{} {}", v, unit),
        None if zero_default => format!("0 {}", unit),
        None => "-".to_string(),
    };

    let mut output = String::new();
    output.push_str(&format!("Odometer: {}\n", show(parsed.odometer, "km")));
    output.push_str(&format!("Volume:   {}\n", show(parsed.volume, "L")));
    output.push_str(&format!(
        "Amount:   {}\n",
        match parsed.amount {
            Some(v) => format!("${}", v),
            None if zero_default => "$0".to_string(),
            None => "-".to_string(),
        }
    ));
    output.push_str(&format!(
        "Location: {}\n",
        if parsed.location.is_empty() {
            "-"
        } else {
            parsed.location.as_str()
        }
    ));

    output
}

fn number_cell(value: Option<Decimal>, zero_default: bool) -> String {
    match value {
        Some(v) => v.to_string(),
        None if zero_default => "0".to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedFillUp {
        ParsedFillUp {
            volume: Some(Decimal::new(54, 0)),
            amount: None,
            odometer: Some(Decimal::new(154000, 0)),
            location: "Lake Country".to_string(),
        }
    }

    #[test]
    fn test_csv_leaves_missing_cells_empty() {
        let csv = format_fill_up(&sample(), OutputFormat::Csv, false).unwrap();
        assert_eq!(csv, "volume,amount,odometer,location\n54,,154000,Lake Country\n");
    }

    #[test]
    fn test_csv_zero_default() {
        let csv = format_fill_up(&sample(), OutputFormat::Csv, true).unwrap();
        assert!(csv.ends_with("54,0,154000,Lake Country\n"));
    }

    #[test]
    fn test_text_marks_missing_fields() {
        let text = format_fill_up(&ParsedFillUp::default(), OutputFormat::Text, false).unwrap();
        assert!(text.contains("Amount:   -"));
        assert!(text.contains("Location: -"));
    }

    #[test]
    fn test_json_omits_missing_numbers() {
        let json = format_fill_up(&sample(), OutputFormat::Json, false).unwrap();
        assert!(!json.contains("amount"));

        let json = format_fill_up(&sample(), OutputFormat::Json, true).unwrap();
        assert!(json.contains("\"amount\": \"0\""));
    }
}
