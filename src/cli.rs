//! Command-line interface definitions and argument parsing

use chrono::NaiveDateTime;
use clap::Parser;

/// Customer segmentation CLI using quantile-based RFM scoring
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    #[arg(short, long, default_value = "data/purchases.csv")]
    pub input: String,

    /// Output path for the per-customer RFM profile table
    #[arg(short, long, default_value = "rfm_profiles.csv")]
    pub output: String,

    /// Optional path for a JSON run summary
    #[arg(short, long)]
    pub summary: Option<String>,

    /// Reference date for recency (defaults to the latest transaction date)
    /// Example: --reference-date 2024-06-30
    #[arg(short, long)]
    pub reference_date: Option<String>,

    /// Scoring mode: provide R,F,M values as a comma-separated string
    /// Example: --score "30,10,500.0" for Recency=30, Frequency=10, Monetary=500.0
    #[arg(long)]
    pub score: Option<String>,

    /// Number of top categories to report
    #[arg(long, default_value = "10")]
    pub top_n: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse RFM values from the score string
    /// Expected format: "recency,frequency,monetary"
    pub fn parse_score_values(&self) -> crate::Result<Option<(f64, f64, f64)>> {
        if let Some(ref score_str) = self.score {
            let parts: Vec<&str> = score_str.split(',').collect();
            if parts.len() != 3 {
                anyhow::bail!("Score values must be in format 'recency,frequency,monetary'");
            }

            let recency: f64 = parts[0]
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid recency value: {}", parts[0]))?;
            let frequency: f64 = parts[1]
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid frequency value: {}", parts[1]))?;
            let monetary: f64 = parts[2]
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid monetary value: {}", parts[2]))?;

            Ok(Some((recency, frequency, monetary)))
        } else {
            Ok(None)
        }
    }

    /// Parse the reference date override, if given
    pub fn parse_reference_date(&self) -> crate::Result<Option<NaiveDateTime>> {
        match self.reference_date {
            Some(ref raw) => crate::data::parse_transaction_date(raw)
                .map(Some)
                .ok_or_else(|| anyhow::anyhow!("Invalid reference date: {raw}")),
            None => Ok(None),
        }
    }
}
