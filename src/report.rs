//! Export of profiles and run summaries to CSV and JSON

use crate::engine::{ChurnRisk, RfmProfile, Segment};
use crate::metrics::{KeyMetrics, MonthlyTrend};
use anyhow::Context;
use serde::Serialize;
use std::fs::File;

/// Aggregate statistics for one segment
#[derive(Debug, Clone, Serialize)]
pub struct SegmentSummary {
    pub segment: Segment,
    pub customers: usize,
    pub avg_recency: f64,
    pub avg_frequency: f64,
    pub avg_monetary: f64,
}

/// Customer count for one churn-risk label
#[derive(Debug, Clone, Serialize)]
pub struct ChurnCount {
    pub churn_risk: ChurnRisk,
    pub customers: usize,
}

/// Machine-readable summary of one segmentation run
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub metrics: &'a KeyMetrics,
    pub segments: &'a [SegmentSummary],
    pub churn: &'a [ChurnCount],
    pub trends: &'a [MonthlyTrend],
}

/// Write the per-customer RFM profile table as CSV
pub fn write_profiles_csv(path: &str, profiles: &[RfmProfile]) -> crate::Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("failed to create '{path}'"))?;
    for profile in profiles {
        writer.serialize(profile)?;
    }
    writer.flush()?;
    Ok(())
}

/// Summarize profiles per segment; every segment appears even when empty
pub fn summarize_segments(profiles: &[RfmProfile]) -> Vec<SegmentSummary> {
    Segment::ALL
        .iter()
        .map(|&segment| {
            let members: Vec<&RfmProfile> =
                profiles.iter().filter(|p| p.segment == segment).collect();
            let count = members.len();
            let mean = |f: fn(&RfmProfile) -> f64| {
                if count == 0 {
                    0.0
                } else {
                    members.iter().map(|&p| f(p)).sum::<f64>() / count as f64
                }
            };
            SegmentSummary {
                segment,
                customers: count,
                avg_recency: mean(|p| p.recency as f64),
                avg_frequency: mean(|p| p.frequency as f64),
                avg_monetary: mean(|p| p.monetary),
            }
        })
        .collect()
}

/// Count profiles per churn-risk label
pub fn churn_counts(profiles: &[RfmProfile]) -> Vec<ChurnCount> {
    ChurnRisk::ALL
        .iter()
        .map(|&churn_risk| ChurnCount {
            churn_risk,
            customers: profiles.iter().filter(|p| p.churn_risk == churn_risk).count(),
        })
        .collect()
}

/// Write the JSON run summary
pub fn write_summary_json(path: &str, summary: &RunSummary<'_>) -> crate::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create '{path}'"))?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}
