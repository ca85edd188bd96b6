//! RFMForge: Customer segmentation CLI using quantile-based RFM scoring
//!
//! This is the main entrypoint that orchestrates data loading, profile
//! computation, reporting, and hypothetical-customer scoring.

use anyhow::Result;
use clap::Parser;
use rfmforge::{load_transactions, metrics, report, Args, KeyMetrics};
use rfmforge::engine::{segment_customers_as_of, SegmentationModel, QUANTILE_BUCKETS};
use std::time::Instant;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    if args.verbose {
        println!("RFMForge - Customer Segmentation using quantile RFM scoring");
        println!("===========================================================\n");
    }

    // Check if in scoring mode
    if let Some(rfm_values) = args.parse_score_values()? {
        run_scoring_mode(&args, rfm_values)?;
    } else {
        run_full_pipeline(&args)?;
    }

    Ok(())
}

/// Fit the model on the input table, honoring the reference-date override
fn fit_model(args: &Args) -> Result<(SegmentationModel, Vec<rfmforge::Transaction>)> {
    let outcome = load_transactions(&args.input)?;
    if args.verbose && outcome.dropped_rows > 0 {
        println!(
            "  Dropped {} rows with missing customer_id",
            outcome.dropped_rows
        );
    }

    let reference_date = args.parse_reference_date()?;
    let model = segment_customers_as_of(&outcome.transactions, reference_date)?;
    Ok((model, outcome.transactions))
}

/// Run scoring mode for a single hypothetical customer
fn run_scoring_mode(args: &Args, rfm_values: (f64, f64, f64)) -> Result<()> {
    println!("=== Scoring Mode ===");
    println!(
        "Input RFM values: R={}, F={}, M={}",
        rfm_values.0, rfm_values.1, rfm_values.2
    );

    let start_time = Instant::now();

    if args.verbose {
        println!("\nLoading population data from: {}", args.input);
    }
    let (model, _) = fit_model(args)?;

    if args.verbose {
        println!("Fitted score bands over {} customers", model.profiles().len());
    }

    let point = model.score(rfm_values.0, rfm_values.1, rfm_values.2);
    let elapsed = start_time.elapsed();

    println!(
        "\n✓ Scores: R={} F={} M={} (total {})",
        point.r_score, point.f_score, point.m_score, point.total_score
    );
    println!("  Segment: {}", point.segment);
    println!("  Churn risk: {}", point.churn_risk);
    println!("  Processing time: {:.2}s", elapsed.as_secs_f64());

    // Show population context for the assigned segment
    let total_customers = model.profiles().len();
    for (segment, size) in model.segment_sizes() {
        if segment == point.segment {
            let percentage = (size as f64 / total_customers as f64) * 100.0;
            println!(
                "\n{} population: {} customers ({:.1}% of total)",
                segment, size, percentage
            );
        }
    }

    Ok(())
}

/// Run the full segmentation pipeline
fn run_full_pipeline(args: &Args) -> Result<()> {
    println!("=== Full Segmentation Pipeline ===\n");

    let start_time = Instant::now();

    // Step 1: Load and clean data
    if args.verbose {
        println!("Step 1: Loading and cleaning data");
        println!("  Input file: {}", args.input);
    }

    let data_start = Instant::now();
    let (model, transactions) = fit_model(args)?;
    let data_time = data_start.elapsed();

    println!("✓ Data loaded: {} transactions", transactions.len());
    if args.verbose {
        println!("  Processing time: {:.2}s", data_time.as_secs_f64());
        println!("  Reference date: {}", model.reference_date().date());
    }

    // Step 2: Headline metrics
    let metrics = KeyMetrics::compute(&transactions)?;
    println!("\n=== Key Metrics ===");
    println!("Total revenue: ${:.2}", metrics.total_revenue);
    println!("Transactions: {}", metrics.total_transactions);
    println!("Unique customers: {}", metrics.unique_customers);
    println!("Average order value: ${:.2}", metrics.avg_order_value);
    if args.verbose {
        println!("Average items per order: {:.2}", metrics.avg_items_per_order);
        println!(
            "Date range: {} to {}",
            metrics.first_date, metrics.last_date
        );
    }

    // Step 3: Segment statistics
    println!("\n=== Segment Statistics ===");
    let total_customers = model.profiles().len();
    for (segment, size) in model.segment_sizes() {
        let percentage = (size as f64 / total_customers as f64) * 100.0;
        println!("{}: {} customers ({:.1}%)", segment, size, percentage);
    }

    println!("\n=== Churn Risk ===");
    for (risk, size) in model.churn_sizes() {
        let percentage = (size as f64 / total_customers as f64) * 100.0;
        println!("{}: {} customers ({:.1}%)", risk, size, percentage);
    }

    let (r_levels, f_levels, m_levels) = model.realized_levels();
    if args.verbose && (r_levels, f_levels, m_levels) != (QUANTILE_BUCKETS, QUANTILE_BUCKETS, QUANTILE_BUCKETS) {
        println!(
            "\nNote: collapsed score levels (R={}, F={}, M={} of {})",
            r_levels, f_levels, m_levels, QUANTILE_BUCKETS
        );
    }

    // Step 4: Top categories and monthly trends
    let top = metrics::top_categories(&transactions, args.top_n);
    if !top.is_empty() {
        println!("\n=== Top Categories ===");
        for summary in &top {
            println!(
                "{}: ${:.2} across {} orders",
                summary.category, summary.revenue, summary.order_count
            );
        }
    }

    let trends = metrics::monthly_trends(&transactions);
    if args.verbose {
        println!("\n=== Monthly Trends ===");
        for month in &trends {
            println!(
                "{}: ${:.2} revenue, {} orders, {} customers",
                month.year_month, month.revenue, month.order_count, month.unique_customers
            );
        }
    }

    // Step 5: Export
    let export_start = Instant::now();
    report::write_profiles_csv(&args.output, model.profiles())?;
    if let Some(ref summary_path) = args.summary {
        let segments = report::summarize_segments(model.profiles());
        let churn = report::churn_counts(model.profiles());
        report::write_summary_json(
            summary_path,
            &report::RunSummary {
                metrics: &metrics,
                segments: &segments,
                churn: &churn,
                trends: &trends,
            },
        )?;
        println!("\n✓ Summary saved to: {}", summary_path);
    }
    let export_time = export_start.elapsed();

    let total_time = start_time.elapsed();
    println!("\n=== Pipeline Complete ===");
    println!("Profiles saved to: {}", args.output);
    if args.verbose {
        println!("Export time: {:.2}s", export_time.as_secs_f64());
    }
    println!("Total processing time: {:.2}s", total_time.as_secs_f64());

    Ok(())
}
