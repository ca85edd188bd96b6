//! Quantile-based RFM scoring and segmentation

use crate::data::Transaction;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Target number of equal-population buckets per metric
pub const QUANTILE_BUCKETS: usize = 5;

/// Errors raised by the segmentation engine
#[derive(Debug, Error)]
pub enum SegmentationError {
    #[error("no transactions to segment")]
    EmptyInput,
    #[error("transaction {transaction_id}: {reason}")]
    InvalidField {
        transaction_id: String,
        reason: String,
    },
}

/// Customer segment derived from the combined RFM score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Segment {
    #[serde(rename = "Champions")]
    Champions,
    #[serde(rename = "Loyal Customers")]
    LoyalCustomers,
    #[serde(rename = "Potential Loyalists")]
    PotentialLoyalists,
    #[serde(rename = "At Risk")]
    AtRisk,
    #[serde(rename = "Lost Customers")]
    LostCustomers,
}

impl Segment {
    /// All segments, ordered best to worst
    pub const ALL: [Segment; 5] = [
        Segment::Champions,
        Segment::LoyalCustomers,
        Segment::PotentialLoyalists,
        Segment::AtRisk,
        Segment::LostCustomers,
    ];

    /// Map a combined RFM score (3-15) to a segment
    pub fn from_total_score(total: u8) -> Self {
        match total {
            13..=u8::MAX => Segment::Champions,
            10..=12 => Segment::LoyalCustomers,
            7..=9 => Segment::PotentialLoyalists,
            5..=6 => Segment::AtRisk,
            _ => Segment::LostCustomers,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Champions => "Champions",
            Segment::LoyalCustomers => "Loyal Customers",
            Segment::PotentialLoyalists => "Potential Loyalists",
            Segment::AtRisk => "At Risk",
            Segment::LostCustomers => "Lost Customers",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Churn-risk label derived from the recency score alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChurnRisk {
    Low,
    Medium,
    High,
}

impl ChurnRisk {
    pub const ALL: [ChurnRisk; 3] = [ChurnRisk::Low, ChurnRisk::Medium, ChurnRisk::High];

    /// r_score <= 2 is High, == 3 is Medium, >= 4 is Low
    pub fn from_r_score(r_score: u8) -> Self {
        match r_score {
            0..=2 => ChurnRisk::High,
            3 => ChurnRisk::Medium,
            _ => ChurnRisk::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChurnRisk::Low => "Low",
            ChurnRisk::Medium => "Medium",
            ChurnRisk::High => "High",
        }
    }
}

impl std::fmt::Display for ChurnRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-customer RFM profile with quantile scores and derived labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmProfile {
    pub customer_id: String,
    /// Days between the reference date and this customer's last purchase
    pub recency: i64,
    /// Number of transactions for this customer
    pub frequency: u64,
    /// Total spend across this customer's transactions
    pub monetary: f64,
    pub r_score: u8,
    pub f_score: u8,
    pub m_score: u8,
    pub total_score: u8,
    pub segment: Segment,
    pub churn_risk: ChurnRisk,
}

/// Scores for a hypothetical customer evaluated against a fitted model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPoint {
    pub r_score: u8,
    pub f_score: u8,
    pub m_score: u8,
    pub total_score: u8,
    pub segment: Segment,
    pub churn_risk: ChurnRisk,
}

/// Quantile bucket boundaries for one metric, fitted on the full population.
///
/// `edges` is strictly increasing with `len() == buckets + 1`; duplicate
/// quantile edges are merged at fit time, so a metric with too few distinct
/// values realizes fewer than [`QUANTILE_BUCKETS`] score levels.
#[derive(Debug, Clone)]
pub struct ScoreBand {
    edges: Vec<f64>,
    descending: bool,
}

impl ScoreBand {
    /// Fit bucket edges on the population values for one metric
    fn fit(values: &[f64], descending: bool) -> Self {
        ScoreBand {
            edges: quantile_edges(values, QUANTILE_BUCKETS),
            descending,
        }
    }

    fn from_edges(edges: Vec<f64>, descending: bool) -> Self {
        ScoreBand { edges, descending }
    }

    /// Number of realized score levels (1 when the distribution collapsed)
    pub fn levels(&self) -> usize {
        self.edges.len().saturating_sub(1).max(1)
    }

    /// Score a value: ascending bands map the lowest bucket to 1, descending
    /// bands map the lowest bucket to the highest realized level.
    pub fn score(&self, value: f64) -> u8 {
        let levels = self.levels();
        let bucket = bucket_of(&self.edges, value);
        if self.descending {
            (levels - bucket) as u8
        } else {
            (bucket + 1) as u8
        }
    }
}

/// Compute quantile bucket edges with linear interpolation, merging duplicates.
///
/// Edges are taken at i/buckets for i in 0..=buckets over the sorted values,
/// the same convention pandas-style equal-population binning uses.
fn quantile_edges(values: &[f64], buckets: usize) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut edges = Vec::with_capacity(buckets + 1);
    for i in 0..=buckets {
        let q = i as f64 / buckets as f64;
        let edge = interpolated_quantile(&sorted, q);
        if edges.last().map_or(true, |&last| edge > last) {
            edges.push(edge);
        }
    }
    edges
}

/// Linear-interpolation quantile of a sorted, non-empty slice
fn interpolated_quantile(sorted: &[f64], q: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Locate the right-closed bucket for a value; the first bucket also covers
/// the minimum, and values beyond the last edge clamp into the last bucket.
fn bucket_of(edges: &[f64], value: f64) -> usize {
    if edges.len() < 3 {
        return 0;
    }
    edges[1..edges.len() - 1]
        .iter()
        .filter(|&&upper| value > upper)
        .count()
}

/// Fitted segmentation model: the per-customer profiles plus the population
/// score bands, which allow scoring hypothetical customers after the fact
#[derive(Debug)]
pub struct SegmentationModel {
    profiles: Vec<RfmProfile>,
    reference_date: NaiveDateTime,
    recency_band: ScoreBand,
    frequency_band: ScoreBand,
    monetary_band: ScoreBand,
}

impl SegmentationModel {
    /// Per-customer profiles, ordered by customer_id
    pub fn profiles(&self) -> &[RfmProfile] {
        &self.profiles
    }

    /// The date recency was measured against
    pub fn reference_date(&self) -> NaiveDateTime {
        self.reference_date
    }

    /// Customer counts per segment, in `Segment::ALL` order
    pub fn segment_sizes(&self) -> Vec<(Segment, usize)> {
        Segment::ALL
            .iter()
            .map(|&seg| {
                let count = self.profiles.iter().filter(|p| p.segment == seg).count();
                (seg, count)
            })
            .collect()
    }

    /// Customer counts per churn-risk label, in `ChurnRisk::ALL` order
    pub fn churn_sizes(&self) -> Vec<(ChurnRisk, usize)> {
        ChurnRisk::ALL
            .iter()
            .map(|&risk| {
                let count = self.profiles.iter().filter(|p| p.churn_risk == risk).count();
                (risk, count)
            })
            .collect()
    }

    /// Realized score levels per metric as (recency, frequency, monetary).
    /// A value below 5 means that metric's distribution collapsed buckets.
    pub fn realized_levels(&self) -> (usize, usize, usize) {
        (
            self.recency_band.levels(),
            self.frequency_band.levels(),
            self.monetary_band.levels(),
        )
    }

    /// Score a hypothetical customer against the fitted population bands.
    ///
    /// Frequency is scored on value-domain band edges derived from the
    /// fitted rank buckets, so heavily tied populations give coarser
    /// frequency resolution here than the rank-based fit itself.
    pub fn score(&self, recency: f64, frequency: f64, monetary: f64) -> ScoredPoint {
        let r_score = self.recency_band.score(recency);
        let f_score = self.frequency_band.score(frequency);
        let m_score = self.monetary_band.score(monetary);
        let total_score = r_score + f_score + m_score;
        ScoredPoint {
            r_score,
            f_score,
            m_score,
            total_score,
            segment: Segment::from_total_score(total_score),
            churn_risk: ChurnRisk::from_r_score(r_score),
        }
    }
}

struct CustomerGroup {
    last_purchase: NaiveDateTime,
    frequency: u64,
    monetary: f64,
}

/// Segment all customers in a transaction table.
///
/// Recency is measured against the latest transaction date in the input.
/// The computation is pure: it is recomputed from scratch on every call and
/// two calls over the same input produce identical profiles.
pub fn segment_customers(
    transactions: &[Transaction],
) -> Result<SegmentationModel, SegmentationError> {
    segment_customers_as_of(transactions, None)
}

/// Segment all customers, optionally overriding the recency reference date.
///
/// When `reference_date` is earlier than the latest transaction, recency for
/// customers purchasing after it clamps to zero rather than going negative.
pub fn segment_customers_as_of(
    transactions: &[Transaction],
    reference_date: Option<NaiveDateTime>,
) -> Result<SegmentationModel, SegmentationError> {
    for tx in transactions {
        if tx.customer_id.trim().is_empty() {
            return Err(SegmentationError::InvalidField {
                transaction_id: tx.transaction_id.clone(),
                reason: "empty customer_id".to_string(),
            });
        }
        if !tx.total_amount.is_finite() {
            return Err(SegmentationError::InvalidField {
                transaction_id: tx.transaction_id.clone(),
                reason: format!("non-finite total_amount {}", tx.total_amount),
            });
        }
    }

    let max_date = match transactions.iter().map(|tx| tx.transaction_date).max() {
        Some(date) => date,
        None => return Err(SegmentationError::EmptyInput),
    };
    let reference_date = reference_date.unwrap_or(max_date);

    // BTreeMap keeps customers in customer_id order, which is also the
    // stable order used to break frequency ties.
    let mut groups: BTreeMap<&str, CustomerGroup> = BTreeMap::new();
    for tx in transactions {
        groups
            .entry(tx.customer_id.as_str())
            .and_modify(|g| {
                g.last_purchase = g.last_purchase.max(tx.transaction_date);
                g.frequency += 1;
                g.monetary += tx.total_amount;
            })
            .or_insert(CustomerGroup {
                last_purchase: tx.transaction_date,
                frequency: 1,
                monetary: tx.total_amount,
            });
    }

    let customer_ids: Vec<&str> = groups.keys().copied().collect();
    let recency: Vec<i64> = groups
        .values()
        .map(|g| (reference_date - g.last_purchase).num_days().max(0))
        .collect();
    let frequency: Vec<u64> = groups.values().map(|g| g.frequency).collect();
    let monetary: Vec<f64> = groups.values().map(|g| g.monetary).collect();
    let n = customer_ids.len();

    let recency_f: Vec<f64> = recency.iter().map(|&r| r as f64).collect();
    let recency_band = ScoreBand::fit(&recency_f, true);
    let r_scores: Vec<u8> = recency_f.iter().map(|&r| recency_band.score(r)).collect();

    // Frequency ties are broken by ranking customers on (frequency,
    // customer_id) and bucketing the distinct ranks, so equal-population
    // boundaries stay well-defined under heavy ties.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| frequency[a].cmp(&frequency[b]).then(a.cmp(&b)));
    let mut rank = vec![0.0; n];
    for (pos, &idx) in order.iter().enumerate() {
        rank[idx] = (pos + 1) as f64;
    }
    let rank_band = ScoreBand::fit(&rank, false);
    let f_scores: Vec<u8> = rank.iter().map(|&r| rank_band.score(r)).collect();

    let monetary_band = ScoreBand::fit(&monetary, false);
    let m_scores: Vec<u8> = monetary.iter().map(|&m| monetary_band.score(m)).collect();

    let frequency_band = frequency_value_band(&frequency, &f_scores, rank_band.levels());

    let mut profiles = Vec::with_capacity(n);
    for i in 0..n {
        let total_score = r_scores[i] + f_scores[i] + m_scores[i];
        profiles.push(RfmProfile {
            customer_id: customer_ids[i].to_string(),
            recency: recency[i],
            frequency: frequency[i],
            monetary: monetary[i],
            r_score: r_scores[i],
            f_score: f_scores[i],
            m_score: m_scores[i],
            total_score,
            segment: Segment::from_total_score(total_score),
            churn_risk: ChurnRisk::from_r_score(r_scores[i]),
        });
    }

    Ok(SegmentationModel {
        profiles,
        reference_date,
        recency_band,
        frequency_band,
        monetary_band,
    })
}

/// Derive value-domain frequency band edges from the fitted rank buckets:
/// each bucket's upper edge is the largest frequency assigned to it. Adjacent
/// buckets sharing an edge merge, matching the duplicate-edge policy.
fn frequency_value_band(frequency: &[u64], f_scores: &[u8], levels: usize) -> ScoreBand {
    let mut upper = vec![f64::NEG_INFINITY; levels];
    let mut min_frequency = f64::INFINITY;
    for (i, &f) in frequency.iter().enumerate() {
        let bucket = (f_scores[i] - 1) as usize;
        upper[bucket] = upper[bucket].max(f as f64);
        min_frequency = min_frequency.min(f as f64);
    }

    let mut edges = vec![min_frequency];
    for bound in upper {
        if bound.is_finite() && edges.last().map_or(true, |&last| bound > last) {
            edges.push(bound);
        }
    }
    ScoreBand::from_edges(edges, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn tx(id: &str, customer: &str, when: NaiveDateTime, amount: f64) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            customer_id: customer.to_string(),
            transaction_date: when,
            total_amount: amount,
            quantity: Some(1.0),
            category: None,
        }
    }

    /// 5 customers with monetary [10,20,30,40,50] and equal recency and
    /// frequency: m_scores must be exactly 1..5 in ascending monetary order.
    #[test]
    fn test_monetary_quantiles_strictly_increasing() {
        let when = date(2024, 6, 1);
        let transactions: Vec<Transaction> = (1..=5)
            .map(|i| tx(&format!("t{i}"), &format!("c{i}"), when, (i * 10) as f64))
            .collect();

        let model = segment_customers(&transactions).unwrap();
        let m_scores: Vec<u8> = model.profiles().iter().map(|p| p.m_score).collect();
        assert_eq!(m_scores, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_score_ranges_and_segment_partition() {
        let mut transactions = Vec::new();
        for i in 0..12u32 {
            let customer = format!("c{i:02}");
            for j in 0..=(i % 4) {
                transactions.push(tx(
                    &format!("t{i}-{j}"),
                    &customer,
                    date(2024, 1 + (i % 6), 1 + j),
                    10.0 + (i as f64) * 17.5 + j as f64,
                ));
            }
        }

        let model = segment_customers(&transactions).unwrap();
        assert_eq!(model.profiles().len(), 12);

        for p in model.profiles() {
            assert!((1..=5).contains(&p.r_score), "r_score out of range: {p:?}");
            assert!((1..=5).contains(&p.f_score), "f_score out of range: {p:?}");
            assert!((1..=5).contains(&p.m_score), "m_score out of range: {p:?}");
            assert!((3..=15).contains(&p.total_score));
            assert_eq!(p.total_score, p.r_score + p.f_score + p.m_score);
            assert!(p.recency >= 0);
            assert!(p.frequency >= 1);
        }

        let segment_total: usize = model.segment_sizes().iter().map(|(_, n)| n).sum();
        assert_eq!(segment_total, 12);
        let churn_total: usize = model.churn_sizes().iter().map(|(_, n)| n).sum();
        assert_eq!(churn_total, 12);
    }

    /// Moving one customer's last purchase closer to the reference date,
    /// holding everything else fixed, never lowers their r_score.
    #[test]
    fn test_recency_monotonicity() {
        let anchor = date(2024, 6, 30);
        let base: Vec<Transaction> = vec![
            tx("a1", "anchor", anchor, 100.0),
            tx("b1", "other1", date(2024, 6, 1), 100.0),
            tx("b2", "other2", date(2024, 4, 15), 100.0),
            tx("b3", "other3", date(2024, 2, 1), 100.0),
            tx("m1", "mover", date(2024, 1, 10), 100.0),
        ];
        let before = segment_customers(&base).unwrap();
        let r_before = before
            .profiles()
            .iter()
            .find(|p| p.customer_id == "mover")
            .unwrap()
            .r_score;

        let mut moved = base.clone();
        moved[4] = tx("m1", "mover", date(2024, 6, 25), 100.0);
        let after = segment_customers(&moved).unwrap();
        let r_after = after
            .profiles()
            .iter()
            .find(|p| p.customer_id == "mover")
            .unwrap()
            .r_score;

        assert!(r_after >= r_before, "r {r_before} -> {r_after}");
    }

    #[test]
    fn test_idempotence() {
        let transactions = vec![
            tx("t1", "c1", date(2024, 3, 1), 25.0),
            tx("t2", "c1", date(2024, 5, 20), 75.0),
            tx("t3", "c2", date(2024, 2, 11), 300.0),
            tx("t4", "c3", date(2024, 6, 2), 12.5),
            tx("t5", "c4", date(2023, 12, 24), 48.0),
            tx("t6", "c5", date(2024, 4, 4), 99.0),
        ];

        let first = segment_customers(&transactions).unwrap();
        let second = segment_customers(&transactions).unwrap();
        assert_eq!(first.profiles(), second.profiles());
    }

    /// One distinct monetary value: the bucket collapses and every customer
    /// lands on the same m_score.
    #[test]
    fn test_degenerate_monetary_collapses() {
        let transactions: Vec<Transaction> = (1..=6)
            .map(|i| {
                tx(
                    &format!("t{i}"),
                    &format!("c{i}"),
                    date(2024, 1, i),
                    42.0,
                )
            })
            .collect();

        let model = segment_customers(&transactions).unwrap();
        let (_, _, m_levels) = model.realized_levels();
        assert_eq!(m_levels, 1);
        assert!(model.profiles().iter().all(|p| p.m_score == 1));
    }

    #[test]
    fn test_single_transaction_customer() {
        let transactions = vec![
            tx("t1", "late", date(2024, 6, 10), 50.0),
            tx("t2", "early", date(2024, 1, 5), 50.0),
        ];

        let model = segment_customers(&transactions).unwrap();
        let late = model
            .profiles()
            .iter()
            .find(|p| p.customer_id == "late")
            .unwrap();
        assert_eq!(late.recency, 0); // their purchase is the global max date
        assert_eq!(late.frequency, 1);

        let early = model
            .profiles()
            .iter()
            .find(|p| p.customer_id == "early")
            .unwrap();
        assert_eq!(early.recency, 157);
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let result = segment_customers(&[]);
        assert!(matches!(result, Err(SegmentationError::EmptyInput)));
    }

    #[test]
    fn test_invalid_fields_are_fatal() {
        let blank_customer = vec![tx("t1", "  ", date(2024, 1, 1), 10.0)];
        assert!(matches!(
            segment_customers(&blank_customer),
            Err(SegmentationError::InvalidField { .. })
        ));

        let nan_amount = vec![tx("t1", "c1", date(2024, 1, 1), f64::NAN)];
        assert!(matches!(
            segment_customers(&nan_amount),
            Err(SegmentationError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_segment_thresholds() {
        assert_eq!(Segment::from_total_score(15), Segment::Champions);
        assert_eq!(Segment::from_total_score(13), Segment::Champions);
        assert_eq!(Segment::from_total_score(12), Segment::LoyalCustomers);
        assert_eq!(Segment::from_total_score(10), Segment::LoyalCustomers);
        assert_eq!(Segment::from_total_score(9), Segment::PotentialLoyalists);
        assert_eq!(Segment::from_total_score(7), Segment::PotentialLoyalists);
        assert_eq!(Segment::from_total_score(6), Segment::AtRisk);
        assert_eq!(Segment::from_total_score(5), Segment::AtRisk);
        assert_eq!(Segment::from_total_score(4), Segment::LostCustomers);
        assert_eq!(Segment::from_total_score(3), Segment::LostCustomers);
    }

    #[test]
    fn test_churn_risk_thresholds() {
        assert_eq!(ChurnRisk::from_r_score(1), ChurnRisk::High);
        assert_eq!(ChurnRisk::from_r_score(2), ChurnRisk::High);
        assert_eq!(ChurnRisk::from_r_score(3), ChurnRisk::Medium);
        assert_eq!(ChurnRisk::from_r_score(4), ChurnRisk::Low);
        assert_eq!(ChurnRisk::from_r_score(5), ChurnRisk::Low);
    }

    #[test]
    fn test_quantile_edges_collapse_duplicates() {
        let flat = vec![7.0; 10];
        let edges = quantile_edges(&flat, QUANTILE_BUCKETS);
        assert_eq!(edges, vec![7.0]);

        let spread = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let edges = quantile_edges(&spread, QUANTILE_BUCKETS);
        assert_eq!(edges.len(), 6);
        assert!(edges.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_bucket_of_right_closed() {
        let edges = vec![10.0, 18.0, 26.0, 34.0, 42.0, 50.0];
        assert_eq!(bucket_of(&edges, 10.0), 0); // minimum lands in the first bucket
        assert_eq!(bucket_of(&edges, 18.0), 0); // upper edges are inclusive
        assert_eq!(bucket_of(&edges, 18.1), 1);
        assert_eq!(bucket_of(&edges, 50.0), 4);
        assert_eq!(bucket_of(&edges, 99.0), 4); // clamps beyond the last edge
    }

    #[test]
    fn test_score_hypothetical_customer() {
        let transactions: Vec<Transaction> = (1..=10)
            .map(|i| {
                tx(
                    &format!("t{i}"),
                    &format!("c{i:02}"),
                    date(2024, 1 + (i % 6) as u32, 1 + i as u32),
                    (i * 25) as f64,
                )
            })
            .collect();

        let model = segment_customers(&transactions).unwrap();
        let point = model.score(0.0, 100.0, 10_000.0);
        assert_eq!(point.r_score, model.realized_levels().0 as u8);
        assert_eq!(point.m_score, model.realized_levels().2 as u8);
        assert_eq!(
            point.total_score,
            point.r_score + point.f_score + point.m_score
        );

        let worst = model.score(10_000.0, 0.0, 0.0);
        assert_eq!(worst.r_score, 1);
        assert_eq!(worst.f_score, 1);
        assert_eq!(worst.m_score, 1);
        assert_eq!(worst.segment, Segment::LostCustomers);
        assert_eq!(worst.churn_risk, ChurnRisk::High);
    }

    #[test]
    fn test_reference_date_override() {
        let transactions = vec![
            tx("t1", "c1", date(2024, 1, 1), 10.0),
            tx("t2", "c2", date(2024, 1, 11), 10.0),
        ];

        let reference = Some(date(2024, 1, 31));
        let model = segment_customers_as_of(&transactions, reference).unwrap();
        let recencies: Vec<i64> = model.profiles().iter().map(|p| p.recency).collect();
        assert_eq!(recencies, vec![30, 20]);

        // A reference before the data clamps recency at zero
        let stale = Some(date(2023, 1, 1));
        let model = segment_customers_as_of(&transactions, stale).unwrap();
        assert!(model.profiles().iter().all(|p| p.recency == 0));
    }
}
