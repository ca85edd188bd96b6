//! Descriptive business metrics over the transaction table

use crate::data::Transaction;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Headline metrics for the whole dataset
#[derive(Debug, Clone, Serialize)]
pub struct KeyMetrics {
    pub total_revenue: f64,
    pub total_transactions: usize,
    pub unique_customers: usize,
    pub avg_order_value: f64,
    /// Mean of per-order quantity sums; rows without a quantity count as 1
    pub avg_items_per_order: f64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

impl KeyMetrics {
    pub fn compute(transactions: &[Transaction]) -> crate::Result<Self> {
        if transactions.is_empty() {
            anyhow::bail!("cannot compute metrics over an empty transaction table");
        }

        let total_revenue: f64 = transactions.iter().map(|t| t.total_amount).sum();
        let total_transactions = transactions.len();
        let unique_customers = transactions
            .iter()
            .map(|t| t.customer_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let mut order_items: HashMap<&str, f64> = HashMap::new();
        for tx in transactions {
            *order_items.entry(tx.transaction_id.as_str()).or_insert(0.0) +=
                tx.quantity.unwrap_or(1.0);
        }
        let avg_items_per_order =
            order_items.values().sum::<f64>() / order_items.len() as f64;

        let mut first_date = transactions[0].transaction_date.date();
        let mut last_date = first_date;
        for tx in transactions {
            let date = tx.transaction_date.date();
            first_date = first_date.min(date);
            last_date = last_date.max(date);
        }

        Ok(KeyMetrics {
            total_revenue,
            total_transactions,
            unique_customers,
            avg_order_value: total_revenue / total_transactions as f64,
            avg_items_per_order,
            first_date,
            last_date,
        })
    }
}

/// One calendar month of activity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    /// `YYYY-MM`
    pub year_month: String,
    pub revenue: f64,
    pub order_count: usize,
    pub unique_customers: usize,
}

/// Aggregate revenue, order count, and distinct customers per calendar
/// month, in chronological order
pub fn monthly_trends(transactions: &[Transaction]) -> Vec<MonthlyTrend> {
    struct MonthAcc<'a> {
        revenue: f64,
        order_count: usize,
        customers: HashSet<&'a str>,
    }

    let mut months: BTreeMap<String, MonthAcc> = BTreeMap::new();
    for tx in transactions {
        let key = tx.transaction_date.format("%Y-%m").to_string();
        let acc = months.entry(key).or_insert_with(|| MonthAcc {
            revenue: 0.0,
            order_count: 0,
            customers: HashSet::new(),
        });
        acc.revenue += tx.total_amount;
        acc.order_count += 1;
        acc.customers.insert(tx.customer_id.as_str());
    }

    months
        .into_iter()
        .map(|(year_month, acc)| MonthlyTrend {
            year_month,
            revenue: acc.revenue,
            order_count: acc.order_count,
            unique_customers: acc.customers.len(),
        })
        .collect()
}

/// Revenue and volume for one product category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub revenue: f64,
    pub quantity: f64,
    pub order_count: usize,
}

/// Top `n` categories by revenue. Rows without a category are skipped;
/// revenue ties are broken by category name for a stable order.
pub fn top_categories(transactions: &[Transaction], n: usize) -> Vec<CategorySummary> {
    let mut categories: HashMap<&str, CategorySummary> = HashMap::new();
    for tx in transactions {
        let Some(category) = tx.category.as_deref() else {
            continue;
        };
        let entry = categories
            .entry(category)
            .or_insert_with(|| CategorySummary {
                category: category.to_string(),
                revenue: 0.0,
                quantity: 0.0,
                order_count: 0,
            });
        entry.revenue += tx.total_amount;
        entry.quantity += tx.quantity.unwrap_or(1.0);
        entry.order_count += 1;
    }

    let mut ranked: Vec<CategorySummary> = categories.into_values().collect();
    ranked.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
    ranked.truncate(n);
    ranked
}
