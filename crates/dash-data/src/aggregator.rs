//! Grouped-sum aggregation and KPI computation over cleaned transactions.

use std::collections::BTreeMap;

use dash_core::formatting::percentage;
use dash_core::models::{KpiSet, Transaction};
use dash_core::quarter::compare_labels;

// ── GroupSum ──────────────────────────────────────────────────────────────────

/// One aggregation row: a distinct key and its summed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSum {
    pub key: String,
    pub total: f64,
}

/// One two-key aggregation row (e.g. region × quarter).
#[derive(Debug, Clone, PartialEq)]
pub struct PairSum {
    pub key_a: String,
    pub key_b: String,
    pub total: f64,
}

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups transactions by categorical keys.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Sum the amount per distinct key, largest total first.
    pub fn sum_by(
        transactions: &[Transaction],
        key_fn: impl Fn(&Transaction) -> String,
    ) -> Vec<GroupSum> {
        let mut rows = Self::grouped_sums(transactions, key_fn);
        rows.sort_by(|a, b| b.total.total_cmp(&a.total));
        rows
    }

    /// Sum per key, keep the `n` largest, reported ascending so a horizontal
    /// bar chart shows the leader on top.
    pub fn top_n(
        transactions: &[Transaction],
        key_fn: impl Fn(&Transaction) -> String,
        n: usize,
    ) -> Vec<GroupSum> {
        let mut rows = Self::sum_by(transactions, key_fn);
        rows.truncate(n);
        rows.reverse();
        rows
    }

    /// Sum per observed key pair. Absent combinations are simply not
    /// emitted; there is no cross-product fill.
    pub fn sum_by_pair(
        transactions: &[Transaction],
        key_a: impl Fn(&Transaction) -> String,
        key_b: impl Fn(&Transaction) -> String,
    ) -> Vec<PairSum> {
        let mut map: BTreeMap<(String, String), f64> = BTreeMap::new();
        for tx in transactions {
            *map.entry((key_a(tx), key_b(tx))).or_default() += tx.amount;
        }
        map.into_iter()
            .map(|((a, b), total)| PairSum {
                key_a: a,
                key_b: b,
                total,
            })
            .collect()
    }

    /// Monthly revenue evolution, keyed `"%Y-%m"`, ascending by month.
    ///
    /// Calendar months inside the observed range with no sales are emitted
    /// with a zero total, so the evolution line shows the dip instead of
    /// skipping the month.
    pub fn sum_by_month(transactions: &[Transaction]) -> Vec<GroupSum> {
        // BTreeMap keeps the month keys sorted.
        let mut map: BTreeMap<String, f64> = BTreeMap::new();
        for tx in transactions {
            *map.entry(tx.month_key()).or_default() += tx.amount;
        }

        let (Some(first), Some(last)) = (
            map.keys().next().cloned(),
            map.keys().next_back().cloned(),
        ) else {
            return Vec::new();
        };

        let mut rows = Vec::new();
        let mut key = first;
        loop {
            let total = map.get(&key).copied().unwrap_or(0.0);
            rows.push(GroupSum {
                key: key.clone(),
                total,
            });
            if key == last {
                break;
            }
            match next_month_key(&key) {
                Some(next) => key = next,
                None => break,
            }
        }
        rows
    }

    /// Revenue per fiscal quarter, ordered by (year, quarter) as extracted
    /// from the label, not by raw string order.
    pub fn sum_by_quarter(transactions: &[Transaction]) -> Vec<GroupSum> {
        let mut rows = Self::grouped_sums(transactions, |tx| tx.quarter_label.clone());
        rows.sort_by(|a, b| compare_labels(&a.key, &b.key));
        rows
    }

    /// Compute the KPI set over the whole cleaned dataset.
    ///
    /// Goal attainment is emitted only when at least one row carries a goal
    /// value; the average ticket is 0 for an empty dataset.
    pub fn compute_kpis(transactions: &[Transaction]) -> KpiSet {
        let total: f64 = transactions.iter().map(|tx| tx.amount).sum();
        let count = transactions.len() as u64;

        let goal_total: f64 = transactions.iter().filter_map(|tx| tx.goal).sum();
        let attainment = if goal_total > 0.0 {
            Some(percentage(total, goal_total, 2))
        } else {
            None
        };

        KpiSet::from_totals(total, count, attainment)
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Generic grouping driver: per-key sums in key order.
    fn grouped_sums(
        transactions: &[Transaction],
        key_fn: impl Fn(&Transaction) -> String,
    ) -> Vec<GroupSum> {
        let mut map: BTreeMap<String, f64> = BTreeMap::new();
        for tx in transactions {
            *map.entry(key_fn(tx)).or_default() += tx.amount;
        }
        map.into_iter()
            .map(|(key, total)| GroupSum { key, total })
            .collect()
    }
}

/// Successor of a `"%Y-%m"` key, rolling December into January.
fn next_month_key(key: &str) -> Option<String> {
    let (year, month) = key.split_once('-')?;
    let mut year: i32 = year.parse().ok()?;
    let mut month: u32 = month.parse().ok()?;
    if month >= 12 {
        year += 1;
        month = 1;
    } else {
        month += 1;
    }
    Some(format!("{year:04}-{month:02}"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
