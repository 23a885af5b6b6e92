//! Grouped sums used for charting: per-key totals, top-N rankings and
//! period-indexed series.
//!
//! Buckets come out ordered by key, so a ranking over equal values is
//! independent of the order rows were read in.

use chrono::NaiveDate;
use shared::models::{Bucket, MonthlyPoint};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::EngineError;

/// Sums `value` over rows sharing the same `key`. Keys may be tuples.
pub fn sum_by<T, K, FK, FV>(rows: &[T], key: FK, value: FV) -> Vec<Bucket<K>>
where
    K: Ord,
    FK: Fn(&T) -> K,
    FV: Fn(&T) -> f64,
{
    let mut sums: BTreeMap<K, f64> = BTreeMap::new();
    for row in rows {
        *sums.entry(key(row)).or_insert(0.0) += value(row);
    }
    sums.into_iter()
        .map(|(key, value)| Bucket { key, value })
        .collect()
}

/// Keeps the `n` largest buckets, largest first. Equal values keep their
/// incoming relative order.
pub fn top_n<K>(mut buckets: Vec<Bucket<K>>, n: usize) -> Result<Vec<Bucket<K>>, EngineError> {
    if n == 0 {
        return Err(EngineError::InvalidArgument(
            "top-N ranking needs at least one entry".to_string(),
        ));
    }
    buckets.sort_by(|a, b| b.value.total_cmp(&a.value));
    buckets.truncate(n);
    Ok(buckets)
}

/// Sums several columns per period. Rows without a period are skipped; missing
/// months are not filled in.
pub fn monthly_sums<T, FP, FV>(rows: &[T], period: FP, values: FV) -> Vec<MonthlyPoint>
where
    FP: Fn(&T) -> Option<NaiveDate>,
    FV: Fn(&T) -> Vec<f64>,
{
    let mut sums: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    let mut skipped = 0usize;

    for row in rows {
        let Some(date) = period(row) else {
            skipped += 1;
            continue;
        };
        let row_values = values(row);
        let acc = sums.entry(date).or_default();
        if acc.len() < row_values.len() {
            acc.resize(row_values.len(), 0.0);
        }
        for (slot, v) in acc.iter_mut().zip(row_values) {
            *slot += v;
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Rows without a period left out of the monthly series");
    }

    sums.into_iter()
        .map(|(period, values)| MonthlyPoint { period, values })
        .collect()
}

/// Rows whose key is one of `selected`.
pub fn filter_rows<T, S, F>(rows: &[T], selected: &[S], key: F) -> Vec<T>
where
    T: Clone,
    S: AsRef<str>,
    F: Fn(&T) -> &str,
{
    let wanted: HashSet<&str> = selected.iter().map(AsRef::as_ref).collect();
    rows.iter()
        .filter(|row| wanted.contains(key(*row)))
        .cloned()
        .collect()
}

/// Sorted distinct values of `key`.
pub fn distinct_sorted<T, F>(rows: &[T], key: F) -> Vec<String>
where
    F: Fn(&T) -> &str,
{
    rows.iter()
        .map(|row| key(row))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
