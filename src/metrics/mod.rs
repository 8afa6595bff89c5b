//! Pure aggregations over participant records.
//!
//! Every function here is a plain fold over the row slice: no caching, no
//! mutation, and the order of input rows never affects the output. Grouped
//! results carry an explicit ordering so the presentation layer can render
//! them without re-sorting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ParticipantRecord, Program};
use crate::error::MetricsError;

/// Fraction of records that completed training; 0.0 for an empty slice.
pub fn completion_rate(records: &[ParticipantRecord]) -> f64 {
    bool_rate(records, |r| r.training_completed)
}

/// Fraction of records that started a business; 0.0 for an empty slice.
pub fn business_start_rate(records: &[ParticipantRecord]) -> f64 {
    bool_rate(records, |r| r.business_started)
}

/// Mean 12-month income increase in KSh; 0.0 for an empty slice.
pub fn average_income_increase(records: &[ParticipantRecord]) -> f64 {
    mean(records, |r| r.income_increase_ksh).unwrap_or(0.0)
}

/// Change in the share of participants with any earning activity: the
/// fraction earning after training minus the fraction earning before.
/// May be negative; 0.0 for an empty slice.
pub fn employment_transition_delta(records: &[ParticipantRecord]) -> f64 {
    bool_rate(records, |r| r.status_after.is_earning())
        - bool_rate(records, |r| r.status_before.is_earning())
}

/// Per-group means of `value`, ordered ascending by mean.
///
/// The ascending order matches a horizontal bar layout where the widest bar
/// renders at the top. Ties break on the group key so output is deterministic.
pub fn group_mean<K, G, V>(records: &[ParticipantRecord], group: G, value: V) -> Vec<(K, f64)>
where
    K: Ord + Copy,
    G: Fn(&ParticipantRecord) -> K,
    V: Fn(&ParticipantRecord) -> f64,
{
    let mut sums: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = sums.entry(group(r)).or_insert((0.0, 0));
        entry.0 += value(r);
        entry.1 += 1;
    }

    let mut out: Vec<(K, f64)> = sums
        .into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect();
    out.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Count of records per distinct value of `key`, ordered descending by
/// count (ties ascending by key). Shaped for pie-chart composition.
pub fn value_counts<K, F>(records: &[ParticipantRecord], key: F) -> Vec<(K, usize)>
where
    K: Ord + Copy,
    F: Fn(&ParticipantRecord) -> K,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(key(r)).or_insert(0) += 1;
    }

    let mut out: Vec<(K, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Best and worst group by mean value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupExtremes<K> {
    pub best: (K, f64),
    pub worst: (K, f64),
}

/// Argmax and argmin of the per-group means; errors on zero rows, where
/// neither is defined.
pub fn best_and_worst_group<K, G, V>(
    records: &[ParticipantRecord],
    group: G,
    value: V,
) -> Result<GroupExtremes<K>, MetricsError>
where
    K: Ord + Copy,
    G: Fn(&ParticipantRecord) -> K,
    V: Fn(&ParticipantRecord) -> f64,
{
    let ranked = group_mean(records, group, value);
    match (ranked.first(), ranked.last()) {
        (Some(&worst), Some(&best)) => Ok(GroupExtremes { best, worst }),
        _ => Err(MetricsError::EmptyDataset),
    }
}

/// Mean of `value` where `predicate` holds, minus the mean where it does
/// not. Errors when either side of the split is empty.
pub fn subgroup_mean_difference<P, V>(
    records: &[ParticipantRecord],
    predicate: P,
    value: V,
) -> Result<f64, MetricsError>
where
    P: Fn(&ParticipantRecord) -> bool,
    V: Fn(&ParticipantRecord) -> f64,
{
    let mut hit = (0.0, 0usize);
    let mut miss = (0.0, 0usize);
    for r in records {
        let side = if predicate(r) { &mut hit } else { &mut miss };
        side.0 += value(r);
        side.1 += 1;
    }

    if hit.1 == 0 {
        return Err(MetricsError::EmptyPartition("predicate matched no records"));
    }
    if miss.1 == 0 {
        return Err(MetricsError::EmptyPartition(
            "predicate matched every record",
        ));
    }
    Ok(hit.0 / hit.1 as f64 - miss.0 / miss.1 as f64)
}

/// Mean of `value` over the records where `predicate` holds.
/// Errors when nothing matches.
pub fn conditional_mean<P, V>(
    records: &[ParticipantRecord],
    predicate: P,
    value: V,
) -> Result<f64, MetricsError>
where
    P: Fn(&ParticipantRecord) -> bool,
    V: Fn(&ParticipantRecord) -> f64,
{
    let mut sum = 0.0;
    let mut n = 0usize;
    for r in records.iter().filter(|r| predicate(r)) {
        sum += value(r);
        n += 1;
    }
    if n == 0 {
        return Err(MetricsError::EmptyPartition("predicate matched no records"));
    }
    Ok(sum / n as f64)
}

/// One row of the program effectiveness summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramEffectiveness {
    pub program: Program,
    pub avg_income_growth_pct: f64,
    pub completion_rate: f64,
    pub business_start_rate: f64,
}

/// Per-program effectiveness summary, ordered descending by income growth
/// (ties by program). One row per distinct program in the input.
pub fn program_effectiveness(records: &[ParticipantRecord]) -> Vec<ProgramEffectiveness> {
    struct Acc {
        growth_pct: f64,
        completed: usize,
        started: usize,
        n: usize,
    }

    let mut groups: BTreeMap<Program, Acc> = BTreeMap::new();
    for r in records {
        let acc = groups.entry(r.program).or_insert(Acc {
            growth_pct: 0.0,
            completed: 0,
            started: 0,
            n: 0,
        });
        acc.growth_pct += r.income_increase_pct;
        acc.completed += usize::from(r.training_completed);
        acc.started += usize::from(r.business_started);
        acc.n += 1;
    }

    let mut out: Vec<ProgramEffectiveness> = groups
        .into_iter()
        .map(|(program, acc)| {
            let n = acc.n as f64;
            ProgramEffectiveness {
                program,
                avg_income_growth_pct: acc.growth_pct / n,
                completion_rate: acc.completed as f64 / n,
                business_start_rate: acc.started as f64 / n,
            }
        })
        .collect();
    out.sort_by(|a, b| {
        b.avg_income_growth_pct
            .total_cmp(&a.avg_income_growth_pct)
            .then_with(|| a.program.cmp(&b.program))
    });
    out
}

fn bool_rate<F>(records: &[ParticipantRecord], pick: F) -> f64
where
    F: Fn(&ParticipantRecord) -> bool,
{
    if records.is_empty() {
        return 0.0;
    }
    let hits = records.iter().filter(|r| pick(r)).count();
    hits as f64 / records.len() as f64
}

fn mean<V>(records: &[ParticipantRecord], value: V) -> Option<f64>
where
    V: Fn(&ParticipantRecord) -> f64,
{
    if records.is_empty() {
        return None;
    }
    let sum: f64 = records.iter().map(value).sum();
    Some(sum / records.len() as f64)
}
