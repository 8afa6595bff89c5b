//! Dashboard view-model.
//!
//! `build_view` is the render half of the pipeline: it takes an already
//! built dataset and produces a plain data object the presentation layer can
//! display without touching the aggregation code again. Re-rendering reuses
//! the cached dataset and recomputes only this view.

use serde::{Deserialize, Serialize};

use crate::domain::{Dataset, ParticipantRecord};
use crate::metrics::{self, ProgramEffectiveness};
use crate::report::format::{fmt_ksh, fmt_pct};

/// Severity styling hint for a callout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Success,
    Warning,
}

/// A single headline number with a preformatted display value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub label: String,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
}

/// An ordered category-to-value series for a horizontal bar chart.
/// Points are sorted ascending by value so the widest bar renders at the top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub title: String,
    pub value_label: String,
    pub points: Vec<BarPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceCount {
    pub label: String,
    pub count: usize,
}

/// Category share counts for a pie chart, largest slice first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceSeries {
    pub title: String,
    pub slices: Vec<SliceCount>,
}

/// A narrative finding derived from the aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub body: String,
    pub tone: Tone,
}

/// Everything the dashboard needs to draw one full page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub title: String,
    /// Present when dataset construction failed and an empty dataset was
    /// substituted; the page renders with zeroed aggregates.
    pub load_warning: Option<String>,
    pub participant_count: usize,
    pub kpis: Vec<MetricCard>,
    pub income_by_program: BarSeries,
    pub completion_by_program: BarSeries,
    pub business_by_program: BarSeries,
    pub employment_before: SliceSeries,
    pub employment_after: SliceSeries,
    pub insights: Vec<Insight>,
    pub effectiveness: Vec<ProgramEffectiveness>,
}

/// Compute the full dashboard view from a dataset.
///
/// Aggregations that are undefined on empty partitions (best/worst program,
/// completer comparisons) are guarded here: the matching insight is simply
/// omitted instead of failing the render.
pub fn build_view(dataset: &Dataset, load_warning: Option<String>) -> DashboardView {
    let records = dataset.records();

    DashboardView {
        title: "Tumaini Foundation - Training Program Dashboard".to_string(),
        load_warning,
        participant_count: records.len(),
        kpis: build_kpis(records),
        income_by_program: income_series(records),
        completion_by_program: completion_series(records),
        business_by_program: business_series(records),
        employment_before: employment_slices(
            records,
            "Employment Status Before Training",
            |r| r.status_before,
        ),
        employment_after: employment_slices(
            records,
            "Employment Status After Training",
            |r| r.status_after,
        ),
        insights: build_insights(records),
        effectiveness: rounded_effectiveness(records),
    }
}

fn build_kpis(records: &[ParticipantRecord]) -> Vec<MetricCard> {
    let total = records.len() as f64;
    let completion = metrics::completion_rate(records) * 100.0;
    let avg_increase = metrics::average_income_increase(records);
    let business = metrics::business_start_rate(records) * 100.0;

    vec![
        MetricCard {
            label: "Total Participants".to_string(),
            value: total,
            display: records.len().to_string(),
        },
        MetricCard {
            label: "Completion Rate".to_string(),
            value: completion,
            display: fmt_pct(completion),
        },
        MetricCard {
            label: "Avg Income Increase".to_string(),
            value: avg_increase,
            display: fmt_ksh(avg_increase),
        },
        MetricCard {
            label: "Business Start Rate".to_string(),
            value: business,
            display: fmt_pct(business),
        },
    ]
}

fn income_series(records: &[ParticipantRecord]) -> BarSeries {
    let ranked = metrics::group_mean(records, |r| r.program, |r| r.income_increase_ksh);
    BarSeries {
        title: "Average Income Increase After 12 Months".to_string(),
        value_label: "Income Increase (KSh)".to_string(),
        points: ranked
            .into_iter()
            .map(|(program, value)| BarPoint {
                label: program.display_name().to_string(),
                value,
            })
            .collect(),
    }
}

fn completion_series(records: &[ParticipantRecord]) -> BarSeries {
    let ranked = metrics::group_mean(records, |r| r.program, |r| {
        if r.training_completed { 100.0 } else { 0.0 }
    });
    BarSeries {
        title: "Program Completion Rates".to_string(),
        value_label: "Completion Rate (%)".to_string(),
        points: ranked
            .into_iter()
            .map(|(program, value)| BarPoint {
                label: program.display_name().to_string(),
                value,
            })
            .collect(),
    }
}

fn business_series(records: &[ParticipantRecord]) -> BarSeries {
    let ranked = metrics::group_mean(records, |r| r.program, |r| {
        if r.business_started { 100.0 } else { 0.0 }
    });
    BarSeries {
        title: "Business Startup Rates by Program".to_string(),
        value_label: "Business Start Rate (%)".to_string(),
        points: ranked
            .into_iter()
            .map(|(program, value)| BarPoint {
                label: program.display_name().to_string(),
                value,
            })
            .collect(),
    }
}

fn employment_slices<F>(records: &[ParticipantRecord], title: &str, key: F) -> SliceSeries
where
    F: Fn(&ParticipantRecord) -> crate::domain::EmploymentStatus,
{
    let counts = metrics::value_counts(records, key);
    SliceSeries {
        title: title.to_string(),
        slices: counts
            .into_iter()
            .map(|(status, count)| SliceCount {
                label: status.display_name().to_string(),
                count,
            })
            .collect(),
    }
}

fn build_insights(records: &[ParticipantRecord]) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let Ok(extremes) =
        metrics::best_and_worst_group(records, |r| r.program, |r| r.income_increase_pct)
    {
        insights.push(Insight {
            title: "Highest Income Growth".to_string(),
            body: format!(
                "{} participants show {} average income increase",
                extremes.best.0.display_name(),
                fmt_pct(extremes.best.1)
            ),
            tone: Tone::Info,
        });
        insights.push(Insight {
            title: "Lowest Income Growth".to_string(),
            body: format!(
                "{} participants show {} average income increase",
                extremes.worst.0.display_name(),
                fmt_pct(extremes.worst.1)
            ),
            tone: Tone::Warning,
        });
    }

    if !records.is_empty() {
        let delta = metrics::employment_transition_delta(records) * 100.0;
        insights.push(Insight {
            title: "Employment Transformation".to_string(),
            body: format!(
                "{} change in employment or self-employment after training",
                crate::report::format::fmt_signed_pct(delta)
            ),
            tone: Tone::Success,
        });
    }

    if let Ok(starters_growth) =
        metrics::conditional_mean(records, |r| r.business_started, |r| r.income_increase_pct)
    {
        insights.push(Insight {
            title: "Business Success".to_string(),
            body: format!(
                "Participants who started businesses achieved {} average income growth",
                fmt_pct(starters_growth)
            ),
            tone: Tone::Info,
        });
    }

    if let Ok(diff) = metrics::subgroup_mean_difference(
        records,
        |r| r.training_completed,
        |r| r.income_increase_pct,
    ) {
        insights.push(Insight {
            title: "Completion Matters".to_string(),
            body: format!(
                "Program completers achieved {} higher income growth than non-completers",
                fmt_pct(diff)
            ),
            tone: Tone::Success,
        });
    }

    insights
}

fn rounded_effectiveness(records: &[ParticipantRecord]) -> Vec<ProgramEffectiveness> {
    metrics::program_effectiveness(records)
        .into_iter()
        .map(|row| ProgramEffectiveness {
            program: row.program,
            avg_income_growth_pct: round3(row.avg_income_growth_pct),
            completion_rate: round3(row.completion_rate),
            business_start_rate: round3(row.business_start_rate),
        })
        .collect()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
