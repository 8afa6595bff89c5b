//! Terminal rendering of the dashboard view-model.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

use crate::domain::Dataset;
use crate::view::{BarSeries, DashboardView, SliceSeries, Tone};
use format::{fmt_ksh, fmt_pct, fmt_rate, truncate};

const RULE: &str = "----------------------------------------------------------------------";

/// Format the full dashboard page.
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", view.title));
    if let Some(warning) = &view.load_warning {
        out.push_str(&format!("[!] {warning}\n"));
    }
    out.push_str(&format!("Participants: {}\n\n", view.participant_count));

    out.push_str(&render_kpi_block(view));
    out.push('\n');

    out.push_str(&render_bar_series(&view.income_by_program, BarUnit::Ksh));
    out.push('\n');
    out.push_str(&render_bar_series(&view.completion_by_program, BarUnit::Pct));
    out.push('\n');
    out.push_str(&render_slice_pair(
        "Employment Status Transformation",
        &view.employment_before,
        &view.employment_after,
    ));
    out.push('\n');
    out.push_str(&render_bar_series(&view.business_by_program, BarUnit::Pct));
    out.push('\n');

    out.push_str(&render_insights(view));
    out.push('\n');
    out.push_str(&render_effectiveness(view));

    out.push_str(&format!("{RULE}\n"));
    out.push_str("Tumaini Foundation Analytics\n");

    out
}

/// Format the headline KPIs only (for scripting).
pub fn render_kpis(view: &DashboardView) -> String {
    let mut out = String::new();
    if let Some(warning) = &view.load_warning {
        out.push_str(&format!("[!] {warning}\n"));
    }
    out.push_str(&render_kpi_block(view));
    out
}

/// Format the raw participant table (the data explorer).
pub fn render_raw_table(dataset: &Dataset) -> String {
    let mut out = String::new();
    out.push_str("Raw participant data:\n");
    out.push_str(
        format!(
            "{:<12} {:<20} {:<12} {:<16} {:>10} {:>10} {:>10} {:>9} {:>5} {:>5} {:<14} {:<14}\n",
            "id",
            "program",
            "intake",
            "location",
            "before",
            "after",
            "increase",
            "growth%",
            "done",
            "biz",
            "status_before",
            "status_after",
        )
        .trim_end(),
    );
    out.push('\n');

    for r in dataset.records() {
        out.push_str(
            format!(
                "{:<12} {:<20} {:<12} {:<16} {:>10.0} {:>10.0} {:>10.0} {:>9.1} {:>5} {:>5} {:<14} {:<14}\n",
                truncate(&r.id, 12),
                truncate(r.program.display_name(), 20),
                r.intake_date.to_string(),
                truncate(r.location.display_name(), 16),
                r.income_before_ksh,
                r.income_after_ksh,
                r.income_increase_ksh,
                r.income_increase_pct,
                if r.training_completed { "yes" } else { "no" },
                if r.business_started { "yes" } else { "no" },
                truncate(r.status_before.display_name(), 14),
                truncate(r.status_after.display_name(), 14),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    if dataset.is_empty() {
        out.push_str("(no records)\n");
    }

    out
}

fn render_kpi_block(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str("Key Performance Indicators:\n");
    for card in &view.kpis {
        out.push_str(&format!("  {:<22} {:>12}\n", card.label, card.display));
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarUnit {
    Ksh,
    Pct,
}

fn render_bar_series(series: &BarSeries, unit: BarUnit) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}:\n", series.title));
    out.push_str(&format!("  {:<20} {:>16}\n", "Program", series.value_label));
    for point in &series.points {
        let value = match unit {
            BarUnit::Ksh => fmt_ksh(point.value),
            BarUnit::Pct => fmt_pct(point.value),
        };
        out.push_str(&format!("  {:<20} {:>16}\n", truncate(&point.label, 20), value));
    }
    if series.points.is_empty() {
        out.push_str("  (no data)\n");
    }
    out
}

fn render_slice_pair(title: &str, before: &SliceSeries, after: &SliceSeries) -> String {
    let mut out = String::new();
    out.push_str(&format!("{title}:\n"));
    out.push_str(&render_slices(before));
    out.push_str(&render_slices(after));
    out
}

fn render_slices(series: &SliceSeries) -> String {
    let total: usize = series.slices.iter().map(|s| s.count).sum();
    let mut out = String::new();
    out.push_str(&format!("  {}\n", series.title));
    for slice in &series.slices {
        let share = if total > 0 {
            slice.count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        out.push_str(&format!(
            "    {:<16} {:>4}  {:>6}\n",
            truncate(&slice.label, 16),
            slice.count,
            fmt_pct(share),
        ));
    }
    if series.slices.is_empty() {
        out.push_str("    (no data)\n");
    }
    out
}

fn render_insights(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str("Key Insights & Findings:\n");
    for insight in &view.insights {
        let glyph = match insight.tone {
            Tone::Info => "[i]",
            Tone::Success => "[+]",
            Tone::Warning => "[!]",
        };
        out.push_str(&format!("  {glyph} {}: {}\n", insight.title, insight.body));
    }
    if view.insights.is_empty() {
        out.push_str("  (no insights: dataset is empty)\n");
    }
    out
}

fn render_effectiveness(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str("Most Effective Programs:\n");
    out.push_str(&format!(
        "  {:<20} {:>14} {:>12} {:>12}\n",
        "Program", "Avg Growth %", "Completion", "Biz Start",
    ));
    for row in &view.effectiveness {
        out.push_str(&format!(
            "  {:<20} {:>14.1} {:>12} {:>12}\n",
            truncate(row.program.display_name(), 20),
            row.avg_income_growth_pct,
            fmt_rate(row.completion_rate),
            fmt_rate(row.business_start_rate),
        ));
    }
    if view.effectiveness.is_empty() {
        out.push_str("  (no data)\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_dataset;
    use crate::domain::BuildConfig;
    use crate::view::build_view;

    fn survey_view() -> DashboardView {
        let dataset = build_dataset(&BuildConfig::default()).unwrap();
        build_view(&dataset, None)
    }

    #[test]
    fn dashboard_contains_every_section() {
        let text = render_dashboard(&survey_view());
        assert!(text.contains("=== Tumaini Foundation - Training Program Dashboard ==="));
        assert!(text.contains("Key Performance Indicators:"));
        assert!(text.contains("Average Income Increase After 12 Months:"));
        assert!(text.contains("Program Completion Rates:"));
        assert!(text.contains("Employment Status Transformation:"));
        assert!(text.contains("Business Startup Rates by Program:"));
        assert!(text.contains("Key Insights & Findings:"));
        assert!(text.contains("Most Effective Programs:"));
        assert!(text.contains("Participants: 48"));
    }

    #[test]
    fn empty_view_renders_with_warning_and_placeholders() {
        let view = build_view(
            &crate::domain::Dataset::empty(),
            Some("Data load failed: boom".to_string()),
        );
        let text = render_dashboard(&view);
        assert!(text.contains("[!] Data load failed: boom"));
        assert!(text.contains("Participants: 0"));
        assert!(text.contains("(no insights: dataset is empty)"));
        assert!(text.contains("(no data)"));
    }

    #[test]
    fn kpi_only_output_is_compact() {
        let text = render_kpis(&survey_view());
        assert!(text.contains("Total Participants"));
        assert!(text.contains("48"));
        assert!(!text.contains("Key Insights"));
    }

    #[test]
    fn raw_table_lists_one_line_per_record() {
        let dataset = build_dataset(&BuildConfig::default()).unwrap();
        let text = render_raw_table(&dataset);
        // Header + 48 rows.
        assert_eq!(text.lines().count(), 50);
        assert!(text.contains("TF-01-001"));
        assert!(text.contains("TF-08-006"));
    }
}
