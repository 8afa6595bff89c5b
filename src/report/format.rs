//! Number and text formatting helpers for terminal output.
//!
//! Kept separate from the rendering code so the view-model can reuse the
//! same display conventions for its preformatted metric strings.

/// Currency with thousands separators, rounded to whole shillings:
/// `KSh 5,225`, `-KSh 1,300`.
pub fn fmt_ksh(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}KSh {}", group_thousands(value.abs().round() as i64))
}

/// One-decimal percentage from a 0-100 value: `72.9%`.
pub fn fmt_pct(value: f64) -> String {
    format!("{value:.1}%")
}

/// Signed one-decimal percentage from a 0-100 value: `+12.5%`.
pub fn fmt_signed_pct(value: f64) -> String {
    format!("{value:+.1}%")
}

/// A 0-1 rate rendered with three decimals: `0.729`.
pub fn fmt_rate(value: f64) -> String {
    format!("{value:.3}")
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ksh_groups_thousands() {
        assert_eq!(fmt_ksh(5225.0), "KSh 5,225");
        assert_eq!(fmt_ksh(1_234_567.4), "KSh 1,234,567");
        assert_eq!(fmt_ksh(950.0), "KSh 950");
        assert_eq!(fmt_ksh(0.0), "KSh 0");
    }

    #[test]
    fn ksh_keeps_the_sign_outside_the_grouping() {
        assert_eq!(fmt_ksh(-1300.0), "-KSh 1,300");
    }

    #[test]
    fn percentages() {
        assert_eq!(fmt_pct(72.92), "72.9%");
        assert_eq!(fmt_signed_pct(12.5), "+12.5%");
        assert_eq!(fmt_signed_pct(-3.25), "-3.2%");
        assert_eq!(fmt_rate(0.72916), "0.729");
    }

    #[test]
    fn truncate_marks_cut_labels() {
        assert_eq!(truncate("Tailoring", 24), "Tailoring");
        assert_eq!(truncate("Financial Literacy", 10), "Financial.");
    }
}
