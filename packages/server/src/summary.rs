use crate::aggregate::EventCounts;

/// Subject used for a single student's summary.
pub const STUDENT_SUBJECT: &str = "The student";

/// Subject used for the institution-wide report.
pub const COHORT_SUBJECT: &str = "In this academic year, students";

/// What to write when there are no categories to list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyCategories {
    /// End the sentence after the total.
    #[default]
    Omit,
    /// Keep the dangling `including .` that older reports contain.
    Legacy,
}

impl EmptyCategories {
    pub fn from_legacy_flag(legacy: bool) -> Self {
        if legacy { Self::Legacy } else { Self::Omit }
    }
}

/// Build the one-sentence participation summary.
///
/// ```text
/// <subject> participated in <total> professional activities including 2 Workshop(s), 1 Hackathon(s).
/// ```
pub fn format_summary(
    subject: &str,
    total: u64,
    counts: &EventCounts,
    empty: EmptyCategories,
) -> String {
    let head = format!("{subject} participated in {total} professional activities");

    if counts.is_empty() && empty == EmptyCategories::Omit {
        return format!("{head}.");
    }

    let parts: Vec<String> = counts
        .iter()
        .map(|e| format!("{} {}(s)", e.count, e.event_type))
        .collect();

    format!("{head} including {}.", parts.join(", "))
}
