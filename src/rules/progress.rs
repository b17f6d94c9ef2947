use std::collections::HashSet;

use serde::Serialize;

/// Share of completed items as a whole percentage, rounded down.
pub fn completion_percentage(completed: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = completed.min(total) * 100 / total;
    percent as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyllabusTopic {
    pub topic: String,
    pub covered: bool,
}

/// Splits a syllabus into one topic per non-blank line and marks the topics
/// that match the title of a completed content item.
pub fn syllabus_coverage(
    syllabus: Option<&str>,
    completed_titles: &HashSet<String>,
) -> Vec<SyllabusTopic> {
    syllabus
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|topic| SyllabusTopic {
            topic: topic.to_string(),
            covered: completed_titles.contains(topic),
        })
        .collect()
}
