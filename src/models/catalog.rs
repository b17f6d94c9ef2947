use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rules::VoteTally;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    /// Free text, one topic per line.
    pub syllabus: Option<String>,
    pub department_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewSubject {
    pub name: String,
    pub syllabus: Option<String>,
    pub department_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    Theory,
    Lab,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Theory => "Theory",
            ContentKind::Lab => "Lab",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown content type: {0}")]
pub struct UnknownContentKind(pub String);

impl FromStr for ContentKind {
    type Err = UnknownContentKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Theory" => Ok(ContentKind::Theory),
            "Lab" => Ok(ContentKind::Lab),
            other => Err(UnknownContentKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub id: i64,
    pub subject_id: i64,
    pub title: String,
    pub content_type: ContentKind,

    // Theory
    pub youtube_link: Option<String>,
    pub notes: Option<String>,
    pub viva_questions: Option<String>,

    // Lab
    pub problem_statement: Option<String>,
    pub solution_code: Option<String>,
    pub explanation: Option<String>,

    pub created_at: DateTime<Utc>,
    pub votes: VoteTally,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewContent {
    pub title: String,
    pub content_type: ContentKind,
    pub youtube_link: Option<String>,
    pub notes: Option<String>,
    pub viva_questions: Option<String>,
    pub problem_statement: Option<String>,
    pub solution_code: Option<String>,
    pub explanation: Option<String>,
}

/// Content counts for one subject, as seen by one user.
#[derive(Debug, Clone)]
pub struct SubjectCounts {
    pub subject: Subject,
    pub total: u64,
    pub completed: u64,
}

/// Admin listing filter; every field narrows the result when set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentFilter {
    pub department: Option<i64>,
    pub subject: Option<i64>,
    pub kind: Option<ContentKind>,
    /// Matched against title, notes and problem statement.
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_round_trip() {
        for kind in [ContentKind::Theory, ContentKind::Lab] {
            assert_eq!(kind.as_str().parse::<ContentKind>().unwrap(), kind);
        }
        assert!("Video".parse::<ContentKind>().is_err());
    }
}
