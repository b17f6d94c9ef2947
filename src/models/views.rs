use serde::Serialize;

use crate::rules::{SyllabusTopic, VoteTally};

use super::{Content, Department, Subject, UserContentState};

#[derive(Debug, Clone, Serialize)]
pub struct SubjectProgress {
    pub subject: Subject,
    pub percentage: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub subject_progress: Vec<SubjectProgress>,
    pub current_streak: u32,
    pub streak_increased: bool,
    pub user_department: Option<Department>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentEntry {
    #[serde(flatten)]
    pub content: Content,
    pub is_completed: bool,
    pub marked_for_revision: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectDetail {
    pub subject: Subject,
    pub content_list: Vec<ContentEntry>,
    pub syllabus_topics: Vec<SyllabusTopic>,
    pub total_content_count: usize,
    pub completed_content_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentDetail {
    pub content: Content,
    pub state: UserContentState,
    pub has_voted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleOutcome {
    pub state: UserContentState,
    pub subject_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoteOutcome {
    pub counted: bool,
    pub votes: VoteTally,
}
