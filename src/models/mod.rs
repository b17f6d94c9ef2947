mod catalog;
mod progress;
mod views;

pub use catalog::{
    Content, ContentFilter, ContentKind, Department, NewContent, NewSubject, Subject,
    SubjectCounts,
};
pub use progress::{SignupForm, StateFilter, User, UserContentState, UserProfile};
pub use views::{
    ContentDetail, ContentEntry, Dashboard, SubjectDetail, SubjectProgress, ToggleOutcome,
    VoteOutcome,
};
