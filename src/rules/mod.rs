//! Pure progress rules. Nothing in here touches the database; the store
//! loads state, runs a rule and writes the result back in one transaction.

pub mod progress;
pub mod streak;
pub mod toggle;
pub mod vote;

pub use progress::{completion_percentage, syllabus_coverage, SyllabusTopic};
pub use streak::{evaluate_streak, StreakUpdate};
pub use toggle::ProgressFlag;
pub use vote::{VoteKind, VoteTally};
