use serde::{Deserialize, Serialize};

use crate::models::UserContentState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressFlag {
    Completed,
    Revision,
}

impl ProgressFlag {
    /// Flips this flag on `state`. The other flag is never touched.
    pub fn apply(self, state: &mut UserContentState) {
        match self {
            ProgressFlag::Completed => state.is_completed = !state.is_completed,
            ProgressFlag::Revision => state.marked_for_revision = !state.marked_for_revision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_state() -> UserContentState {
        UserContentState {
            user_id: 1,
            content_id: 2,
            is_completed: false,
            marked_for_revision: false,
        }
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut state = fresh_state();
        ProgressFlag::Completed.apply(&mut state);
        assert!(state.is_completed);
        ProgressFlag::Completed.apply(&mut state);
        assert!(!state.is_completed);
    }

    #[test]
    fn test_flags_are_independent() {
        let mut state = fresh_state();
        ProgressFlag::Revision.apply(&mut state);
        assert!(state.marked_for_revision);
        assert!(!state.is_completed);

        ProgressFlag::Completed.apply(&mut state);
        assert!(state.is_completed);
        assert!(state.marked_for_revision);
    }
}
