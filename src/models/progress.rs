use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    #[serde(skip)]
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub current_streak: u32,
    pub last_login_date: Option<NaiveDate>,
    pub department_id: Option<i64>,
}

/// One user's progress on one content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserContentState {
    pub user_id: i64,
    pub content_id: i64,
    pub is_completed: bool,
    pub marked_for_revision: bool,
}

impl UserContentState {
    pub fn untouched(user_id: i64, content_id: i64) -> Self {
        Self {
            user_id,
            content_id,
            is_completed: false,
            marked_for_revision: false,
        }
    }
}

/// Admin listing filter over progress rows; unset fields match anything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateFilter {
    pub user: Option<i64>,
    pub is_completed: Option<bool>,
    pub marked_for_revision: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub name: String,
    pub password: String,
    pub password_confirm: String,
    pub department_id: i64,
}
