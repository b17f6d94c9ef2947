use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, OptionalExtension, Row, TransactionBehavior};
use tokio_rusqlite::Connection;

use crate::error::{AppError, Result};
use crate::models::{
    Content, ContentFilter, ContentKind, Department, NewContent, NewSubject, StateFilter,
    Subject, SubjectCounts, User, UserContentState, UserProfile, VoteOutcome,
};
use crate::rules::{evaluate_streak, ProgressFlag, StreakUpdate, VoteKind, VoteTally};

use super::schema::SCHEMA;

const CONTENT_COLUMNS: &str = "c.id, c.subject_id, c.title, c.content_type, c.youtube_link, \
     c.notes, c.viva_questions, c.problem_statement, c.solution_code, c.explanation, c.created_at, \
     c.helpful_votes, c.unhelpful_votes";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;
        Self::init(conn).await
    }

    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    // Department operations

    /// Returns the id of the department called `name`, creating it if needed.
    pub async fn insert_department(&self, name: &str) -> Result<i64> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Department name must not be empty"));
        }

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO departments (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
                    params![name],
                )?;
                let id = conn.query_row(
                    "SELECT id FROM departments WHERE name = ?1",
                    params![name],
                    |row| row.get(0),
                )?;
                Ok(id)
            })
            .await?;
        Ok(id)
    }

    pub async fn get_department(&self, id: i64) -> Result<Option<Department>> {
        let department = self
            .conn
            .call(move |conn| {
                let department = conn
                    .query_row(
                        "SELECT id, name FROM departments WHERE id = ?1",
                        params![id],
                        department_from_row,
                    )
                    .optional()?;
                Ok(department)
            })
            .await?;
        Ok(department)
    }

    pub async fn list_departments(&self, search: Option<String>) -> Result<Vec<Department>> {
        let pattern = like_pattern(search.as_deref().unwrap_or_default());
        let departments = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r"SELECT id, name FROM departments
                      WHERE name LIKE ?1 ESCAPE '\' ORDER BY name",
                )?;
                let departments = stmt
                    .query_map(params![pattern], department_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(departments)
            })
            .await?;
        Ok(departments)
    }

    /// Removes a department with its subjects and content. Profiles in the
    /// department are kept with no department.
    #[cfg(test)]
    pub async fn delete_department(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .call(move |conn| {
                let rows = conn.execute("DELETE FROM departments WHERE id = ?1", params![id])?;
                Ok(rows > 0)
            })
            .await?;
        Ok(deleted)
    }

    // Subject operations

    pub async fn insert_subject(&self, subject: NewSubject) -> Result<i64> {
        if subject.name.trim().is_empty() {
            return Err(AppError::validation("Subject name must not be empty"));
        }

        let id = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                if !row_exists(&tx, "departments", subject.department_id)? {
                    return Ok(None);
                }
                tx.execute(
                    "INSERT INTO subjects (name, syllabus, department_id) VALUES (?1, ?2, ?3)",
                    params![subject.name.trim(), subject.syllabus, subject.department_id],
                )?;
                let id = tx.last_insert_rowid();
                tx.commit()?;
                Ok(Some(id))
            })
            .await?;
        id.ok_or(AppError::NotFound("Department"))
    }

    pub async fn find_subject(&self, department_id: i64, name: &str) -> Result<Option<i64>> {
        let name = name.trim().to_string();
        let id = self
            .conn
            .call(move |conn| {
                let id = conn
                    .query_row(
                        r#"SELECT id FROM subjects WHERE department_id = ?1 AND name = ?2
                           ORDER BY id LIMIT 1"#,
                        params![department_id, name],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(id)
            })
            .await?;
        Ok(id)
    }

    pub async fn get_subject(&self, id: i64) -> Result<Option<Subject>> {
        let subject = self
            .conn
            .call(move |conn| {
                let subject = conn
                    .query_row(
                        "SELECT id, name, syllabus, department_id FROM subjects WHERE id = ?1",
                        params![id],
                        subject_from_row,
                    )
                    .optional()?;
                Ok(subject)
            })
            .await?;
        Ok(subject)
    }

    pub async fn list_subjects(&self, department_id: Option<i64>) -> Result<Vec<Subject>> {
        let subjects = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT id, name, syllabus, department_id FROM subjects
                       WHERE ?1 IS NULL OR department_id = ?1
                       ORDER BY name, id"#,
                )?;
                let subjects = stmt
                    .query_map(params![department_id], subject_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(subjects)
            })
            .await?;
        Ok(subjects)
    }

    /// Total and completed content counts for every subject of a department.
    pub async fn subject_counts(
        &self,
        user_id: i64,
        department_id: i64,
    ) -> Result<Vec<SubjectCounts>> {
        let counts = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT s.id, s.name, s.syllabus, s.department_id,
                              (SELECT COUNT(*) FROM contents c WHERE c.subject_id = s.id),
                              (SELECT COUNT(*) FROM user_content_states u
                                 JOIN contents c ON c.id = u.content_id
                                WHERE c.subject_id = s.id AND u.user_id = ?1 AND u.is_completed = 1)
                       FROM subjects s
                       WHERE s.department_id = ?2
                       ORDER BY s.name, s.id"#,
                )?;
                let counts = stmt
                    .query_map(params![user_id, department_id], |row| {
                        Ok(SubjectCounts {
                            subject: subject_from_row(row)?,
                            total: row.get(4)?,
                            completed: row.get(5)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(counts)
            })
            .await?;
        Ok(counts)
    }

    // Content operations

    pub async fn insert_content(&self, subject_id: i64, content: NewContent) -> Result<i64> {
        if content.title.trim().is_empty() {
            return Err(AppError::validation("Content title must not be empty"));
        }

        let id = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                if !row_exists(&tx, "subjects", subject_id)? {
                    return Ok(None);
                }
                tx.execute(
                    r#"INSERT INTO contents (subject_id, title, content_type, youtube_link,
                           notes, viva_questions, problem_statement, solution_code, explanation)
                       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"#,
                    params![
                        subject_id,
                        content.title.trim(),
                        content.content_type.as_str(),
                        content.youtube_link,
                        content.notes,
                        content.viva_questions,
                        content.problem_statement,
                        content.solution_code,
                        content.explanation,
                    ],
                )?;
                let id = tx.last_insert_rowid();
                tx.commit()?;
                Ok(Some(id))
            })
            .await?;
        id.ok_or(AppError::NotFound("Subject"))
    }

    pub async fn find_content(&self, subject_id: i64, title: &str) -> Result<Option<i64>> {
        let title = title.trim().to_string();
        let id = self
            .conn
            .call(move |conn| {
                let id = conn
                    .query_row(
                        r#"SELECT id FROM contents WHERE subject_id = ?1 AND title = ?2
                           ORDER BY id LIMIT 1"#,
                        params![subject_id, title],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(id)
            })
            .await?;
        Ok(id)
    }

    pub async fn get_content(&self, id: i64) -> Result<Option<Content>> {
        let content = self
            .conn
            .call(move |conn| {
                let content = conn
                    .query_row(
                        &format!("SELECT {CONTENT_COLUMNS} FROM contents c WHERE c.id = ?1"),
                        params![id],
                        content_from_row,
                    )
                    .optional()?;
                Ok(content)
            })
            .await?;
        Ok(content)
    }

    pub async fn contents_for_subject(&self, subject_id: i64) -> Result<Vec<Content>> {
        let contents = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {CONTENT_COLUMNS} FROM contents c \
                     WHERE c.subject_id = ?1 ORDER BY c.created_at, c.id"
                ))?;
                let contents = stmt
                    .query_map(params![subject_id], content_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(contents)
            })
            .await?;
        Ok(contents)
    }

    pub async fn list_contents(&self, filter: ContentFilter) -> Result<Vec<Content>> {
        let mut sql = format!(
            "SELECT {CONTENT_COLUMNS} FROM contents c \
             JOIN subjects s ON s.id = c.subject_id WHERE 1 = 1"
        );
        let mut values: Vec<Value> = Vec::new();

        if let Some(department_id) = filter.department {
            values.push(Value::Integer(department_id));
            sql.push_str(&format!(" AND s.department_id = ?{}", values.len()));
        }
        if let Some(subject_id) = filter.subject {
            values.push(Value::Integer(subject_id));
            sql.push_str(&format!(" AND c.subject_id = ?{}", values.len()));
        }
        if let Some(kind) = filter.kind {
            values.push(Value::Text(kind.as_str().to_string()));
            sql.push_str(&format!(" AND c.content_type = ?{}", values.len()));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            values.push(Value::Text(like_pattern(search.trim())));
            let n = values.len();
            sql.push_str(&format!(
                " AND (c.title LIKE ?{n} ESCAPE '\\' OR c.notes LIKE ?{n} ESCAPE '\\' \
                 OR c.problem_statement LIKE ?{n} ESCAPE '\\')"
            ));
        }
        sql.push_str(" ORDER BY c.created_at, c.id");

        let contents = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let contents = stmt
                    .query_map(params_from_iter(values.iter()), content_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(contents)
            })
            .await?;
        Ok(contents)
    }

    pub async fn revision_contents(&self, user_id: i64) -> Result<Vec<Content>> {
        let contents = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    r#"SELECT {CONTENT_COLUMNS} FROM contents c
                       JOIN user_content_states u ON u.content_id = c.id
                       WHERE u.user_id = ?1 AND u.marked_for_revision = 1
                       ORDER BY c.created_at, c.id"#
                ))?;
                let contents = stmt
                    .query_map(params![user_id], content_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(contents)
            })
            .await?;
        Ok(contents)
    }

    // User operations

    /// Creates a user and their profile. Returns `None` if the username is taken.
    pub async fn insert_user(
        &self,
        username: &str,
        name: &str,
        password_hash: String,
        department_id: i64,
    ) -> Result<Option<i64>> {
        let username = username.to_string();
        let name = name.to_string();
        let id = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                let taken: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)",
                    params![username],
                    |row| row.get(0),
                )?;
                if taken {
                    return Ok(None);
                }
                tx.execute(
                    "INSERT INTO users (username, name, password_hash) VALUES (?1, ?2, ?3)",
                    params![username, name, password_hash],
                )?;
                let id = tx.last_insert_rowid();
                tx.execute(
                    "INSERT INTO user_profiles (user_id, department_id) VALUES (?1, ?2)",
                    params![id, department_id],
                )?;
                tx.commit()?;
                Ok(Some(id))
            })
            .await?;
        Ok(id)
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let user = self
            .conn
            .call(move |conn| {
                let user = conn
                    .query_row(
                        "SELECT id, username, name, password_hash FROM users WHERE id = ?1",
                        params![id],
                        user_from_row,
                    )
                    .optional()?;
                Ok(user)
            })
            .await?;
        Ok(user)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let username = username.to_string();
        let user = self
            .conn
            .call(move |conn| {
                let user = conn
                    .query_row(
                        "SELECT id, username, name, password_hash FROM users WHERE username = ?1",
                        params![username],
                        user_from_row,
                    )
                    .optional()?;
                Ok(user)
            })
            .await?;
        Ok(user)
    }

    // Profile operations

    #[cfg(test)]
    pub async fn get_profile(&self, user_id: i64) -> Result<Option<UserProfile>> {
        let profile = self
            .conn
            .call(move |conn| {
                let profile = conn
                    .query_row(
                        r#"SELECT user_id, current_streak, last_login_date, department_id
                           FROM user_profiles WHERE user_id = ?1"#,
                        params![user_id],
                        profile_from_row,
                    )
                    .optional()?;
                Ok(profile)
            })
            .await?;
        Ok(profile)
    }

    /// Creates the profile if missing, then applies today's login to its
    /// streak. Safe to call any number of times a day.
    pub async fn record_login(
        &self,
        user_id: i64,
        today: NaiveDate,
    ) -> Result<(UserProfile, StreakUpdate)> {
        let result = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                tx.execute(
                    r#"INSERT INTO user_profiles (user_id) VALUES (?1)
                       ON CONFLICT(user_id) DO NOTHING"#,
                    params![user_id],
                )?;
                let mut profile = tx.query_row(
                    r#"SELECT user_id, current_streak, last_login_date, department_id
                       FROM user_profiles WHERE user_id = ?1"#,
                    params![user_id],
                    profile_from_row,
                )?;

                let update =
                    evaluate_streak(profile.current_streak, profile.last_login_date, today);
                if update.changed {
                    tx.execute(
                        r#"UPDATE user_profiles SET current_streak = ?1, last_login_date = ?2
                           WHERE user_id = ?3"#,
                        params![
                            update.streak,
                            update.last_login.format(DATE_FORMAT).to_string(),
                            user_id
                        ],
                    )?;
                    profile.current_streak = update.streak;
                    profile.last_login_date = Some(update.last_login);
                }
                tx.commit()?;
                Ok((profile, update))
            })
            .await?;
        Ok(result)
    }

    // Progress state operations

    /// The user's state for one content item; untouched if never toggled.
    pub async fn get_state(&self, user_id: i64, content_id: i64) -> Result<UserContentState> {
        let state = self
            .conn
            .call(move |conn| {
                let state = conn
                    .query_row(
                        r#"SELECT user_id, content_id, is_completed, marked_for_revision
                           FROM user_content_states WHERE user_id = ?1 AND content_id = ?2"#,
                        params![user_id, content_id],
                        state_from_row,
                    )
                    .optional()?;
                Ok(state)
            })
            .await?;
        Ok(state.unwrap_or_else(|| UserContentState::untouched(user_id, content_id)))
    }

    pub async fn states_for_subject(
        &self,
        user_id: i64,
        subject_id: i64,
    ) -> Result<HashMap<i64, UserContentState>> {
        let states = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT u.user_id, u.content_id, u.is_completed, u.marked_for_revision
                       FROM user_content_states u
                       JOIN contents c ON c.id = u.content_id
                       WHERE u.user_id = ?1 AND c.subject_id = ?2"#,
                )?;
                let states = stmt
                    .query_map(params![user_id, subject_id], state_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(states)
            })
            .await?;
        Ok(states
            .into_iter()
            .map(|state| (state.content_id, state))
            .collect())
    }

    /// Admin listing of stored progress rows.
    pub async fn list_states(&self, filter: StateFilter) -> Result<Vec<UserContentState>> {
        let mut sql = String::from(
            "SELECT user_id, content_id, is_completed, marked_for_revision \
             FROM user_content_states WHERE 1 = 1",
        );
        let mut values: Vec<Value> = Vec::new();
        if let Some(user) = filter.user {
            values.push(Value::Integer(user));
            sql.push_str(&format!(" AND user_id = ?{}", values.len()));
        }
        if let Some(completed) = filter.is_completed {
            values.push(Value::Integer(i64::from(completed)));
            sql.push_str(&format!(" AND is_completed = ?{}", values.len()));
        }
        if let Some(revision) = filter.marked_for_revision {
            values.push(Value::Integer(i64::from(revision)));
            sql.push_str(&format!(" AND marked_for_revision = ?{}", values.len()));
        }
        sql.push_str(" ORDER BY user_id, content_id");

        let states = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let states = stmt
                    .query_map(params_from_iter(values.iter()), state_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(states)
            })
            .await?;
        Ok(states)
    }

    /// Flips one progress flag, creating the state row on first use.
    pub async fn toggle_state(
        &self,
        user_id: i64,
        content_id: i64,
        flag: ProgressFlag,
    ) -> Result<UserContentState> {
        let state = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                tx.execute(
                    r#"INSERT INTO user_content_states (user_id, content_id) VALUES (?1, ?2)
                       ON CONFLICT(user_id, content_id) DO NOTHING"#,
                    params![user_id, content_id],
                )?;
                let mut state = tx.query_row(
                    r#"SELECT user_id, content_id, is_completed, marked_for_revision
                       FROM user_content_states WHERE user_id = ?1 AND content_id = ?2"#,
                    params![user_id, content_id],
                    state_from_row,
                )?;

                flag.apply(&mut state);

                tx.execute(
                    r#"UPDATE user_content_states SET is_completed = ?1, marked_for_revision = ?2
                       WHERE user_id = ?3 AND content_id = ?4"#,
                    params![state.is_completed, state.marked_for_revision, user_id, content_id],
                )?;
                tx.commit()?;
                Ok(state)
            })
            .await?;
        Ok(state)
    }

    // Vote operations

    pub async fn has_voted(&self, user_id: i64, content_id: i64) -> Result<bool> {
        let voted = self
            .conn
            .call(move |conn| {
                let voted: bool = conn.query_row(
                    r#"SELECT EXISTS(SELECT 1 FROM content_votes
                       WHERE content_id = ?1 AND user_id = ?2)"#,
                    params![content_id, user_id],
                    |row| row.get(0),
                )?;
                Ok(voted)
            })
            .await?;
        Ok(voted)
    }

    /// Records one vote per user per content item. Later votes from the same
    /// user are ignored whatever their kind.
    pub async fn cast_vote(
        &self,
        user_id: i64,
        content_id: i64,
        kind: VoteKind,
    ) -> Result<VoteOutcome> {
        let outcome = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                let already_voted: bool = tx.query_row(
                    r#"SELECT EXISTS(SELECT 1 FROM content_votes
                       WHERE content_id = ?1 AND user_id = ?2)"#,
                    params![content_id, user_id],
                    |row| row.get(0),
                )?;
                let mut votes = tx.query_row(
                    "SELECT helpful_votes, unhelpful_votes FROM contents WHERE id = ?1",
                    params![content_id],
                    |row| {
                        Ok(VoteTally {
                            helpful: row.get(0)?,
                            unhelpful: row.get(1)?,
                        })
                    },
                )?;

                let counted = votes.cast(already_voted, kind);
                if counted {
                    tx.execute(
                        "INSERT INTO content_votes (content_id, user_id, kind) VALUES (?1, ?2, ?3)",
                        params![content_id, user_id, kind.as_str()],
                    )?;
                    tx.execute(
                        r#"UPDATE contents SET helpful_votes = ?1, unhelpful_votes = ?2
                           WHERE id = ?3"#,
                        params![votes.helpful, votes.unhelpful, content_id],
                    )?;
                }
                tx.commit()?;
                Ok(VoteOutcome { counted, votes })
            })
            .await?;
        Ok(outcome)
    }
}

fn row_exists(conn: &rusqlite::Connection, table: &str, id: i64) -> rusqlite::Result<bool> {
    conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)"),
        params![id],
        |row| row.get(0),
    )
}

/// Substring pattern for `LIKE … ESCAPE '\'`; the term itself matches literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // SQLite datetime('now') format
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

fn department_from_row(row: &Row) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn subject_from_row(row: &Row) -> rusqlite::Result<Subject> {
    Ok(Subject {
        id: row.get(0)?,
        name: row.get(1)?,
        syllabus: row.get(2)?,
        department_id: row.get(3)?,
    })
}

fn content_from_row(row: &Row) -> rusqlite::Result<Content> {
    let content_type = row
        .get::<_, String>(3)?
        .parse::<ContentKind>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Content {
        id: row.get(0)?,
        subject_id: row.get(1)?,
        title: row.get(2)?,
        content_type,
        youtube_link: row.get(4)?,
        notes: row.get(5)?,
        viva_questions: row.get(6)?,
        problem_statement: row.get(7)?,
        solution_code: row.get(8)?,
        explanation: row.get(9)?,
        created_at: row
            .get::<_, String>(10)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(Utc::now),
        votes: VoteTally {
            helpful: row.get(11)?,
            unhelpful: row.get(12)?,
        },
    })
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        name: row.get(2)?,
        password_hash: row.get(3)?,
    })
}

fn profile_from_row(row: &Row) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        user_id: row.get(0)?,
        current_streak: row.get(1)?,
        last_login_date: row
            .get::<_, Option<String>>(2)?
            .and_then(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT).ok()),
        department_id: row.get(3)?,
    })
}

fn state_from_row(row: &Row) -> rusqlite::Result<UserContentState> {
    Ok(UserContentState {
        user_id: row.get(0)?,
        content_id: row.get(1)?,
        is_completed: row.get(2)?,
        marked_for_revision: row.get(3)?,
    })
}
