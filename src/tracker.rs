use std::collections::HashSet;

use chrono::NaiveDate;

use crate::db::Repository;
use crate::error::{AppError, Result};
use crate::models::{
    Content, ContentDetail, ContentEntry, Dashboard, Department, SignupForm, Subject,
    SubjectDetail, SubjectProgress, ToggleOutcome, User, VoteOutcome,
};
use crate::password::{hash_password, verify_password};
use crate::rules::{completion_percentage, syllabus_coverage, ProgressFlag, VoteKind};

/// The request handlers. Every operation takes the acting user explicitly.
pub struct Tracker {
    pub repository: Repository,
}

impl Tracker {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn departments(&self) -> Result<Vec<Department>> {
        self.repository.list_departments(None).await
    }

    pub async fn signup(&self, form: SignupForm) -> Result<User> {
        if form.password != form.password_confirm {
            return Err(AppError::validation("Passwords do not match"));
        }
        let username = form.username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if form.password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }
        if self.repository.get_user_by_username(username).await?.is_some() {
            tracing::warn!("Signup rejected, username {} is taken", username);
            return Err(AppError::validation("Username already exists"));
        }
        self.repository
            .get_department(form.department_id)
            .await?
            .ok_or(AppError::NotFound("Department"))?;

        let password_hash = hash_password(&form.password)?;
        let id = self
            .repository
            .insert_user(username, form.name.trim(), password_hash, form.department_id)
            .await?
            .ok_or_else(|| AppError::validation("Username already exists"))?;

        tracing::info!("Created user {} ({})", username, id);
        self.user(id).await
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        match self.repository.get_user_by_username(username.trim()).await? {
            Some(user) if verify_password(password, &user.password_hash) => Ok(user),
            _ => Err(AppError::validation("Invalid username or password")),
        }
    }

    /// Looks up the acting user, rejecting identities that do not exist.
    pub async fn user(&self, user_id: i64) -> Result<User> {
        self.repository
            .get_user(user_id)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    pub async fn dashboard(&self, user_id: i64, today: NaiveDate) -> Result<Dashboard> {
        self.user(user_id).await?;

        let (profile, streak) = self.repository.record_login(user_id, today).await?;
        if streak.changed {
            tracing::debug!(
                "User {} streak now {} (increased: {})",
                user_id,
                streak.streak,
                streak.increased
            );
        }

        let user_department = match profile.department_id {
            Some(id) => self.repository.get_department(id).await?,
            None => None,
        };

        let subject_progress = match &user_department {
            Some(department) => self
                .repository
                .subject_counts(user_id, department.id)
                .await?
                .into_iter()
                .map(|counts| SubjectProgress {
                    percentage: completion_percentage(counts.completed, counts.total),
                    subject: counts.subject,
                })
                .collect(),
            None => Vec::new(),
        };

        Ok(Dashboard {
            subject_progress,
            current_streak: profile.current_streak,
            streak_increased: streak.increased,
            user_department,
        })
    }

    pub async fn subject_detail(&self, user_id: i64, subject_id: i64) -> Result<SubjectDetail> {
        self.user(user_id).await?;
        let subject = self.subject(subject_id).await?;

        let contents = self.repository.contents_for_subject(subject_id).await?;
        let mut states = self.repository.states_for_subject(user_id, subject_id).await?;

        let content_list: Vec<ContentEntry> = contents
            .into_iter()
            .map(|content| {
                let state = states.remove(&content.id);
                ContentEntry {
                    is_completed: state.as_ref().is_some_and(|s| s.is_completed),
                    marked_for_revision: state.as_ref().is_some_and(|s| s.marked_for_revision),
                    content,
                }
            })
            .collect();

        let completed_titles: HashSet<String> = content_list
            .iter()
            .filter(|entry| entry.is_completed)
            .map(|entry| entry.content.title.clone())
            .collect();
        let syllabus_topics = syllabus_coverage(subject.syllabus.as_deref(), &completed_titles);

        Ok(SubjectDetail {
            total_content_count: content_list.len(),
            completed_content_count: completed_titles.len(),
            syllabus_topics,
            content_list,
            subject,
        })
    }

    pub async fn content_detail(&self, user_id: i64, content_id: i64) -> Result<ContentDetail> {
        self.user(user_id).await?;
        let content = self.content(content_id).await?;
        let state = self.repository.get_state(user_id, content_id).await?;
        let has_voted = self.repository.has_voted(user_id, content_id).await?;

        Ok(ContentDetail {
            content,
            state,
            has_voted,
        })
    }

    pub async fn toggle(
        &self,
        user_id: i64,
        content_id: i64,
        flag: ProgressFlag,
    ) -> Result<ToggleOutcome> {
        self.user(user_id).await?;
        let content = self.content(content_id).await?;

        let state = self
            .repository
            .toggle_state(user_id, content_id, flag)
            .await?;
        tracing::debug!("User {} toggled {:?} on content {}", user_id, flag, content_id);

        Ok(ToggleOutcome {
            state,
            subject_id: content.subject_id,
        })
    }

    pub async fn revision_hub(&self, user_id: i64) -> Result<Vec<Content>> {
        self.user(user_id).await?;
        self.repository.revision_contents(user_id).await
    }

    pub async fn vote(&self, user_id: i64, content_id: i64, kind: VoteKind) -> Result<VoteOutcome> {
        self.user(user_id).await?;
        self.content(content_id).await?;

        let outcome = self.repository.cast_vote(user_id, content_id, kind).await?;
        if outcome.counted {
            tracing::debug!("User {} voted {} on content {}", user_id, kind.as_str(), content_id);
        } else {
            tracing::debug!("User {} already voted on content {}", user_id, content_id);
        }
        Ok(outcome)
    }

    async fn subject(&self, subject_id: i64) -> Result<Subject> {
        self.repository
            .get_subject(subject_id)
            .await?
            .ok_or(AppError::NotFound("Subject"))
    }

    async fn content(&self, content_id: i64) -> Result<Content> {
        self.repository
            .get_content(content_id)
            .await?
            .ok_or(AppError::NotFound("Content"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::models::{ContentKind, NewContent, NewSubject};
    use crate::rules::VoteTally;

    struct Fixture {
        tracker: Tracker,
        department: i64,
        subject: i64,
        user: i64,
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 15).unwrap()
    }

    fn form(username: &str, department_id: i64) -> SignupForm {
        SignupForm {
            username: username.to_string(),
            name: "Student".to_string(),
            password: "s3cret".to_string(),
            password_confirm: "s3cret".to_string(),
            department_id,
        }
    }

    fn content(title: &str) -> NewContent {
        NewContent {
            title: title.to_string(),
            content_type: ContentKind::Theory,
            youtube_link: None,
            notes: None,
            viva_questions: None,
            problem_statement: None,
            solution_code: None,
            explanation: None,
        }
    }

    async fn fixture() -> Fixture {
        let repository = Repository::in_memory().await.unwrap();
        let department = repository.insert_department("CSAI").await.unwrap();
        let subject = repository
            .insert_subject(NewSubject {
                name: "OOP".to_string(),
                syllabus: Some("Classes\nInheritance\nTemplates".to_string()),
                department_id: department,
            })
            .await
            .unwrap();
        let tracker = Tracker::new(repository);
        let user = tracker.signup(form("ada", department)).await.unwrap().id;
        Fixture {
            tracker,
            department,
            subject,
            user,
        }
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let f = fixture().await;

        let mut mismatch = form("grace", f.department);
        mismatch.password_confirm = "other".to_string();
        let err = f.tracker.signup(mismatch).await.unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");

        let err = f.tracker.signup(form("ada", f.department)).await.unwrap_err();
        assert_eq!(err.to_string(), "Username already exists");

        let err = f.tracker.signup(form("grace", 999)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Department")));

        let err = f.tracker.signup(form("   ", f.department)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let f = fixture().await;
        let user = assert_ok!(f.tracker.authenticate("ada", "s3cret").await);
        assert_eq!(user.id, f.user);
        assert_err!(f.tracker.authenticate("ada", "wrong").await);
        assert_err!(f.tracker.authenticate("nobody", "s3cret").await);
    }

    #[tokio::test]
    async fn test_unknown_user_is_unauthorized() {
        let f = fixture().await;
        let err = f.tracker.dashboard(f.user + 50, today()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_dashboard_streak_and_progress() {
        let f = fixture().await;
        let repo = &f.tracker.repository;
        let first = repo.insert_content(f.subject, content("Classes")).await.unwrap();
        repo.insert_content(f.subject, content("Inheritance")).await.unwrap();
        repo.insert_content(f.subject, content("Templates")).await.unwrap();
        f.tracker
            .toggle(f.user, first, ProgressFlag::Completed)
            .await
            .unwrap();

        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        let dashboard = f.tracker.dashboard(f.user, yesterday).await.unwrap();
        assert_eq!(dashboard.current_streak, 1);
        assert!(!dashboard.streak_increased);

        let dashboard = f.tracker.dashboard(f.user, today()).await.unwrap();
        assert_eq!(dashboard.current_streak, 2);
        assert!(dashboard.streak_increased);
        assert_eq!(dashboard.user_department.unwrap().name, "CSAI");
        assert_eq!(dashboard.subject_progress.len(), 1);
        assert_eq!(dashboard.subject_progress[0].percentage, 33);

        let again = f.tracker.dashboard(f.user, today()).await.unwrap();
        assert_eq!(again.current_streak, 2);
        assert!(!again.streak_increased);
    }

    #[tokio::test]
    async fn test_streak_continues_from_yesterday() {
        let f = fixture().await;
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        for offset in (0..4).rev() {
            let day = yesterday.checked_sub_days(Days::new(offset)).unwrap();
            f.tracker.dashboard(f.user, day).await.unwrap();
        }
        let profile = f.tracker.repository.get_profile(f.user).await.unwrap().unwrap();
        assert_eq!(profile.current_streak, 4);
        assert_eq!(profile.last_login_date, Some(yesterday));

        let dashboard = f.tracker.dashboard(f.user, today()).await.unwrap();
        assert_eq!(dashboard.current_streak, 5);
        assert!(dashboard.streak_increased);
        let profile = f.tracker.repository.get_profile(f.user).await.unwrap().unwrap();
        assert_eq!(profile.last_login_date, Some(today()));
    }

    #[tokio::test]
    async fn test_subject_detail() {
        let f = fixture().await;
        let repo = &f.tracker.repository;
        let classes = repo.insert_content(f.subject, content("Classes")).await.unwrap();
        let templates = repo.insert_content(f.subject, content("Templates")).await.unwrap();
        repo.insert_content(f.subject, content("Extra reading")).await.unwrap();

        f.tracker
            .toggle(f.user, classes, ProgressFlag::Completed)
            .await
            .unwrap();
        f.tracker
            .toggle(f.user, templates, ProgressFlag::Revision)
            .await
            .unwrap();

        let detail = f.tracker.subject_detail(f.user, f.subject).await.unwrap();
        assert_eq!(detail.total_content_count, 3);
        assert_eq!(detail.completed_content_count, 1);

        let classes_entry = &detail.content_list[0];
        assert!(classes_entry.is_completed);
        assert!(!classes_entry.marked_for_revision);
        let templates_entry = &detail.content_list[1];
        assert!(!templates_entry.is_completed);
        assert!(templates_entry.marked_for_revision);

        let covered: Vec<bool> = detail.syllabus_topics.iter().map(|t| t.covered).collect();
        assert_eq!(covered, vec![true, false, false]);

        let err = f.tracker.subject_detail(f.user, 999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Subject")));
    }

    #[tokio::test]
    async fn test_toggle_and_revision_hub() {
        let f = fixture().await;
        let id = f
            .tracker
            .repository
            .insert_content(f.subject, content("Classes"))
            .await
            .unwrap();

        let outcome = f.tracker.toggle(f.user, id, ProgressFlag::Revision).await.unwrap();
        assert_eq!(outcome.subject_id, f.subject);
        assert!(outcome.state.marked_for_revision);

        let hub = f.tracker.revision_hub(f.user).await.unwrap();
        assert_eq!(hub.len(), 1);
        assert_eq!(hub[0].id, id);

        f.tracker.toggle(f.user, id, ProgressFlag::Revision).await.unwrap();
        assert!(f.tracker.revision_hub(f.user).await.unwrap().is_empty());

        let err = f
            .tracker
            .toggle(f.user, 999, ProgressFlag::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("Content")));
    }

    #[tokio::test]
    async fn test_vote_and_content_detail() {
        let f = fixture().await;
        let id = f
            .tracker
            .repository
            .insert_content(f.subject, content("Classes"))
            .await
            .unwrap();

        let detail = f.tracker.content_detail(f.user, id).await.unwrap();
        assert!(!detail.has_voted);
        assert!(!detail.state.is_completed);

        let outcome = f.tracker.vote(f.user, id, VoteKind::Unhelpful).await.unwrap();
        assert!(outcome.counted);
        let outcome = f.tracker.vote(f.user, id, VoteKind::Unhelpful).await.unwrap();
        assert!(!outcome.counted);
        assert_eq!(outcome.votes, VoteTally { helpful: 0, unhelpful: 1 });

        let detail = f.tracker.content_detail(f.user, id).await.unwrap();
        assert!(detail.has_voted);
        assert_eq!(detail.content.votes, VoteTally { helpful: 0, unhelpful: 1 });

        let err = f.tracker.vote(f.user, 999, VoteKind::Helpful).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Content")));
    }

    #[tokio::test]
    async fn test_profile_without_department_sees_no_subjects() {
        let f = fixture().await;
        f.tracker
            .repository
            .insert_content(f.subject, content("Classes"))
            .await
            .unwrap();
        let iot = f.tracker.repository.insert_department("IOT").await.unwrap();
        let grace = f.tracker.signup(form("grace", iot)).await.unwrap().id;
        f.tracker.repository.delete_department(iot).await.unwrap();

        let dashboard = f.tracker.dashboard(grace, today()).await.unwrap();
        assert!(dashboard.user_department.is_none());
        assert!(dashboard.subject_progress.is_empty());
        assert_eq!(dashboard.current_streak, 1);
    }
}
