use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::error::{AppError, Result};
use crate::models::{
    Content, ContentDetail, ContentFilter, Dashboard, Department, SignupForm, StateFilter,
    Subject, SubjectDetail, ToggleOutcome, User, UserContentState, VoteOutcome,
};
use crate::rules::{ProgressFlag, VoteKind};
use crate::tracker::Tracker;

/// Header carrying the id of the user the host has already authenticated.
pub const USER_HEADER: &str = "x-user-id";

type AppState = State<Arc<Tracker>>;

#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Deserialize)]
pub struct VoteForm {
    vote_type: VoteKind,
}

#[derive(Deserialize)]
pub struct DepartmentQuery {
    search: Option<String>,
}

#[derive(Deserialize)]
pub struct SubjectQuery {
    department: Option<i64>,
}

pub fn router(tracker: Arc<Tracker>) -> Router {
    Router::new()
        .route("/departments", get(departments))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/dashboard", get(dashboard))
        .route("/subjects/:id", get(subject_detail))
        .route("/content/:id", get(content_detail))
        .route("/content/:id/toggle_complete", post(toggle_complete))
        .route("/content/:id/toggle_revision", post(toggle_revision))
        .route("/content/:id/feedback", post(feedback))
        .route("/revision-hub", get(revision_hub))
        .route("/admin/departments", get(admin_departments))
        .route("/admin/subjects", get(admin_subjects))
        .route("/admin/content", get(admin_content))
        .route("/admin/states", get(admin_states))
        .layer(TraceLayer::new_for_http())
        .with_state(tracker)
}

pub async fn serve(tracker: Arc<Tracker>, bind_address: &str) -> Result<()> {
    let listener = TcpListener::bind(bind_address).await?;
    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, router(tracker))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn acting_user(headers: &HeaderMap) -> Result<i64> {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .ok_or(AppError::Unauthorized)
}

async fn departments(State(tracker): AppState) -> Result<Json<Vec<Department>>> {
    Ok(Json(tracker.departments().await?))
}

async fn signup(
    State(tracker): AppState,
    Json(form): Json<SignupForm>,
) -> Result<(StatusCode, Json<User>)> {
    let user = tracker.signup(form).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(State(tracker): AppState, Json(form): Json<LoginForm>) -> Result<Json<User>> {
    Ok(Json(tracker.authenticate(&form.username, &form.password).await?))
}

async fn dashboard(State(tracker): AppState, headers: HeaderMap) -> Result<Json<Dashboard>> {
    let user_id = acting_user(&headers)?;
    let today = Local::now().date_naive();
    Ok(Json(tracker.dashboard(user_id, today).await?))
}

async fn subject_detail(
    State(tracker): AppState,
    headers: HeaderMap,
    Path(subject_id): Path<i64>,
) -> Result<Json<SubjectDetail>> {
    let user_id = acting_user(&headers)?;
    Ok(Json(tracker.subject_detail(user_id, subject_id).await?))
}

async fn content_detail(
    State(tracker): AppState,
    headers: HeaderMap,
    Path(content_id): Path<i64>,
) -> Result<Json<ContentDetail>> {
    let user_id = acting_user(&headers)?;
    Ok(Json(tracker.content_detail(user_id, content_id).await?))
}

async fn toggle_complete(
    State(tracker): AppState,
    headers: HeaderMap,
    Path(content_id): Path<i64>,
) -> Result<Json<ToggleOutcome>> {
    let user_id = acting_user(&headers)?;
    let outcome = tracker
        .toggle(user_id, content_id, ProgressFlag::Completed)
        .await?;
    Ok(Json(outcome))
}

async fn toggle_revision(
    State(tracker): AppState,
    headers: HeaderMap,
    Path(content_id): Path<i64>,
) -> Result<Json<ToggleOutcome>> {
    let user_id = acting_user(&headers)?;
    let outcome = tracker
        .toggle(user_id, content_id, ProgressFlag::Revision)
        .await?;
    Ok(Json(outcome))
}

async fn feedback(
    State(tracker): AppState,
    headers: HeaderMap,
    Path(content_id): Path<i64>,
    Json(form): Json<VoteForm>,
) -> Result<Json<VoteOutcome>> {
    let user_id = acting_user(&headers)?;
    Ok(Json(tracker.vote(user_id, content_id, form.vote_type).await?))
}

async fn revision_hub(State(tracker): AppState, headers: HeaderMap) -> Result<Json<Vec<Content>>> {
    let user_id = acting_user(&headers)?;
    Ok(Json(tracker.revision_hub(user_id).await?))
}

// Admin listings

async fn admin_departments(
    State(tracker): AppState,
    Query(query): Query<DepartmentQuery>,
) -> Result<Json<Vec<Department>>> {
    Ok(Json(tracker.repository.list_departments(query.search).await?))
}

async fn admin_subjects(
    State(tracker): AppState,
    Query(query): Query<SubjectQuery>,
) -> Result<Json<Vec<Subject>>> {
    Ok(Json(tracker.repository.list_subjects(query.department).await?))
}

async fn admin_content(
    State(tracker): AppState,
    Query(filter): Query<ContentFilter>,
) -> Result<Json<Vec<Content>>> {
    Ok(Json(tracker.repository.list_contents(filter).await?))
}

async fn admin_states(
    State(tracker): AppState,
    Query(filter): Query<StateFilter>,
) -> Result<Json<Vec<UserContentState>>> {
    Ok(Json(tracker.repository.list_states(filter).await?))
}
