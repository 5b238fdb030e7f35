//! Browser-facing pages. GET shows a form or a listing, POST performs the
//! action and either renders the result or redirects.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use maud::Markup;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::aggregate::Tally;
use crate::error::{AppError, PageError};
use crate::extractors::{PageForm, PagePath};
use crate::models::achievement::{AchievementForm, AchievementQuery, StudentLookupForm};
use crate::report::render_report;
use crate::state::AppState;
use crate::store::{AchievementFilter, AchievementStore};
use crate::summary::{COHORT_SUBJECT, EmptyCategories, STUDENT_SUBJECT, format_summary};
use crate::utils::download::{PDF_CONTENT_TYPE, attachment};
use crate::views::{self, FormMode};

fn page(markup: Markup) -> Html<String> {
    Html(markup.into_string())
}

/// Re-render a form with its validation message.
fn rejected(markup: Markup) -> Response {
    (StatusCode::BAD_REQUEST, page(markup)).into_response()
}

pub async fn home() -> Html<String> {
    page(views::home())
}

pub async fn student_menu() -> Html<String> {
    page(views::student_menu())
}

pub async fn teacher_menu() -> Html<String> {
    page(views::teacher_menu())
}

pub async fn add_form() -> Html<String> {
    page(views::achievement_form(
        FormMode::Add,
        &AchievementForm::default(),
        None,
    ))
}

#[instrument(skip(state, form), fields(usn = %form.usn))]
pub async fn add_achievement(
    State(state): State<AppState>,
    PageForm(form): PageForm<AchievementForm>,
) -> Result<Response, PageError> {
    let record = match form.validate() {
        Ok(record) => record,
        Err(AppError::Validation(msg)) => {
            return Ok(rejected(views::achievement_form(FormMode::Add, &form, Some(&msg))));
        }
        Err(other) => return Err(other.into()),
    };

    let txn = state.db.begin().await?;
    AchievementStore::new(&txn).create(record).await?;
    txn.commit().await?;

    Ok(Redirect::to("/").into_response())
}

pub async fn student_view_form() -> Html<String> {
    page(views::student_lookup(
        "My Achievements",
        "/student/view",
        "",
        None,
    ))
}

#[instrument(skip(state, form), fields(usn = %form.usn))]
pub async fn student_view(
    State(state): State<AppState>,
    PageForm(form): PageForm<StudentLookupForm>,
) -> Result<Response, PageError> {
    let usn = match form.validate() {
        Ok(usn) => usn,
        Err(AppError::Validation(msg)) => {
            return Ok(rejected(views::student_lookup(
                "My Achievements",
                "/student/view",
                &form.usn,
                Some(&msg),
            )));
        }
        Err(other) => return Err(other.into()),
    };

    let records = AchievementStore::new(&state.db).get_by_student(usn).await?;
    let tally = Tally::of(&records);

    Ok(page(views::student_view(usn, &records, &tally)).into_response())
}

pub async fn student_report_form() -> Html<String> {
    page(views::student_lookup(
        "Summary Report",
        "/student/report",
        "",
        None,
    ))
}

#[instrument(skip(state, form), fields(usn = %form.usn))]
pub async fn student_report(
    State(state): State<AppState>,
    PageForm(form): PageForm<StudentLookupForm>,
) -> Result<Response, PageError> {
    let usn = match form.validate() {
        Ok(usn) => usn,
        Err(AppError::Validation(msg)) => {
            return Ok(rejected(views::student_lookup(
                "Summary Report",
                "/student/report",
                &form.usn,
                Some(&msg),
            )));
        }
        Err(other) => return Err(other.into()),
    };

    let records = AchievementStore::new(&state.db).get_by_student(usn).await?;
    let tally = Tally::of(&records);
    let summary = format_summary(
        STUDENT_SUBJECT,
        tally.total,
        &tally.counts,
        empty_mode(&state),
    );

    Ok(page(views::student_report(usn, &summary)).into_response())
}

#[instrument(skip(state, query))]
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<AchievementQuery>,
) -> Result<Html<String>, PageError> {
    let filter = query.to_filter()?;
    let records = AchievementStore::new(&state.db).scan(&filter).await?;
    let tally = Tally::of(&records);

    Ok(page(views::dashboard(&query, &records, &tally)))
}

#[instrument(skip(state), fields(id = id))]
pub async fn delete_achievement(
    State(state): State<AppState>,
    PagePath(id): PagePath<i32>,
) -> Result<Redirect, PageError> {
    let txn = state.db.begin().await?;
    AchievementStore::new(&txn).delete(id).await?;
    txn.commit().await?;

    Ok(Redirect::to("/dashboard"))
}

#[instrument(skip(state), fields(id = id))]
pub async fn edit_form(
    State(state): State<AppState>,
    PagePath(id): PagePath<i32>,
) -> Result<Html<String>, PageError> {
    let model = AchievementStore::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(page(views::achievement_form(
        FormMode::Edit(id),
        &AchievementForm::from(&model),
        None,
    )))
}

#[instrument(skip(state, form), fields(id = id))]
pub async fn edit_achievement(
    State(state): State<AppState>,
    PagePath(id): PagePath<i32>,
    PageForm(form): PageForm<AchievementForm>,
) -> Result<Response, PageError> {
    if AchievementStore::new(&state.db).get_by_id(id).await?.is_none() {
        return Err(not_found(id).into());
    }

    let record = match form.validate() {
        Ok(record) => record,
        Err(AppError::Validation(msg)) => {
            return Ok(rejected(views::achievement_form(
                FormMode::Edit(id),
                &form,
                Some(&msg),
            )));
        }
        Err(other) => return Err(other.into()),
    };

    let txn = state.db.begin().await?;
    AchievementStore::new(&txn)
        .update(id, record)
        .await?
        .ok_or_else(|| not_found(id))?;
    txn.commit().await?;

    Ok(Redirect::to("/dashboard").into_response())
}

/// The NBA report: every record, summarised, as a PDF download.
#[instrument(skip(state))]
pub async fn teacher_report(State(state): State<AppState>) -> Result<Response, PageError> {
    let records = AchievementStore::new(&state.db)
        .scan(&AchievementFilter::default())
        .await?;
    let tally = Tally::of(&records);
    let summary = format_summary(
        COHORT_SUBJECT,
        tally.total,
        &tally.counts,
        empty_mode(&state),
    );

    let report = &state.config.report;
    let bytes = render_report(&report.title, &summary)?;
    tracing::info!(total = tally.total, size = bytes.len(), "Rendered report");

    Ok(attachment(bytes, PDF_CONTENT_TYPE, &report.filename)?)
}

fn empty_mode(state: &AppState) -> EmptyCategories {
    EmptyCategories::from_legacy_flag(state.config.report.legacy_empty_clause)
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Achievement {id} not found"))
}
