use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::aggregate::Tally;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath};
use crate::models::achievement::*;
use crate::state::AppState;
use crate::store::AchievementStore;
use crate::summary::{EmptyCategories, STUDENT_SUBJECT, format_summary};

#[utoipa::path(
    get,
    path = "/",
    tag = "Achievements",
    operation_id = "listAchievements",
    summary = "List achievements with optional filters",
    description = "Returns every achievement matching all supplied filters, oldest first, together with the total and per-event-type counts. Blank filter values are ignored.",
    params(AchievementQuery),
    responses(
        (status = 200, description = "Matching achievements", body = AchievementListResponse),
        (status = 400, description = "Year is not a whole number (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_achievements(
    State(state): State<AppState>,
    Query(query): Query<AchievementQuery>,
) -> Result<Json<AchievementListResponse>, AppError> {
    let filter = query.to_filter()?;
    let records = AchievementStore::new(&state.db).scan(&filter).await?;
    let tally = Tally::of(&records);

    Ok(Json(AchievementListResponse {
        data: records.into_iter().map(Into::into).collect(),
        tally,
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Achievements",
    operation_id = "createAchievement",
    summary = "Record a new achievement",
    request_body = AchievementRequest,
    responses(
        (status = 201, description = "Achievement created", body = AchievementResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(usn = %payload.usn))]
pub async fn create_achievement(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AchievementRequest>,
) -> Result<impl IntoResponse, AppError> {
    let record = payload.validate()?;

    let txn = state.db.begin().await?;
    let store = AchievementStore::new(&txn);
    let id = store.create(record).await?;
    let model = store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Achievement {id} vanished after insert")))?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(AchievementResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Achievements",
    operation_id = "getAchievement",
    summary = "Get an achievement by ID",
    params(("id" = i32, Path, description = "Achievement ID")),
    responses(
        (status = 200, description = "Achievement details", body = AchievementResponse),
        (status = 404, description = "Achievement not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = id))]
pub async fn get_achievement(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<AchievementResponse>, AppError> {
    let model = AchievementStore::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Achievements",
    operation_id = "replaceAchievement",
    summary = "Replace an achievement",
    description = "Overwrites every field of the achievement. Omitting `prize` clears it.",
    params(("id" = i32, Path, description = "Achievement ID")),
    request_body = AchievementRequest,
    responses(
        (status = 200, description = "Achievement replaced", body = AchievementResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Achievement not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = id))]
pub async fn replace_achievement(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<AchievementRequest>,
) -> Result<Json<AchievementResponse>, AppError> {
    let record = payload.validate()?;

    let txn = state.db.begin().await?;
    let model = AchievementStore::new(&txn)
        .update(id, record)
        .await?
        .ok_or_else(|| not_found(id))?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Achievements",
    operation_id = "deleteAchievement",
    summary = "Delete an achievement",
    description = "Idempotent: deleting an ID that does not exist also returns 204.",
    params(("id" = i32, Path, description = "Achievement ID")),
    responses(
        (status = 204, description = "Achievement deleted or already absent"),
    ),
)]
#[instrument(skip(state), fields(id = id))]
pub async fn delete_achievement(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode, AppError> {
    let txn = state.db.begin().await?;
    AchievementStore::new(&txn).delete(id).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{usn}/summary",
    tag = "Students",
    operation_id = "getStudentSummary",
    summary = "Participation summary for one student",
    description = "Counts the student's achievements per event type and returns the summary sentence used on the report page. An unknown USN yields a zero total.",
    params(("usn" = String, Path, description = "Student USN")),
    responses(
        (status = 200, description = "Student summary", body = StudentSummaryResponse),
    ),
)]
#[instrument(skip(state), fields(usn = %usn))]
pub async fn student_summary(
    State(state): State<AppState>,
    AppPath(usn): AppPath<String>,
) -> Result<Json<StudentSummaryResponse>, AppError> {
    let usn = usn.trim().to_string();
    let records = AchievementStore::new(&state.db).get_by_student(&usn).await?;
    let tally = Tally::of(&records);
    let summary = format_summary(
        STUDENT_SUBJECT,
        tally.total,
        &tally.counts,
        EmptyCategories::from_legacy_flag(state.config.report.legacy_empty_clause),
    );

    Ok(Json(StudentSummaryResponse {
        usn,
        total: tally.total,
        counts: tally.counts,
        summary,
    }))
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Achievement {id} not found"))
}
