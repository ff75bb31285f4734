//! Axum route handlers for the Applications API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub job_description: Option<String>,
    pub applied_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateApplicationRequest {
    pub company: Option<String>,
    pub position: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub job_description: Option<String>,
    pub applied_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CreateApplicationRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("company", Some(&self.company))?;
        require_text("position", Some(&self.position))
    }
}

impl UpdateApplicationRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("company", self.company.as_deref())?;
        require_text("position", self.position.as_deref())
    }
}

/// A present value must not be blank.
fn require_text(field: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(AppError::Validation(format!(
            "{field} cannot be empty"
        ))),
        _ => Ok(()),
    }
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let rows = sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id.0)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    request.validate()?;

    let row = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications
            (id, user_id, company, position, status, job_description, applied_on, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id.0)
    .bind(request.company.trim())
    .bind(request.position.trim())
    .bind(request.status.as_str())
    .bind(&request.job_description)
    .bind(request.applied_on)
    .bind(&request.notes)
    .fetch_one(&state.db)
    .await?;

    info!("Created application {} for user {}", row.id, user_id);
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationRow>, AppError> {
    let row = sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id.0)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| not_found(id))?;

    Ok(Json(row))
}

/// PATCH /api/v1/applications/:id
pub async fn handle_update_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateApplicationRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    request.validate()?;

    let row = sqlx::query_as::<_, ApplicationRow>(
        r#"
        UPDATE applications SET
            company = COALESCE($1, company),
            position = COALESCE($2, position),
            status = COALESCE($3, status),
            job_description = COALESCE($4, job_description),
            applied_on = COALESCE($5, applied_on),
            notes = COALESCE($6, notes),
            updated_at = NOW()
        WHERE id = $7 AND user_id = $8
        RETURNING *
        "#,
    )
    .bind(request.company.as_deref().map(str::trim))
    .bind(request.position.as_deref().map(str::trim))
    .bind(request.status.map(ApplicationStatus::as_str))
    .bind(&request.job_description)
    .bind(request.applied_on)
    .bind(&request.notes)
    .bind(id)
    .bind(user_id.0)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| not_found(id))?;

    Ok(Json(row))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM applications WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id.0)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }

    info!("Deleted application {} for user {}", id, user_id);
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Application {id} not found"))
}
