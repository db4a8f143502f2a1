use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};

use super::dto::{CreateGradeRequest, GradeListResponse, GradeResponse, UpdateGradeRowRequest};
use crate::entities::grade::{self, grade_within_bounds};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::middleware::permission::require_admin;
use crate::repositories::{GradeRepository, GradeUpdate, SubjectRepository, UserRepository};

pub fn create_route() -> Router {
    Router::new()
        .route("/grades", post(create_grade).get(get_all_grades))
        .route(
            "/grades/{grade_id}",
            get(get_grade).put(update_grade_row).delete(delete_grade),
        )
}

/// Resolves a grade row into its nested response shape.
async fn to_response(grade: grade::Model) -> Result<GradeResponse, ApiError> {
    let user_repo = UserRepository::new();
    let subject_repo = SubjectRepository::new();

    let student = user_repo
        .find_by_id(grade.student_id)
        .await?
        .ok_or_else(|| ApiError::internal("Grade row references a missing student"))?;
    let subject = subject_repo
        .find_by_id(grade.subject_id)
        .await?
        .ok_or_else(|| ApiError::internal("Grade row references a missing subject"))?;

    Ok(GradeResponse::from_parts(grade, student, subject))
}

/// Create a grade row (Admin only)
#[utoipa::path(
    post,
    path = "/grades",
    request_body = CreateGradeRequest,
    responses(
        (status = 201, description = "Grade created", body = GradeResponse),
        (status = 400, description = "Not a student or grade out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Student or subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn create_grade(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateGradeRequest>,
) -> Result<(StatusCode, Json<GradeResponse>), ApiError> {
    require_admin(&auth_claims)?;
    let user_repo = UserRepository::new();
    let subject_repo = SubjectRepository::new();
    let grade_repo = GradeRepository::new();

    let student = user_repo
        .find_by_id(payload.student_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student not found"))?;

    if student.role != RoleEnum::Student {
        return Err(ApiError::bad_request("User is not a student"));
    }

    subject_repo
        .find_by_id(payload.subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subject not found"))?;

    if let Some(value) = payload.grade {
        if !grade_within_bounds(value) {
            return Err(ApiError::bad_request("Grade must be between 0 and 100"));
        }
    }

    let created = grade_repo
        .create(
            payload.student_id,
            payload.subject_id,
            payload.grade,
            payload.semester,
            payload.school_year,
            payload.remarks,
        )
        .await?;

    let response = to_response(created).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all grade rows, newest first
#[utoipa::path(
    get,
    path = "/grades",
    responses(
        (status = 200, description = "Grades retrieved", body = GradeListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn get_all_grades(
    AuthClaims(_auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<GradeListResponse>), ApiError> {
    let grade_repo = GradeRepository::new();

    let grades = grade_repo.find_all().await?;

    let mut rows = Vec::with_capacity(grades.len());
    for grade in grades {
        rows.push(to_response(grade).await?);
    }

    let response = GradeListResponse {
        total: rows.len(),
        grades: rows,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Get grade row by ID
#[utoipa::path(
    get,
    path = "/grades/{grade_id}",
    params(
        ("grade_id" = i32, Path, description = "Grade ID")
    ),
    responses(
        (status = 200, description = "Grade retrieved", body = GradeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Grade not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn get_grade(
    AuthClaims(_auth_claims): AuthClaims,
    Path(grade_id): Path<i32>,
) -> Result<(StatusCode, Json<GradeResponse>), ApiError> {
    let grade_repo = GradeRepository::new();

    let grade = grade_repo
        .find_by_id(grade_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Grade not found"))?;

    let response = to_response(grade).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// Update a grade row (Admin only)
#[utoipa::path(
    put,
    path = "/grades/{grade_id}",
    params(
        ("grade_id" = i32, Path, description = "Grade ID")
    ),
    request_body = UpdateGradeRowRequest,
    responses(
        (status = 200, description = "Grade updated", body = GradeResponse),
        (status = 400, description = "Grade out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Grade not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn update_grade_row(
    AuthClaims(auth_claims): AuthClaims,
    Path(grade_id): Path<i32>,
    Json(payload): Json<UpdateGradeRowRequest>,
) -> Result<(StatusCode, Json<GradeResponse>), ApiError> {
    require_admin(&auth_claims)?;
    let grade_repo = GradeRepository::new();

    grade_repo
        .find_by_id(grade_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Grade not found"))?;

    if let Some(value) = payload.grade {
        if !grade_within_bounds(value) {
            return Err(ApiError::bad_request("Grade must be between 0 and 100"));
        }
    }

    let updates = GradeUpdate {
        grade: payload.grade,
        semester: payload.semester,
        school_year: payload.school_year,
        remarks: payload.remarks,
    };

    let updated = grade_repo.update(grade_id, updates).await?;

    let response = to_response(updated).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// Delete a grade row (Admin only)
#[utoipa::path(
    delete,
    path = "/grades/{grade_id}",
    params(
        ("grade_id" = i32, Path, description = "Grade ID")
    ),
    responses(
        (status = 204, description = "Grade deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Grade not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn delete_grade(
    AuthClaims(auth_claims): AuthClaims,
    Path(grade_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    require_admin(&auth_claims)?;
    let grade_repo = GradeRepository::new();

    grade_repo
        .find_by_id(grade_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Grade not found"))?;

    grade_repo.delete(grade_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
