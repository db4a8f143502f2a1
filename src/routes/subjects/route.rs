use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use super::dto::{
    CreateSubjectRequest, EnrolledStudentEntry, SubjectDetailAdminResponse,
    SubjectDetailStudentResponse, SubjectListResponse, SubjectResponse, UpdateSubjectRequest,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::middleware::permission::require_admin;
use crate::repositories::{GradeRepository, SubjectRepository, SubjectUpdate};

pub fn create_route() -> Router {
    Router::new()
        .route("/subjects", post(create_subject).get(get_all_subjects))
        .route(
            "/subjects/{subject_id}",
            get(get_subject).put(update_subject).delete(delete_subject),
        )
        .route("/subjects/{subject_id}/details", get(subject_details))
        .route("/public/subjects", get(public_subjects))
}

/// Create a new subject (Admin only)
#[utoipa::path(
    post,
    path = "/subjects",
    request_body = CreateSubjectRequest,
    responses(
        (status = 201, description = "Subject created", body = SubjectResponse),
        (status = 400, description = "Duplicate subject name"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn create_subject(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<SubjectResponse>), ApiError> {
    require_admin(&auth_claims)?;
    let subject_repo = SubjectRepository::new();

    if subject_repo.find_by_name(&payload.name).await?.is_some() {
        return Err(ApiError::bad_request(
            "A subject with this name already exists",
        ));
    }

    let subject = subject_repo
        .create(payload.name, payload.description)
        .await?;

    Ok((StatusCode::CREATED, Json(subject.into())))
}

/// Get all subjects, ordered by name
#[utoipa::path(
    get,
    path = "/subjects",
    responses(
        (status = 200, description = "Subjects retrieved", body = SubjectListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn get_all_subjects(
    AuthClaims(_auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<SubjectListResponse>), ApiError> {
    let subject_repo = SubjectRepository::new();

    let subjects = subject_repo.find_all().await?;

    let response = SubjectListResponse {
        total: subjects.len(),
        subjects: subjects.into_iter().map(SubjectResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Get subject by ID
#[utoipa::path(
    get,
    path = "/subjects/{subject_id}",
    params(
        ("subject_id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject retrieved", body = SubjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn get_subject(
    AuthClaims(_auth_claims): AuthClaims,
    Path(subject_id): Path<i32>,
) -> Result<(StatusCode, Json<SubjectResponse>), ApiError> {
    let subject_repo = SubjectRepository::new();

    let subject = subject_repo
        .find_by_id(subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subject not found"))?;

    Ok((StatusCode::OK, Json(subject.into())))
}

/// Update subject (Admin only)
#[utoipa::path(
    put,
    path = "/subjects/{subject_id}",
    params(
        ("subject_id" = i32, Path, description = "Subject ID")
    ),
    request_body = UpdateSubjectRequest,
    responses(
        (status = 200, description = "Subject updated", body = SubjectResponse),
        (status = 400, description = "Duplicate subject name"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn update_subject(
    AuthClaims(auth_claims): AuthClaims,
    Path(subject_id): Path<i32>,
    Json(payload): Json<UpdateSubjectRequest>,
) -> Result<(StatusCode, Json<SubjectResponse>), ApiError> {
    require_admin(&auth_claims)?;
    let subject_repo = SubjectRepository::new();

    let subject = subject_repo
        .find_by_id(subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subject not found"))?;

    if let Some(ref name) = payload.name {
        if let Some(existing) = subject_repo.find_by_name(name).await? {
            if existing.id != subject.id {
                return Err(ApiError::bad_request(
                    "A subject with this name already exists",
                ));
            }
        }
    }

    let updates = SubjectUpdate {
        name: payload.name,
        description: payload.description,
    };

    let updated = subject_repo.update(subject_id, updates).await?;

    Ok((StatusCode::OK, Json(updated.into())))
}

/// Delete subject (Admin only). Blocked while any grade row references it.
#[utoipa::path(
    delete,
    path = "/subjects/{subject_id}",
    params(
        ("subject_id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 204, description = "Subject deleted"),
        (status = 400, description = "Subject still has grades"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn delete_subject(
    AuthClaims(auth_claims): AuthClaims,
    Path(subject_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    require_admin(&auth_claims)?;
    let subject_repo = SubjectRepository::new();
    let grade_repo = GradeRepository::new();

    subject_repo
        .find_by_id(subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subject not found"))?;

    let grade_count = grade_repo.count_by_subject(subject_id).await?;
    if grade_count > 0 {
        return Err(ApiError::bad_request(
            "Cannot delete subject with existing grades",
        ));
    }

    subject_repo.delete(subject_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Subject detail, shaped by the caller's role. Admins get the full roster;
/// students get only their own grade and remarks.
#[utoipa::path(
    get,
    path = "/subjects/{subject_id}/details",
    params(
        ("subject_id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Roster for admins, own grade for students", body = SubjectDetailAdminResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied - neither admin nor student"),
        (status = 404, description = "Subject not found or not enrolled"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn subject_details(
    AuthClaims(auth_claims): AuthClaims,
    Path(subject_id): Path<i32>,
) -> Result<Response, ApiError> {
    let subject_repo = SubjectRepository::new();
    let grade_repo = GradeRepository::new();

    let subject = subject_repo
        .find_by_id(subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subject not found"))?;

    match auth_claims.role {
        RoleEnum::Admin => {
            let rows = grade_repo.find_by_subject_with_students(subject_id).await?;

            let students: Vec<EnrolledStudentEntry> = rows
                .into_iter()
                .filter_map(|(grade, student)| {
                    student.map(|s| EnrolledStudentEntry {
                        student: s.full_name(),
                        email: s.email,
                        grade: grade.grade,
                        remarks: grade.remarks,
                    })
                })
                .collect();

            let response = SubjectDetailAdminResponse {
                subject: subject.name,
                total_students: students.len(),
                students,
            };

            Ok((StatusCode::OK, Json(response)).into_response())
        }
        RoleEnum::Student => {
            let grade = grade_repo
                .find_by_student_and_subject(auth_claims.sub, subject_id)
                .await?
                .ok_or_else(|| ApiError::not_found("You are not enrolled in this subject"))?;

            let response = SubjectDetailStudentResponse {
                subject: subject.name,
                grade: grade.grade,
                remarks: grade.remarks,
            };

            Ok((StatusCode::OK, Json(response)).into_response())
        }
        RoleEnum::Other => Err(ApiError::forbidden("Access denied")),
    }
}

/// Public subject listing - no authentication, no grade data
#[utoipa::path(
    get,
    path = "/public/subjects",
    responses(
        (status = 200, description = "Subjects retrieved", body = [SubjectResponse])
    ),
    tag = "Subjects"
)]
pub async fn public_subjects() -> Result<(StatusCode, Json<Vec<SubjectResponse>>), ApiError> {
    let subject_repo = SubjectRepository::new();

    let subjects = subject_repo.find_all().await?;

    Ok((
        StatusCode::OK,
        Json(subjects.into_iter().map(SubjectResponse::from).collect()),
    ))
}
