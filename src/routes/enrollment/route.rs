use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, post, put},
};

use super::dto::{
    EnrollResponse, RemoveStudentResponse, UpdateGradeRequest, UpdateGradeResponse,
    parse_grade_value,
};
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::middleware::permission::{require_admin, require_student};
use crate::repositories::{GradeRepository, SubjectRepository, UserRepository};

pub fn create_route() -> Router {
    Router::new()
        .route("/subjects/{subject_id}/enroll", post(enroll_subject))
        .route(
            "/subjects/{subject_id}/remove/{student_id}",
            delete(remove_student),
        )
        .route(
            "/subjects/{subject_id}/update-grade/{student_id}",
            put(update_student_grade),
        )
}

/// Enroll the authenticated student in a subject
#[utoipa::path(
    post,
    path = "/subjects/{subject_id}/enroll",
    params(
        ("subject_id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 201, description = "Enrolled", body = EnrollResponse),
        (status = 400, description = "Already enrolled"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Student only"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollment"
)]
pub async fn enroll_subject(
    AuthClaims(auth_claims): AuthClaims,
    Path(subject_id): Path<i32>,
) -> Result<(StatusCode, Json<EnrollResponse>), ApiError> {
    require_student(&auth_claims)?;
    let subject_repo = SubjectRepository::new();
    let grade_repo = GradeRepository::new();
    let user_repo = UserRepository::new();

    let subject = subject_repo
        .find_by_id(subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subject not found"))?;

    let existing = grade_repo
        .find_by_student_and_subject(auth_claims.sub, subject_id)
        .await?;
    if existing.is_some() {
        return Err(ApiError::bad_request(
            "You are already enrolled in this subject",
        ));
    }

    let student = user_repo
        .find_by_id(auth_claims.sub)
        .await?
        .ok_or_else(|| ApiError::not_found("Student not found"))?;

    let enrollment = grade_repo
        .create_enrollment(auth_claims.sub, subject_id)
        .await?;

    let response = EnrollResponse {
        message: format!("Successfully enrolled in {}", subject.name),
        subject: subject.name,
        student: student.full_name(),
        grade: enrollment.grade,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Remove a student from a subject (Admin only)
///
/// Only ungraded enrollments can be removed.
#[utoipa::path(
    delete,
    path = "/subjects/{subject_id}/remove/{student_id}",
    params(
        ("subject_id" = i32, Path, description = "Subject ID"),
        ("student_id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student removed", body = RemoveStudentResponse),
        (status = 400, description = "Student already has a grade"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Subject, student or enrollment not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollment"
)]
pub async fn remove_student(
    AuthClaims(auth_claims): AuthClaims,
    Path((subject_id, student_id)): Path<(i32, i32)>,
) -> Result<(StatusCode, Json<RemoveStudentResponse>), ApiError> {
    require_admin(&auth_claims)?;
    let subject_repo = SubjectRepository::new();
    let user_repo = UserRepository::new();
    let grade_repo = GradeRepository::new();

    let subject = subject_repo
        .find_by_id(subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subject not found"))?;

    let student = user_repo
        .find_student_by_id(student_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student not found"))?;

    let enrollment = grade_repo
        .find_by_student_and_subject(student_id, subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student is not enrolled in this subject"))?;

    if enrollment.grade.is_some() {
        return Err(ApiError::bad_request(
            "Student already has a grade and cannot be removed",
        ));
    }

    grade_repo.delete_model(enrollment).await?;

    let response = RemoveStudentResponse {
        message: format!("Removed {} from {}", student.full_name(), subject.name),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Set a student's grade in a subject (Admin only)
#[utoipa::path(
    put,
    path = "/subjects/{subject_id}/update-grade/{student_id}",
    params(
        ("subject_id" = i32, Path, description = "Subject ID"),
        ("student_id" = i32, Path, description = "Student ID")
    ),
    request_body = UpdateGradeRequest,
    responses(
        (status = 200, description = "Grade updated", body = UpdateGradeResponse),
        (status = 400, description = "Missing, non-numeric or out-of-range grade"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Subject, student or enrollment not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollment"
)]
pub async fn update_student_grade(
    AuthClaims(auth_claims): AuthClaims,
    Path((subject_id, student_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateGradeRequest>,
) -> Result<(StatusCode, Json<UpdateGradeResponse>), ApiError> {
    require_admin(&auth_claims)?;
    let subject_repo = SubjectRepository::new();
    let user_repo = UserRepository::new();
    let grade_repo = GradeRepository::new();

    let subject = subject_repo
        .find_by_id(subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subject not found"))?;

    let student = user_repo
        .find_student_by_id(student_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student not found"))?;

    let enrollment = grade_repo
        .find_by_student_and_subject(student_id, subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student is not enrolled in this subject"))?;

    // Validation happens before any write; bad input leaves the row untouched.
    let grade_value = parse_grade_value(payload.grade.as_ref())?;

    let updated = grade_repo.set_grade(enrollment, grade_value).await?;

    let response = UpdateGradeResponse {
        message: format!(
            "Updated grade of {} in {} to {}",
            student.full_name(),
            subject.name,
            grade_value
        ),
        student: student.full_name(),
        subject: subject.name,
        grade: updated.grade.unwrap_or(grade_value),
    };

    Ok((StatusCode::OK, Json(response)))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::prelude::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use serde_json::json;

    use super::*;
    use crate::entities::sea_orm_active_enums::RoleEnum;
    use crate::entities::{grade, subject, user};
    use crate::routes::subjects::route::delete_subject;
    use crate::static_service::DATABASE_CONNECTION;
    use crate::utils::jwt::TokenClaims;

    fn claims(sub: i32, role: RoleEnum) -> TokenClaims {
        TokenClaims {
            sub,
            name: "Test User".to_string(),
            role,
            iat: 0,
            exp: i64::MAX,
        }
    }

    fn math() -> subject::Model {
        subject::Model {
            id: 3,
            name: "Mathematics".to_string(),
            description: None,
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    fn ana() -> user::Model {
        user::Model {
            id: 7,
            email: "ana.reyes@example.com".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            password: "hash".to_string(),
            role: RoleEnum::Student,
            is_active: true,
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    fn enrollment_row(grade: Option<Decimal>) -> grade::Model {
        grade::Model {
            id: 11,
            student_id: 7,
            subject_id: 3,
            grade,
            semester: None,
            school_year: None,
            remarks: None,
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    // The handlers read one process-global connection, so the whole
    // enrollment lifecycle runs in a single test against one mock with
    // results queued in the order the handlers issue their queries.
    #[tokio::test]
    async fn enrollment_lifecycle_enforces_business_rules() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // enroll: subject lookup, no existing row, student lookup, insert
            .append_query_results([vec![math()]])
            .append_query_results([Vec::<grade::Model>::new()])
            .append_query_results([vec![ana()]])
            .append_query_results([vec![enrollment_row(None)]])
            // second enroll: subject lookup, existing row found
            .append_query_results([vec![math()]])
            .append_query_results([vec![enrollment_row(None)]])
            // update-grade to 85: subject, student, enrollment, update
            .append_query_results([vec![math()]])
            .append_query_results([vec![ana()]])
            .append_query_results([vec![enrollment_row(None)]])
            .append_query_results([vec![enrollment_row(Some(Decimal::from(85)))]])
            // remove: subject, student, graded enrollment
            .append_query_results([vec![math()]])
            .append_query_results([vec![ana()]])
            .append_query_results([vec![enrollment_row(Some(Decimal::from(85)))]])
            // update-grade to 150: subject, student, enrollment; no write
            .append_query_results([vec![math()]])
            .append_query_results([vec![ana()]])
            .append_query_results([vec![enrollment_row(Some(Decimal::from(85)))]])
            // subject delete: subject lookup, grade count
            .append_query_results([vec![math()]])
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(1)),
            )])]])
            .into_connection();
        DATABASE_CONNECTION.set(db).ok();

        let student = claims(7, RoleEnum::Student);
        let admin = claims(1, RoleEnum::Admin);

        let (status, Json(enrolled)) = enroll_subject(AuthClaims(student.clone()), Path(3))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(enrolled.subject, "Mathematics");
        assert_eq!(enrolled.student, "Ana Reyes");
        assert_eq!(enrolled.grade, None);

        let duplicate = enroll_subject(AuthClaims(student), Path(3))
            .await
            .unwrap_err();
        assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
        assert_eq!(duplicate.message, "You are already enrolled in this subject");

        let (status, Json(updated)) = update_student_grade(
            AuthClaims(admin.clone()),
            Path((3, 7)),
            Json(UpdateGradeRequest {
                grade: Some(json!(85)),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated.grade, Decimal::from(85));

        let removal = remove_student(AuthClaims(admin.clone()), Path((3, 7)))
            .await
            .unwrap_err();
        assert_eq!(removal.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            removal.message,
            "Student already has a grade and cannot be removed"
        );

        let out_of_range = update_student_grade(
            AuthClaims(admin.clone()),
            Path((3, 7)),
            Json(UpdateGradeRequest {
                grade: Some(json!(150)),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);
        assert_eq!(out_of_range.message, "Grade must be between 0 and 100");

        let blocked = delete_subject(AuthClaims(admin), Path(3)).await.unwrap_err();
        assert_eq!(blocked.status, StatusCode::BAD_REQUEST);
        assert_eq!(blocked.message, "Cannot delete subject with existing grades");
    }
}
