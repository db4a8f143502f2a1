use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::route::health,
        routes::auth::route::login,
        routes::users::route::create_user,
        routes::users::route::get_all_users,
        routes::users::route::get_user,
        routes::users::route::update_user,
        routes::users::route::delete_user,
        routes::subjects::route::create_subject,
        routes::subjects::route::get_all_subjects,
        routes::subjects::route::get_subject,
        routes::subjects::route::update_subject,
        routes::subjects::route::delete_subject,
        routes::subjects::route::subject_details,
        routes::subjects::route::public_subjects,
        routes::grades::route::create_grade,
        routes::grades::route::get_all_grades,
        routes::grades::route::get_grade,
        routes::grades::route::update_grade_row,
        routes::grades::route::delete_grade,
        routes::enrollment::route::enroll_subject,
        routes::enrollment::route::remove_student,
        routes::enrollment::route::update_student_grade,
    ),
    components(
        schemas(
            RoleEnum,
            routes::auth::dto::LoginRequest,
            routes::auth::dto::LoginResponse,
            routes::users::dto::CreateUserRequest,
            routes::users::dto::UpdateUserRequest,
            routes::users::dto::UserResponse,
            routes::users::dto::UserListResponse,
            routes::subjects::dto::CreateSubjectRequest,
            routes::subjects::dto::UpdateSubjectRequest,
            routes::subjects::dto::SubjectResponse,
            routes::subjects::dto::SubjectListResponse,
            routes::subjects::dto::EnrolledStudentEntry,
            routes::subjects::dto::SubjectDetailAdminResponse,
            routes::subjects::dto::SubjectDetailStudentResponse,
            routes::grades::dto::CreateGradeRequest,
            routes::grades::dto::UpdateGradeRowRequest,
            routes::grades::dto::GradeResponse,
            routes::grades::dto::GradeListResponse,
            routes::enrollment::dto::EnrollResponse,
            routes::enrollment::dto::RemoveStudentResponse,
            routes::enrollment::dto::UpdateGradeRequest,
            routes::enrollment::dto::UpdateGradeResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Users", description = "User management"),
        (name = "Subjects", description = "Subject management and detail views"),
        (name = "Grades", description = "Grade row management"),
        (name = "Enrollment", description = "Enrollment and grade assignment")
    ),
    info(
        title = "Gradebook Service API",
        description = "Student grading backend: users, subjects, grades and enrollment"
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
