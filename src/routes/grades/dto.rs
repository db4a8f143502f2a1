use sea_orm::prelude::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{grade, subject, user};
use crate::routes::subjects::dto::SubjectResponse;
use crate::routes::users::dto::UserResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGradeRequest {
    #[schema(example = 7)]
    pub student_id: i32,

    #[schema(example = 3)]
    pub subject_id: i32,

    #[schema(value_type = Option<f64>, example = 85.5)]
    pub grade: Option<Decimal>,

    #[schema(example = "1st Semester 2026")]
    pub semester: Option<String>,

    #[schema(example = "2026-2027")]
    pub school_year: Option<String>,

    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateGradeRowRequest {
    #[schema(value_type = Option<f64>, example = 85.5)]
    pub grade: Option<Decimal>,
    pub semester: Option<String>,
    pub school_year: Option<String>,
    pub remarks: Option<String>,
}

/// Grade rows are serialized with their student and subject nested, the way
/// the listing is consumed by clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct GradeResponse {
    pub id: i32,
    pub student: UserResponse,
    pub subject: SubjectResponse,
    #[schema(value_type = Option<f64>)]
    pub grade: Option<Decimal>,
    pub semester: Option<String>,
    pub school_year: Option<String>,
    pub remarks: Option<String>,
}

impl GradeResponse {
    pub fn from_parts(grade: grade::Model, student: user::Model, subject: subject::Model) -> Self {
        Self {
            id: grade.id,
            student: student.into(),
            subject: subject.into(),
            grade: grade.grade,
            semester: grade.semester,
            school_year: grade.school_year,
            remarks: grade.remarks,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeListResponse {
    pub total: usize,
    pub grades: Vec<GradeResponse>,
}
