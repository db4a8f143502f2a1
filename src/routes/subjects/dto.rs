use sea_orm::prelude::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::subject;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSubjectRequest {
    #[schema(example = "Mathematics")]
    pub name: String,

    #[schema(example = "Algebra, geometry and calculus")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Public subject representation. Never carries grade or student data.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<subject::Model> for SubjectResponse {
    fn from(subject: subject::Model) -> Self {
        Self {
            id: subject.id,
            name: subject.name,
            description: subject.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectListResponse {
    pub total: usize,
    pub subjects: Vec<SubjectResponse>,
}

/// One roster entry in the admin detail view.
#[derive(Debug, Serialize, ToSchema)]
pub struct EnrolledStudentEntry {
    pub student: String,
    pub email: String,
    pub grade: Option<Decimal>,
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectDetailAdminResponse {
    pub subject: String,
    pub total_students: usize,
    pub students: Vec<EnrolledStudentEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectDetailStudentResponse {
    pub subject: String,
    pub grade: Option<Decimal>,
    pub remarks: Option<String>,
}
