//! `SeaORM` Entity for grades table
//!
//! A row with `grade = NULL` is an enrollment: the student is registered for
//! the subject but has not been scored yet. Duplicate (student, subject)
//! pairs are allowed because students may retake a subject.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "grades"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub student_id: i32,
    pub subject_id: i32,
    pub grade: Option<Decimal>,
    pub semester: Option<String>,
    pub school_year: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    /// None while ungraded, otherwise whether the grade meets the threshold.
    pub fn is_passing(&self, passing_grade: Decimal) -> Option<bool> {
        self.grade.map(|g| g >= passing_grade)
    }
}

/// Valid grades lie in the inclusive range [0, 100].
pub fn grade_within_bounds(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::from(100)
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    StudentId,
    SubjectId,
    Grade,
    Semester,
    SchoolYear,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    Id,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
    Subject,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::StudentId => ColumnType::Integer.def(),
            Self::SubjectId => ColumnType::Integer.def(),
            Self::Grade => ColumnType::Decimal(Some((5, 2))).def().null(),
            Self::Semester => ColumnType::String(StringLen::N(50)).def().null(),
            Self::SchoolYear => ColumnType::String(StringLen::N(20)).def().null(),
            Self::Remarks => ColumnType::Text.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Student => Entity::belongs_to(super::user::Entity)
                .from(Column::StudentId)
                .to(super::user::Column::Id)
                .into(),
            Self::Subject => Entity::belongs_to(super::subject::Entity)
                .from(Column::SubjectId)
                .to(super::subject::Column::Id)
                .into(),
        }
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn grade_row(value: Option<&str>) -> Model {
        Model {
            id: 1,
            student_id: 2,
            subject_id: 3,
            grade: value.map(|v| Decimal::from_str(v).unwrap()),
            semester: None,
            school_year: None,
            remarks: None,
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(grade_within_bounds(Decimal::ZERO));
        assert!(grade_within_bounds(Decimal::from(100)));
        assert!(!grade_within_bounds(Decimal::from_str("-0.01").unwrap()));
        assert!(!grade_within_bounds(Decimal::from_str("100.01").unwrap()));
    }

    #[test]
    fn ungraded_rows_have_no_passing_state() {
        assert_eq!(grade_row(None).is_passing(Decimal::from(75)), None);
    }

    #[test]
    fn passing_is_threshold_inclusive() {
        let threshold = Decimal::from(75);
        assert_eq!(grade_row(Some("75")).is_passing(threshold), Some(true));
        assert_eq!(grade_row(Some("74.99")).is_passing(threshold), Some(false));
    }
}
