use anyhow::Result;
use chrono::Utc;
use sea_orm::prelude::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{grade, user};
use crate::static_service::DATABASE_CONNECTION;

pub struct GradeRepository;

impl GradeRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Newest rows first, matching the model's default ordering.
    pub async fn find_all(&self) -> Result<Vec<grade::Model>> {
        let db = self.get_connection();
        let grades = grade::Entity::find()
            .order_by_desc(grade::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(grades)
    }

    pub async fn find_by_id(&self, grade_id: i32) -> Result<Option<grade::Model>> {
        let db = self.get_connection();
        let grade = grade::Entity::find_by_id(grade_id).one(db).await?;
        Ok(grade)
    }

    /// The most recent enrollment row for the pair, if any. Retakes produce
    /// several rows; the special endpoints operate on the latest one.
    pub async fn find_by_student_and_subject(
        &self,
        student_id: i32,
        subject_id: i32,
    ) -> Result<Option<grade::Model>> {
        let db = self.get_connection();
        let grade = grade::Entity::find()
            .filter(grade::Column::StudentId.eq(student_id))
            .filter(grade::Column::SubjectId.eq(subject_id))
            .order_by_desc(grade::Column::CreatedAt)
            .one(db)
            .await?;
        Ok(grade)
    }

    /// Subject roster with each row's student, for the admin detail view.
    pub async fn find_by_subject_with_students(
        &self,
        subject_id: i32,
    ) -> Result<Vec<(grade::Model, Option<user::Model>)>> {
        let db = self.get_connection();
        let rows = grade::Entity::find()
            .filter(grade::Column::SubjectId.eq(subject_id))
            .order_by_desc(grade::Column::CreatedAt)
            .find_also_related(user::Entity)
            .all(db)
            .await?;
        Ok(rows)
    }

    pub async fn count_by_subject(&self, subject_id: i32) -> Result<u64> {
        let db = self.get_connection();
        let count = grade::Entity::find()
            .filter(grade::Column::SubjectId.eq(subject_id))
            .count(db)
            .await?;
        Ok(count)
    }

    pub async fn create(
        &self,
        student_id: i32,
        subject_id: i32,
        grade_value: Option<Decimal>,
        semester: Option<String>,
        school_year: Option<String>,
        remarks: Option<String>,
    ) -> Result<grade::Model> {
        let db = self.get_connection();
        let now = Utc::now().naive_utc();
        let grade_model = grade::ActiveModel {
            student_id: Set(student_id),
            subject_id: Set(subject_id),
            grade: Set(grade_value),
            semester: Set(semester),
            school_year: Set(school_year),
            remarks: Set(remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = grade_model.insert(db).await?;
        Ok(result)
    }

    /// An enrollment is a grade row with no grade value yet.
    pub async fn create_enrollment(&self, student_id: i32, subject_id: i32) -> Result<grade::Model> {
        self.create(student_id, subject_id, None, None, None, None)
            .await
    }

    pub async fn update(&self, grade_id: i32, updates: GradeUpdate) -> Result<grade::Model> {
        let grade = self
            .find_by_id(grade_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Grade not found"))?;
        let db = self.get_connection();

        let mut active_model: grade::ActiveModel = grade.into();

        if let Some(grade_value) = updates.grade {
            active_model.grade = Set(Some(grade_value));
        }
        if let Some(semester) = updates.semester {
            active_model.semester = Set(Some(semester));
        }
        if let Some(school_year) = updates.school_year {
            active_model.school_year = Set(Some(school_year));
        }
        if let Some(remarks) = updates.remarks {
            active_model.remarks = Set(Some(remarks));
        }

        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    pub async fn set_grade(&self, grade: grade::Model, value: Decimal) -> Result<grade::Model> {
        let db = self.get_connection();

        let mut active_model: grade::ActiveModel = grade.into();
        active_model.grade = Set(Some(value));
        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    pub async fn delete(&self, grade_id: i32) -> Result<DeleteResult> {
        let db = self.get_connection();
        let result = grade::Entity::delete_by_id(grade_id).exec(db).await?;
        Ok(result)
    }

    pub async fn delete_model(&self, grade: grade::Model) -> Result<DeleteResult> {
        let db = self.get_connection();
        let active_model: grade::ActiveModel = grade.into();
        let result = active_model.delete(db).await?;
        Ok(result)
    }
}

#[derive(Default)]
pub struct GradeUpdate {
    pub grade: Option<Decimal>,
    pub semester: Option<String>,
    pub school_year: Option<String>,
    pub remarks: Option<String>,
}
