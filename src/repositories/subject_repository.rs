use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::subject;
use crate::static_service::DATABASE_CONNECTION;

pub struct SubjectRepository;

impl SubjectRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Subjects list alphabetically everywhere they are exposed.
    pub async fn find_all(&self) -> Result<Vec<subject::Model>> {
        let db = self.get_connection();
        let subjects = subject::Entity::find()
            .order_by_asc(subject::Column::Name)
            .all(db)
            .await?;
        Ok(subjects)
    }

    pub async fn find_by_id(&self, subject_id: i32) -> Result<Option<subject::Model>> {
        let db = self.get_connection();
        let subject = subject::Entity::find_by_id(subject_id).one(db).await?;
        Ok(subject)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<subject::Model>> {
        let db = self.get_connection();
        let subject = subject::Entity::find()
            .filter(subject::Column::Name.eq(name))
            .one(db)
            .await?;
        Ok(subject)
    }

    pub async fn create(&self, name: String, description: Option<String>) -> Result<subject::Model> {
        let db = self.get_connection();
        let now = Utc::now().naive_utc();
        let subject_model = subject::ActiveModel {
            name: Set(name),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = subject_model.insert(db).await?;
        Ok(result)
    }

    pub async fn update(&self, subject_id: i32, updates: SubjectUpdate) -> Result<subject::Model> {
        let subject = self
            .find_by_id(subject_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Subject not found"))?;
        let db = self.get_connection();

        let mut active_model: subject::ActiveModel = subject.into();

        if let Some(name) = updates.name {
            active_model.name = Set(name);
        }
        if let Some(description) = updates.description {
            active_model.description = Set(Some(description));
        }

        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    pub async fn delete(&self, subject_id: i32) -> Result<DeleteResult> {
        let db = self.get_connection();
        let result = subject::Entity::delete_by_id(subject_id).exec(db).await?;
        Ok(result)
    }
}

#[derive(Default)]
pub struct SubjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
