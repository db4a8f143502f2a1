use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{grade, user};
use crate::static_service::DATABASE_CONNECTION;
use crate::utils::email::normalize_email;

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_all(&self) -> Result<Vec<user::Model>> {
        let db = self.get_connection();
        let users = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(db)
            .await?;
        Ok(users)
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<user::Model>> {
        let db = self.get_connection();
        let user = user::Entity::find_by_id(user_id).one(db).await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        let db = self.get_connection();
        let user = user::Entity::find()
            .filter(user::Column::Email.eq(normalize_email(email)))
            .one(db)
            .await?;
        Ok(user)
    }

    /// Looks up a user that must carry the student role.
    pub async fn find_student_by_id(&self, user_id: i32) -> Result<Option<user::Model>> {
        let db = self.get_connection();
        let student = user::Entity::find_by_id(user_id)
            .filter(user::Column::Role.eq(RoleEnum::Student))
            .one(db)
            .await?;
        Ok(student)
    }

    pub async fn create(
        &self,
        email: String,
        first_name: String,
        last_name: String,
        hashed_password: String,
        role: RoleEnum,
    ) -> Result<user::Model> {
        let db = self.get_connection();
        let now = Utc::now().naive_utc();
        let user_model = user::ActiveModel {
            email: Set(normalize_email(&email)),
            first_name: Set(first_name),
            last_name: Set(last_name),
            password: Set(hashed_password),
            role: Set(role),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = user_model.insert(db).await?;
        Ok(result)
    }

    pub async fn update(&self, user_id: i32, updates: UserUpdate) -> Result<user::Model> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found"))?;
        let db = self.get_connection();

        let mut active_user: user::ActiveModel = user.into();

        if let Some(email) = updates.email {
            active_user.email = Set(normalize_email(&email));
        }
        if let Some(first_name) = updates.first_name {
            active_user.first_name = Set(first_name);
        }
        if let Some(last_name) = updates.last_name {
            active_user.last_name = Set(last_name);
        }
        if let Some(hashed_password) = updates.password {
            active_user.password = Set(hashed_password);
        }
        if let Some(role) = updates.role {
            active_user.role = Set(role);
        }
        if let Some(is_active) = updates.is_active {
            active_user.is_active = Set(is_active);
        }

        active_user.updated_at = Set(Utc::now().naive_utc());

        let result = active_user.update(db).await?;
        Ok(result)
    }

    /// Deleting a user deletes that user's grade rows. The foreign key also
    /// cascades; the explicit cleanup keeps the rule visible here.
    pub async fn delete(&self, user_id: i32) -> Result<DeleteResult> {
        let db = self.get_connection();

        grade::Entity::delete_many()
            .filter(grade::Column::StudentId.eq(user_id))
            .exec(db)
            .await?;

        let result = user::Entity::delete_by_id(user_id).exec(db).await?;
        Ok(result)
    }
}

#[derive(Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub role: Option<RoleEnum>,
    pub is_active: Option<bool>,
}
