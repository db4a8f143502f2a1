pub use sea_orm_migration::prelude::*;

mod m20260110_000001_create_table_users;
mod m20260110_000002_create_table_subjects;
mod m20260112_101500_create_table_grades;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_table_users::Migration),
            Box::new(m20260110_000002_create_table_subjects::Migration),
            Box::new(m20260112_101500_create_table_grades::Migration),
        ]
    }
}
