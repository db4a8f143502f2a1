pub mod grade;
pub mod sea_orm_active_enums;
pub mod subject;
pub mod user;
