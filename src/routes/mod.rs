pub mod auth;
pub mod enrollment;
pub mod grades;
pub mod health;
pub mod subjects;
pub mod users;
