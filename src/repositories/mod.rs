pub mod grade_repository;
pub mod subject_repository;
pub mod user_repository;

pub use grade_repository::{GradeRepository, GradeUpdate};
pub use subject_repository::{SubjectRepository, SubjectUpdate};
pub use user_repository::{UserRepository, UserUpdate};
