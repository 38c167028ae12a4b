pub mod mark_repository;
pub mod student_repository;
pub mod subject_repository;
pub mod user_repository;

pub use mark_repository::{
    MarkRepository, MarksheetFilter, MarksheetRow, RecentMarkRow, StudentMarkRow,
};
pub use student_repository::{ClassSectionCount, StudentRepository};
pub use subject_repository::SubjectRepository;
pub use user_repository::UserRepository;
