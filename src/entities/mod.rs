pub mod sea_orm_active_enums;

pub mod mark;
pub mod student;
pub mod subject;
pub mod user;
