pub use sea_orm_migration::prelude::*;

mod m20260612_093012_create_table_users;
mod m20260612_094447_create_table_students;
mod m20260613_101530_create_table_subjects;
mod m20260613_140211_create_table_marks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260612_093012_create_table_users::Migration),
            Box::new(m20260612_094447_create_table_students::Migration),
            Box::new(m20260613_101530_create_table_subjects::Migration),
            Box::new(m20260613_140211_create_table_marks::Migration),
        ]
    }
}
