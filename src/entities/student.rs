//! `SeaORM` Entity for students table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::StudentStatus;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "students"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub roll_number: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<Date>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub class_id: Option<i32>,
    pub section: Option<String>,
    pub academic_year: Option<String>,
    pub status: StudentStatus,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    AdmissionNumber,
    FirstName,
    LastName,
    RollNumber,
    Gender,
    DateOfBirth,
    Email,
    Phone,
    Address,
    ClassId,
    Section,
    AcademicYear,
    Status,
    CreatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    Id,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Marks,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::AdmissionNumber => ColumnType::String(StringLen::None).def().unique(),
            Self::FirstName => ColumnType::String(StringLen::None).def(),
            Self::LastName => ColumnType::String(StringLen::None).def(),
            Self::RollNumber => ColumnType::String(StringLen::None).def().unique(),
            Self::Gender => ColumnType::String(StringLen::None).def().null(),
            Self::DateOfBirth => ColumnType::Date.def().null(),
            Self::Email => ColumnType::String(StringLen::None).def().null(),
            Self::Phone => ColumnType::String(StringLen::None).def().null(),
            Self::Address => ColumnType::String(StringLen::None).def().null(),
            Self::ClassId => ColumnType::Integer.def().null(),
            Self::Section => ColumnType::String(StringLen::None).def().null(),
            Self::AcademicYear => ColumnType::String(StringLen::None).def().null(),
            Self::Status => StudentStatus::db_type(),
            Self::CreatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Marks => Entity::has_many(super::mark::Entity).into(),
        }
    }
}

impl Related<super::mark::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
