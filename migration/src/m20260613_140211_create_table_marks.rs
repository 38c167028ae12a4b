use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Marks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Marks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Marks::StudentId).integer().not_null())
                    // Nullable on purpose: deleting a subject keeps the mark,
                    // which then resolves to the "Unknown" label.
                    .col(ColumnDef::new(Marks::SubjectId).integer().null())
                    .col(ColumnDef::new(Marks::ExamType).string().not_null())
                    .col(ColumnDef::new(Marks::MarksObtained).double().not_null())
                    .col(
                        ColumnDef::new(Marks::MaxMarks)
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .col(ColumnDef::new(Marks::ExamDate).date().not_null())
                    .col(ColumnDef::new(Marks::AcademicYear).string().not_null())
                    .col(
                        ColumnDef::new(Marks::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marks_student")
                            .from_tbl(Marks::Table)
                            .from_col(Marks::StudentId)
                            .to_tbl(Students::Table)
                            .to_col(Students::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marks_subject")
                            .from_tbl(Marks::Table)
                            .from_col(Marks::SubjectId)
                            .to_tbl(Subjects::Table)
                            .to_col(Subjects::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_marks_student_id")
                    .table(Marks::Table)
                    .col(Marks::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_marks_student_year")
                    .table(Marks::Table)
                    .col(Marks::StudentId)
                    .col(Marks::AcademicYear)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_marks_academic_year")
                    .table(Marks::Table)
                    .col(Marks::AcademicYear)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_marks_academic_year")
                    .table(Marks::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_marks_student_year")
                    .table(Marks::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_marks_student_id")
                    .table(Marks::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Marks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Marks {
    Table,
    Id,
    StudentId,
    SubjectId,
    ExamType,
    MarksObtained,
    MaxMarks,
    ExamDate,
    AcademicYear,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    Id,
}
