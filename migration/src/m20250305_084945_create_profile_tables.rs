use sea_orm_migration::prelude::*;

use crate::m20250304_105428_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Students::GraduationYear).integer())
                    .col(ColumnDef::new(Students::Major).string_len(100))
                    .col(ColumnDef::new(Students::SecondaryMajor).string_len(100))
                    .col(
                        ColumnDef::new(Students::CareerInterests)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Students::CurrentLocation).string_len(100))
                    .col(ColumnDef::new(Students::Bio).text())
                    .col(ColumnDef::new(Students::LinkedinUrl).string_len(255))
                    .col(ColumnDef::new(Students::ResumeUrl).string_len(255))
                    .col(
                        ColumnDef::new(Students::ReputationScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Students::TotalRequests)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Students::SuccessfulIntroductions)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Students::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Students::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_user")
                            .from(Students::Table, Students::Id)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alumni::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Alumni::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Alumni::GraduationYear).integer())
                    .col(ColumnDef::new(Alumni::Degree).string_len(100))
                    .col(ColumnDef::new(Alumni::Major).string_len(100))
                    .col(ColumnDef::new(Alumni::CurrentRole).string_len(100))
                    .col(ColumnDef::new(Alumni::CurrentCompany).string_len(100))
                    .col(ColumnDef::new(Alumni::Industry).string_len(100))
                    .col(ColumnDef::new(Alumni::Location).string_len(100))
                    .col(ColumnDef::new(Alumni::YearsExperience).integer())
                    .col(ColumnDef::new(Alumni::Bio).text())
                    .col(ColumnDef::new(Alumni::LinkedinUrl).string_len(255))
                    .col(
                        ColumnDef::new(Alumni::AvailabilityStatus)
                            .string_len(16)
                            .not_null()
                            .default("open"),
                    )
                    .col(
                        ColumnDef::new(Alumni::MaxRequestsPerMonth)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Alumni::CurrentMonthRequests)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Alumni::HelpfulnessScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Alumni::TotalIntroductions)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Alumni::ResponseRate)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Alumni::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Alumni::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_alumni_user")
                            .from(Alumni::Table, Alumni::Id)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_alumni_career")
                    .table(Alumni::Table)
                    .col(Alumni::Industry)
                    .col(Alumni::CurrentRole)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alumni::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    GraduationYear,
    Major,
    SecondaryMajor,
    CareerInterests,
    CurrentLocation,
    Bio,
    LinkedinUrl,
    ResumeUrl,
    ReputationScore,
    TotalRequests,
    SuccessfulIntroductions,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Alumni {
    Table,
    Id,
    GraduationYear,
    Degree,
    Major,
    CurrentRole,
    CurrentCompany,
    Industry,
    Location,
    YearsExperience,
    Bio,
    LinkedinUrl,
    AvailabilityStatus,
    MaxRequestsPerMonth,
    CurrentMonthRequests,
    HelpfulnessScore,
    TotalIntroductions,
    ResponseRate,
    CreatedAt,
    UpdatedAt,
}
