use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Visits::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Visits::VisitorId).uuid().not_null())
                    .col(ColumnDef::new(Visits::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Visits::Purpose).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Visits::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Visits::EndedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Visits::Status)
                            .string_len(20)
                            .not_null()
                            .default("ongoing"),
                    )
                    .col(
                        ColumnDef::new(Visits::SmsSentAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Visits::Notes).text().not_null().default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Visits::Table, Visits::VisitorId)
                            .to(Visitors::Table, Visitors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Visits::Table, Visits::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Visits::Table)
                    .col(Visits::EmployeeId)
                    .name("idx_visits_employee_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Visits::Table)
                    .col(Visits::StartedAt)
                    .name("idx_visits_started_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visits::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Visits {
    Table,
    Id,
    VisitorId,
    EmployeeId,
    Purpose,
    StartedAt,
    EndedAt,
    Status,
    SmsSentAt,
    Notes,
}

#[derive(Iden)]
enum Visitors {
    Table,
    Id,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
}
