use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visitors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Visitors::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Visitors::FullName).string_len(120).not_null())
                    .col(ColumnDef::new(Visitors::Email).string_len(254).not_null())
                    .col(ColumnDef::new(Visitors::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(Visitors::Address).text().not_null())
                    .col(ColumnDef::new(Visitors::PhotoRef).string_len(255).null())
                    .col(ColumnDef::new(Visitors::GovtIdType).string_len(20).null())
                    .col(ColumnDef::new(Visitors::GovtIdRef).string_len(255).null())
                    .col(
                        ColumnDef::new(Visitors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visitors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Visitors {
    Table,
    Id,
    FullName,
    Email,
    Phone,
    Address,
    PhotoRef,
    GovtIdType,
    GovtIdRef,
    CreatedAt,
}
