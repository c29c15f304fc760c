use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Sms::Mobile)
                            .string_len(15)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Sms::Message).text())
                    .col(
                        ColumnDef::new(Sms::Status)
                            .string_len(10)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Sms::CreatedAt)
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
            .drop_table(Table::drop().table(Sms::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Sms {
    Table,
    Id,
    Mobile,
    Message,
    Status,
    CreatedAt,
}
