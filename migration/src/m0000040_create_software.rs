use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Software::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Software::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Software::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Software::Specification).text())
                    .col(ColumnDef::new(Software::UserGuideDocument).string_len(255))
                    .col(ColumnDef::new(Software::Indemnity).text())
                    .col(
                        ColumnDef::new(Software::Status)
                            .string_len(10)
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(Software::CreatedAt)
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
            .drop_table(Table::drop().table(Software::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Software {
    Table,
    Id,
    Name,
    Specification,
    UserGuideDocument,
    Indemnity,
    Status,
    CreatedAt,
}
