use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Address::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Address::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Address::Line1).string_len(128))
                    .col(ColumnDef::new(Address::Line2).string_len(128))
                    .col(
                        ColumnDef::new(Address::CityOrVillage)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Address::State).string_len(128).not_null())
                    .col(ColumnDef::new(Address::Country).string_len(128).not_null())
                    .col(ColumnDef::new(Address::ZipCode).integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Address::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Address {
    Table,
    Id,
    Line1,
    Line2,
    CityOrVillage,
    State,
    Country,
    ZipCode,
}
