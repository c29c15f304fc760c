use crate::m0000010_create_address::Address;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Licensee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Licensee::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Licensee::FirstName).string_len(128).not_null())
                    .col(ColumnDef::new(Licensee::LastName).string_len(128).not_null())
                    .col(ColumnDef::new(Licensee::Designation).string_len(128))
                    .col(ColumnDef::new(Licensee::OrganizationName).string_len(128))
                    .col(ColumnDef::new(Licensee::AddressId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("licensee_address_id")
                            .from(Licensee::Table, Licensee::AddressId)
                            .to(Address::Table, Address::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(
                        ColumnDef::new(Licensee::Mobile)
                            .string_len(15)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Licensee::Email)
                            .string_len(254)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Licensee::Status)
                            .string_len(10)
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(Licensee::CreatedAt)
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
            .drop_table(Table::drop().table(Licensee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Licensee {
    Table,
    Id,
    FirstName,
    LastName,
    Designation,
    OrganizationName,
    AddressId,
    Mobile,
    Email,
    Status,
    CreatedAt,
}
