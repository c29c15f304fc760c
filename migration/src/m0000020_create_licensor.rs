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
                    .table(Licensor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Licensor::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Licensor::FirstName).string_len(128).not_null())
                    .col(ColumnDef::new(Licensor::LastName).string_len(128).not_null())
                    .col(ColumnDef::new(Licensor::Designation).string_len(128))
                    .col(ColumnDef::new(Licensor::OrganizationName).string_len(128))
                    .col(ColumnDef::new(Licensor::AddressId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("licensor_address_id")
                            .from(Licensor::Table, Licensor::AddressId)
                            .to(Address::Table, Address::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(
                        ColumnDef::new(Licensor::Mobile)
                            .string_len(15)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Licensor::Email)
                            .string_len(254)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Licensor::Status)
                            .string_len(10)
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(Licensor::CreatedAt)
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
            .drop_table(Table::drop().table(Licensor::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Licensor {
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
