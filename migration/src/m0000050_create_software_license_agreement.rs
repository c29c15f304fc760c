use crate::{
    m0000020_create_licensor::Licensor, m0000030_create_licensee::Licensee,
    m0000040_create_software::Software,
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SoftwareLicenseAgreement::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SoftwareLicenseAgreement::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SoftwareLicenseAgreement::EffectiveDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SoftwareLicenseAgreement::LicensorId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("agreement_licensor_id")
                            .from(
                                SoftwareLicenseAgreement::Table,
                                SoftwareLicenseAgreement::LicensorId,
                            )
                            .to(Licensor::Table, Licensor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(
                        ColumnDef::new(SoftwareLicenseAgreement::LicenseeId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("agreement_licensee_id")
                            .from(
                                SoftwareLicenseAgreement::Table,
                                SoftwareLicenseAgreement::LicenseeId,
                            )
                            .to(Licensee::Table, Licensee::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(
                        ColumnDef::new(SoftwareLicenseAgreement::SoftwareId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("agreement_software_id")
                            .from(
                                SoftwareLicenseAgreement::Table,
                                SoftwareLicenseAgreement::SoftwareId,
                            )
                            .to(Software::Table, Software::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(SoftwareLicenseAgreement::ValidIpAddresses).text())
                    .col(
                        ColumnDef::new(SoftwareLicenseAgreement::TermsAndConditions)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SoftwareLicenseAgreement::LimitationOfLiability).text())
                    .col(ColumnDef::new(SoftwareLicenseAgreement::Termination).text())
                    .col(
                        ColumnDef::new(SoftwareLicenseAgreement::ExpiryDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SoftwareLicenseAgreement::Price)
                            .decimal_len(7, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SoftwareLicenseAgreement::PaymentPlan).text())
                    .col(
                        ColumnDef::new(SoftwareLicenseAgreement::NoOfCopies)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SoftwareLicenseAgreement::DeliveryDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SoftwareLicenseAgreement::WarrantyPeriod).integer())
                    .col(ColumnDef::new(SoftwareLicenseAgreement::MaintenanceAgreement).text())
                    .col(
                        ColumnDef::new(SoftwareLicenseAgreement::Status)
                            .string_len(10)
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(SoftwareLicenseAgreement::CreatedAt)
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
            .drop_table(
                Table::drop()
                    .table(SoftwareLicenseAgreement::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum SoftwareLicenseAgreement {
    Table,
    Id,
    EffectiveDate,
    LicensorId,
    LicenseeId,
    SoftwareId,
    ValidIpAddresses,
    TermsAndConditions,
    LimitationOfLiability,
    Termination,
    ExpiryDate,
    Price,
    PaymentPlan,
    NoOfCopies,
    DeliveryDate,
    WarrantyPeriod,
    MaintenanceAgreement,
    Status,
    CreatedAt,
}
