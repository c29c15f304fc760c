pub use sea_orm_migration::prelude::*;

mod m0000010_create_address;
mod m0000020_create_licensor;
mod m0000030_create_licensee;
mod m0000040_create_software;
mod m0000050_create_software_license_agreement;
mod m0000060_create_sms;
mod m0000070_create_account;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m0000010_create_address::Migration),
            Box::new(m0000020_create_licensor::Migration),
            Box::new(m0000030_create_licensee::Migration),
            Box::new(m0000040_create_software::Migration),
            Box::new(m0000050_create_software_license_agreement::Migration),
            Box::new(m0000060_create_sms::Migration),
            Box::new(m0000070_create_account::Migration),
        ]
    }
}
