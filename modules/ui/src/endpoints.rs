use crate::{agreement, dashboard, party, software, user};
use actix_web::web;
use licensing_common::db::Database;
use licensing_module_fundamental::{
    account::service::AccountService, agreement::service::AgreementService,
    party::{service::PartyService, PartyKind},
    software::service::SoftwareService,
};
use licensing_module_storage::service::fs::FileSystemBackend;

/// The services backing the pages.
pub struct Services {
    pub parties: PartyService,
    pub softwares: SoftwareService,
    pub agreements: AgreementService,
    pub accounts: AccountService,
}

impl Services {
    pub fn new(db: Database, storage: FileSystemBackend) -> Self {
        Self {
            parties: PartyService::new(db.clone()),
            softwares: SoftwareService::new(db.clone(), storage),
            agreements: AgreementService::new(db.clone()),
            accounts: AccountService::new(db),
        }
    }
}

/// Mount the pages below `/license`.
pub fn configure(svc: &mut web::ServiceConfig, db: Database, storage: FileSystemBackend) {
    svc.service(
        web::scope("/license")
            .app_data(web::Data::new(Services::new(db, storage)))
            .configure(dashboard::configure)
            .configure(user::configure)
            .configure(|svc| party::configure(svc, PartyKind::Licensor))
            .configure(|svc| party::configure(svc, PartyKind::Licensee))
            .configure(software::configure)
            .configure(agreement::configure),
    );
}
