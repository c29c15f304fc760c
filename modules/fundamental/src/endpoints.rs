use actix_web::web;
use licensing_common::db::Database;
use licensing_module_storage::service::fs::FileSystemBackend;

/// Register the REST API of all records, relative to the `/api` scope.
pub fn configure(svc: &mut web::ServiceConfig, db: Database, storage: FileSystemBackend) {
    crate::account::endpoints::configure(svc, db.clone());
    crate::agreement::endpoints::configure(svc, db.clone());
    crate::party::endpoints::configure(svc, db.clone());
    crate::software::endpoints::configure(svc, db, storage);
}
