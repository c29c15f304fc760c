#![allow(clippy::expect_used)]

pub mod auth;
pub mod call;

use licensing_common::{
    config,
    db::{CreationMode, Database},
};
use licensing_module_storage::service::fs::FileSystemBackend;
use std::env;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tracing::instrument;

/// A fresh, migrated database and an empty document storage.
#[allow(dead_code)]
pub struct LicensingContext {
    pub db: Database,
    pub storage: FileSystemBackend,
    /// holds the SQLite file and the stored documents
    dir: TempDir,
}

impl LicensingContext {
    async fn new(db: Database, dir: TempDir) -> Self {
        let storage = FileSystemBackend::new(dir.path().join("media"))
            .await
            .expect("initializing the storage backend");

        Self { db, storage, dir }
    }
}

impl AsyncTestContext for LicensingContext {
    #[instrument]
    async fn setup() -> LicensingContext {
        let dir = tempfile::tempdir().expect("creating a temporary directory");

        if env::var("EXTERNAL_TEST_DB").is_ok() {
            log::warn!("Using external database from 'DB_*' env vars");
            let config = config::Database::from_env().expect("DB config from env");

            let mode = if env::var("EXTERNAL_TEST_DB_BOOTSTRAP").is_ok() {
                CreationMode::Bootstrap
            } else {
                CreationMode::RefreshSchema
            };

            let db = Database::with_external_config(&config, mode)
                .await
                .expect("Configuring the database");

            return LicensingContext::new(db, dir).await;
        }

        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("licensing.db").display()
        );
        log::debug!("test database: {url}");

        let config = config::Database {
            url: Some(url),
            max_conn: 5,
            ..config::Database::from_env().expect("DB config from env")
        };

        let db = Database::with_external_config(&config, CreationMode::Default)
            .await
            .expect("Create a test database");

        LicensingContext::new(db, dir).await
    }
}
