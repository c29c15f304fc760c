pub mod endpoints;
pub mod openapi;

use crate::endpoints::Config;
use licensing_auth::{
    auth::AuthConfigArguments,
    authenticator::Authenticator,
    authorizer::Authorizer,
};
use licensing_common::{config::Database, db};
use licensing_infrastructure::{
    app::http::{HttpServerBuilder, HttpServerConfig},
    tracing::init_tracing,
};
use licensing_module_communication::{
    config::TwilioConfig,
    provider::{twilio::TwilioProvider, Disabled, SmsProvider},
};
use licensing_module_fundamental::account::service::AccountService;
use licensing_module_storage::{config::StorageConfig, service::fs::FileSystemBackend};
use std::{process::ExitCode, sync::Arc};

/// Run the API server
#[derive(clap::Args, Debug)]
pub struct Run {
    /// The database creation mode
    #[arg(long, env, value_enum, default_value_t = db::CreationMode::Default)]
    pub creation: db::CreationMode,

    #[command(flatten)]
    pub database: Database,

    #[command(flatten)]
    pub storage: StorageConfig,

    #[command(flatten)]
    pub auth: AuthConfigArguments,

    #[command(flatten)]
    pub http: HttpServerConfig,

    #[command(flatten)]
    pub twilio: TwilioConfig,
}

impl Run {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        init_tracing();

        let db = db::Database::with_external_config(&self.database, self.creation).await?;
        let storage = FileSystemBackend::new(self.storage.media_root.clone()).await?;

        let sms: Arc<dyn SmsProvider> = match TwilioProvider::from_config(&self.twilio)? {
            Some(provider) => Arc::new(provider),
            None => {
                log::warn!("Twilio is not configured, sending SMS will fail");
                Arc::new(Disabled)
            }
        };

        let authenticator = if self.auth.disabled {
            log::warn!("Authentication is disabled");
            None
        } else {
            Some(Arc::new(Authenticator::new(Arc::new(AccountService::new(
                db.clone(),
            )))))
        };

        let config = Config { db, storage, sms };

        HttpServerBuilder::new(self.http)
            .authenticator(authenticator)
            .authorizer(Authorizer::new(!self.auth.disabled))
            .configure(move |svc| endpoints::configure(svc, config.clone()))
            .run()
            .await?;

        Ok(ExitCode::SUCCESS)
    }
}
