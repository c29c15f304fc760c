use licensing_common::{config::Database, db};
use std::process::ExitCode;

#[derive(clap::Args, Debug)]
pub struct Run {
    #[command(subcommand)]
    pub(crate) command: Command,
    #[command(flatten)]
    pub(crate) database: Database,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Drop and re-create the database, then apply all migrations
    Create,
    /// Apply pending migrations
    Migrate,
    /// Drop all tables and re-apply all migrations
    Refresh,
}

impl Run {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        use Command::*;
        match self.command {
            Create => self.config(db::CreationMode::Bootstrap).await,
            Migrate => self.config(db::CreationMode::Default).await,
            Refresh => self.config(db::CreationMode::RefreshSchema).await,
        }
    }

    async fn config(self, mode: db::CreationMode) -> anyhow::Result<ExitCode> {
        let db = db::Database::with_external_config(&self.database, mode).await?;
        log::info!("database {} is up to date", db.name());
        db.close().await?;

        Ok(ExitCode::SUCCESS)
    }
}
