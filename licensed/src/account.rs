use licensing_common::{config::Database, db};
use licensing_module_fundamental::account::{model::AccountCreate, service::AccountService};
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
    /// Create an account, e.g. the first staff member
    Create(Create),
}

#[derive(clap::Args)]
pub struct Create {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "ACCOUNT_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Allow the account to manage other accounts
    #[arg(long)]
    pub staff: bool,
}

impl std::fmt::Debug for Create {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Create")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("staff", &self.staff)
            .finish_non_exhaustive()
    }
}

impl Run {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let db = db::Database::with_external_config(&self.database, db::CreationMode::Default)
            .await?;
        let service = AccountService::new(db);

        match self.command {
            Command::Create(create) => {
                let account = service
                    .create_account(AccountCreate {
                        username: create.username,
                        email: create.email,
                        password: create.password,
                        is_staff: create.staff,
                    })
                    .await?;
                log::info!("created account {} ({})", account.id, account.username);
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}
