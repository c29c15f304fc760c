use clap::Parser;
use licensing_infrastructure::tracing::init_tracing;
use std::process::{ExitCode, Termination};

mod account;
mod db;
mod openapi;

#[allow(clippy::large_enum_variant)]
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Server(licensing_server::Run),
    /// Manage the database
    Db(db::Run),
    /// Print or export the OpenAPI document
    Openapi(openapi::Run),
    /// Manage login accounts
    Account(account::Run),
}

#[derive(clap::Parser, Debug)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "licensed",
    long_about = None
)]
pub struct Licensed {
    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Licensed {
    async fn run(self) -> ExitCode {
        match self.run_command().await {
            Ok(code) => code,
            Err(err) => {
                log::error!("Error: {err}");
                for (n, err) in err.chain().skip(1).enumerate() {
                    if n == 0 {
                        log::error!("Caused by:");
                    }
                    log::error!("\t{err}");
                }

                ExitCode::FAILURE
            }
        }
    }

    async fn run_command(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Server(run) => run.run().await,
            Command::Db(run) => run.run().await,
            Command::Openapi(run) => run.run().await,
            Command::Account(run) => run.run().await,
        }
    }
}

#[actix_web::main]
async fn main() -> impl Termination {
    init_tracing();
    Licensed::parse().run().await
}
