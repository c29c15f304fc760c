use anyhow::Context;
use std::{fs, path::PathBuf, process::ExitCode};

#[derive(clap::Args, Debug)]
pub struct Run {
    /// Write the document to this file instead of standard output
    #[arg(long, env)]
    pub file: Option<PathBuf>,
}

impl Run {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let doc = licensing_server::openapi::openapi().to_pretty_json()?;

        match self.file {
            Some(file) => fs::write(&file, doc)
                .with_context(|| format!("writing OpenAPI document to {}", file.display()))?,
            None => println!("{doc}"),
        }

        Ok(ExitCode::SUCCESS)
    }
}
