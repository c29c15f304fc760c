use std::path::PathBuf;

#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Storage")]
pub struct StorageConfig {
    /// Directory holding uploaded documents
    #[arg(
        id = "media-root",
        long,
        env = "MEDIA_ROOT",
        default_value = "./.licensing/media"
    )]
    pub media_root: PathBuf,
}
