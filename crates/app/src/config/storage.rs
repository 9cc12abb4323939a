//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Client storage settings.
#[derive(Debug, Args)]
pub(crate) struct StorageConfig {
    /// Directory holding the persisted cart and session
    #[arg(long, env = "CRUMB_STORAGE_DIR", default_value = ".crumb")]
    pub storage_dir: PathBuf,
}
