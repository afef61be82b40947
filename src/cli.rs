use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "lazytxt", version, about = "Browse folders and edit plain-text files")]
pub(crate) struct Args {
    /// Folder to browse, or a text file (path or file:// URI) to open.
    pub(crate) path: Option<String>,

    /// Config file; defaults to the user config directory.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Log file; defaults to the user state directory.
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub(crate) verbose: bool,

    /// Write the default config file and exit.
    #[arg(long)]
    pub(crate) init_config: bool,
}
