use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "bv", about = concat!("boardview v", env!("CARGO_PKG_VERSION"), " - browse your Trello boards from the terminal"), version)]
pub struct Cli {
    /// Config file (default: ~/.config/boardview/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Credentials file (default: ~/.config/boardview/credentials.json)
    #[arg(long, value_name = "PATH")]
    pub credentials: Option<PathBuf>,

    /// API root, overriding the config file
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Write a debug log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" (default: $BOARDVIEW_LOG or "info")
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}
