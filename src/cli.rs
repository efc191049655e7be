use std::path::PathBuf;

use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Automation mode: default every interactive prompt to yes
    #[arg(long, default_value_t = false)]
    pub auto: bool,

    /// Route the WAF scan through Tor instead of the local proxy
    #[arg(long, default_value_t = false)]
    pub tor: bool,

    /// Path to the intercepting-proxy executable
    #[arg(long, value_name = "PATH")]
    pub proxy_path: Option<PathBuf>,

    /// Newline-delimited list of target domains
    #[arg(long, default_value = "domain.txt", value_name = "FILE")]
    pub domains: PathBuf,

    /// Enable detailed debug logging (global)
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
