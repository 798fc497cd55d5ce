use clap::Parser;
use spechub::kernel::config::DEFAULT_CONFIG_FILE;
use spechub_server::Server;
use std::path::PathBuf;

/// Serves config templates of versioned service specifications.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file (extension optional).
    #[arg(short, long, env = "SPECHUB_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (cfg, _log) = spechub_server::bootstrap(&args.config)?;

    Server::builder().config(cfg).build().await?.run().await
}
