use clap::Parser;
use didscope_app::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    didscope_app::init_tracing();

    tracing::info!("Starting DIDScope v{}", env!("CARGO_PKG_VERSION"));
    cli::run(args).await
}
