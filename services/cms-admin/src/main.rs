use std::net::SocketAddr;

use clap::Parser;
use cms_admin::AdminState;
use cms_core::BUILD_INFO;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cms-admin")]
#[command(about = "CMS admin - Section management screen")]
#[command(version = cms_core::VERSION)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "CMS_ADMIN_BIND", default_value = "127.0.0.1:8081")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    info!("Starting {}", BUILD_INFO);

    let listener = TcpListener::bind(args.bind).await?;
    cms_admin::serve(listener, AdminState::default()).await?;

    Ok(())
}
