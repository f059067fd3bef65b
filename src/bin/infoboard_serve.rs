use std::net::SocketAddr;
use std::process;

use clap::Parser;
use infoboard_csv::infoboard::DEFAULT_API_URL;
use infoboard_csv::server::{router, AppState};
use tracing_subscriber::EnvFilter;

/// Serve FH Kufstein infoboard events as subscribable iCalendar feeds
/// at `/calendar/<pkz>.ics`.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Socket address to listen on
    #[arg(short, long, env = "INFOBOARD_LISTEN", default_value = "127.0.0.1:3000")]
    address: SocketAddr,

    /// Infoboard API endpoint
    #[arg(long, env = "INFOBOARD_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("infoboard_csv=info,infoboard_serve=info")),
        )
        .init();

    let args = Args::parse();
    let app = router(AppState::new(args.api_url));

    let listener = match tokio::net::TcpListener::bind(args.address).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {e}", args.address);
            process::exit(1);
        }
    };
    tracing::info!("calendar server listening on http://{}", args.address);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {e}");
        process::exit(1);
    }
}
