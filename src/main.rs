use std::process;

use clap::Parser;
use infoboard_csv::Config;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("infoboard_csv=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    match infoboard_csv::run(&config) {
        Ok(count) => {
            tracing::info!(count, "wrote rows");
            println!(
                "Done! Import '{}' into Google Calendar.",
                config.output_path().display()
            );
        }
        Err(e) => {
            eprintln!("Application error: {e}");
            process::exit(1);
        }
    }
}
