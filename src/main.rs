use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use commands::AppContext;
use config::Config;

fn env_filter() -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    for directive in ["gpu_price_charts=debug", "reqwest=warn"] {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Ignoring log directive {}: {}", directive, e),
        }
    }
    filter
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!("📈 GPU price charts v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "API at {} (charts {}x{}, session file {})",
        config.api_url,
        config.chart_width,
        config.chart_height,
        config.session_file.display()
    );

    let ctx = AppContext::new(config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    if let Err(e) = commands::handle_command(&ctx, &args).await {
        error!("Command failed: {}", e);
        eprintln!("{}", commands::user_message(&e));
        std::process::exit(1);
    }
}
