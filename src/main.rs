use clap::Parser;
use tracing_subscriber::EnvFilter;

use tool_time_server::config::ServerConfig;
use tool_time_server::tools::ToolRegistry;
use tool_time_server::{app, bind};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (all interfaces). Empty or unset means 8081
    #[arg(long, env = "PORT")]
    port: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let config = ServerConfig::from_port_setting(args.port.as_deref()).unwrap_or_else(|e| {
        tracing::error!("Failed to start server: {e}");
        std::process::exit(1);
    });

    let app = app(ToolRegistry::with_builtin_tools());

    let addr = config.socket_addr();
    let listener = bind(&config).await.unwrap_or_else(|e| {
        tracing::error!("Failed to start server: {e}");
        std::process::exit(1);
    });

    tracing::info!("Starting time tool server on {addr}");
    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Failed to start server: {e}");
        std::process::exit(1);
    });
}
