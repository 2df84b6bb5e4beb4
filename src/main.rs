use anyhow::Result;
use clap::Parser;
use rubrik_exporter::{config::Config, server};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Rubrik base URL (overrides config)
    #[arg(long, env = "RUBRIK_URL")]
    rubrik_url: Option<String>,

    /// Rubrik username (overrides config)
    #[arg(long, env = "RUBRIK_USERNAME")]
    rubrik_username: Option<String>,

    /// Rubrik password (overrides config)
    #[arg(long, env = "RUBRIK_PASSWORD", hide_env_values = true)]
    rubrik_password: Option<String>,

    /// Port to listen on for metrics (overrides config)
    #[arg(short, long, env = "EXPORTER_PORT")]
    port: Option<u16>,

    /// Address to bind to (overrides config)
    #[arg(short, long, env = "EXPORTER_ADDR")]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Rubrik Prometheus Exporter v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let mut config = Config::load(&args.config)?;

    if let Some(url) = args.rubrik_url {
        config.rubrik.url = url;
    }
    if let Some(username) = args.rubrik_username {
        config.rubrik.username = username;
    }
    if let Some(password) = args.rubrik_password {
        config.rubrik.password = secrecy::SecretString::new(password.into());
    }
    config.override_listen(args.addr, args.port);

    info!("Configuration loaded successfully");
    info!("Rubrik URL: {}", config.rubrik.url);
    info!(
        "Metrics endpoint: http://{}:{}/metrics",
        config.server.addr, config.server.port
    );

    if let Err(e) = server::start(config).await {
        error!("Server error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
