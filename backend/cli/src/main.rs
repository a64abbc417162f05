mod setup;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use hairscope_config::{default_config_path, load_config, prepare, redact};
use hairscope_gateway::{start_server, GatewayState};
use hairscope_logging::init_logger;
use hairscope_media::{detect_mime_type, is_image};
use hairscope_understanding::ERROR_PREFIX;

#[derive(Parser)]
#[command(name = "hairscope")]
#[command(about = "Hairscope — AI hair & scalp analysis through a vision model")]
#[command(version)]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web UI (the default)
    Serve {
        /// Address to bind the HTTP server to
        #[arg(short, long)]
        bind: Option<String>,
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Analyze one image file and print the result
    Analyze {
        /// Path to an image file (JPEG, PNG, WebP, ...)
        image: PathBuf,
    },
    /// Print the effective configuration with secrets masked
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let path = cli.config.clone().unwrap_or_else(default_config_path);

    let raw = load_config(&path).await?;
    init_logger(&setup::log_settings(&raw));
    if path.exists() {
        info!(path = %path.display(), "Loaded config");
    } else {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
    }
    let config = prepare(raw, &std::env::vars().collect())?;

    match cli.command.unwrap_or(Commands::Serve { bind: None, port: None }) {
        Commands::Serve { bind, port } => {
            let bind = bind.unwrap_or_else(|| config.bind().to_string());
            let port = port.unwrap_or(config.port());
            let analyzer = setup::build_analyzer(&config)?;

            info!(
                bind = %bind,
                port,
                model = %analyzer.model(),
                config = %path.display(),
                "Starting Hair Analysis Application"
            );
            let state = GatewayState::new(analyzer, setup::ui_page(&config), config.max_upload_bytes());
            start_server(&format!("{bind}:{port}"), state).await?;
        }
        Commands::Analyze { image } => {
            let analyzer = setup::build_analyzer(&config)?;
            let mime = detect_mime_type(&image);
            if !is_image(mime) {
                warn!(path = %image.display(), "File extension is not a known image type");
            }
            let bytes = tokio::fs::read(&image)
                .await
                .with_context(|| format!("Failed to read image: {}", image.display()))?;
            let output = analyzer.analyze_upload(&bytes).await;
            println!("{output}");
            if output.starts_with(ERROR_PREFIX) {
                std::process::exit(1);
            }
        }
        Commands::Config => {
            let value = serde_json::to_value(&config)?;
            print!("{}", serde_yaml::to_string(&redact(&value))?);
        }
    }

    Ok(())
}
