//! curlsmith server binary
//!
//! Serves the browser UI and the JSON session API. Requires a Gemini API
//! key via `--api-key` or the `GEMINI_API_KEY` environment variable.

use clap::Parser;
use tracing::info;

use curlsmith_core::Converter;
use curlsmith_server::ConverterServer;
use gemini_gateway::{GeminiClient, DEFAULT_MODEL};

/// curlsmith - convert a pasted cURL command into a runnable script
#[derive(Parser, Debug)]
#[command(name = "curlsmith-server")]
#[command(version)]
#[command(about = "Convert cURL commands into Python scripts with a generative model")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, default_value = "3000")]
    port: u16,

    /// Gemini model to use
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Gemini API key (overrides $GEMINI_API_KEY)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let gateway = match args.api_key {
        Some(key) => GeminiClient::new(key, &args.model)?,
        None => GeminiClient::from_env(&args.model)?,
    };

    info!("Using model {}", gateway.model());

    let converter = Converter::new(Box::new(gateway));
    let server = ConverterServer::new(converter, args.port);

    info!("Open http://localhost:{} in a browser", args.port);
    server.run().await?;

    Ok(())
}
