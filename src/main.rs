//! Entry point for the API-documentation proxy.
//!
//! With no subcommand (the way Lambda starts the bootstrap binary) the Lambda
//! runtime loop is started. `invoke` runs a single invocation locally and
//! prints the response.

use clap::{Parser, Subcommand};
use docs_proxy::{
    config::ProxyConfig,
    fetch::{BasicClient, auth::HmacSigner},
    forwarder::{Forwarder, Invocation},
    handler,
    infra::keys::{CredentialProvider, SsmKeyStore},
    telemetry::{self, LogTarget},
};
use lambda_runtime::{LambdaEvent, service_fn};
use reqwest::Url;
use serde_json::Value;
use tracing::info;

#[derive(Parser)]
#[command(name = "docs_proxy")]
#[command(about = "Serves the signed upstream API documentation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the AWS Lambda runtime loop
    Lambda,
    /// Perform one invocation locally and print the response JSON
    Invoke {
        /// Upstream URL, overriding API_URL
        #[arg(long)]
        url: Option<Url>,
    },
}

type SsmForwarder = Forwarder<SsmKeyStore, HmacSigner, BasicClient>;

async fn build_forwarder(config: ProxyConfig) -> SsmForwarder {
    let aws = aws_config::load_from_env().await;
    let credentials = CredentialProvider::new(SsmKeyStore::new(&aws), config.credentials);

    Forwarder::new(
        credentials,
        HmacSigner::new(),
        BasicClient::new(),
        config.upstream_url,
    )
}

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Lambda) {
        Commands::Lambda => {
            let _guard = telemetry::init(LogTarget::Lambda);

            let config = ProxyConfig::from_env()?;
            let forwarder = build_forwarder(config).await;
            info!(url = %forwarder.upstream_url(), "Lambda runtime starting");

            let forwarder = &forwarder;
            lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
                handler::handle(forwarder, event).await
            }))
            .await?;
        }
        Commands::Invoke { url } => {
            let _guard = telemetry::init(LogTarget::Local);

            let mut config = ProxyConfig::from_env()?;
            if let Some(url) = url {
                config = config.with_upstream_url(url);
            }
            let forwarder = build_forwarder(config).await;

            let invocation = Invocation::new("local");
            let response = handler::invoke(&forwarder, &invocation).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
