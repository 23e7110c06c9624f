//! wax-dispatch: command-line front end for the dispatcher.
//!
//! ```text
//! config/dispatcher.toml
//!     → load_config (parse + validate)
//!     → RemoteSigner + RpcChainClient
//!     → Dispatcher
//!     → subcommand → DispatchResult (JSON on stdout)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use wax_dispatcher::chain::{ChainClient, RemoteSigner, RpcChainClient};
use wax_dispatcher::config::load_config;
use wax_dispatcher::observability::{logging, metrics};
use wax_dispatcher::{Decimal, DispatchResult, Dispatcher};

#[derive(Parser)]
#[command(name = "wax-dispatch")]
#[command(about = "Dispatch NFT, mint and token transfer intents to the WAX chain", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config/dispatcher.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show chain state from the configured endpoint
    Info,
    /// Transfer NFTs to a recipient
    SendAssets {
        recipient: String,
        #[arg(required = true)]
        asset_ids: Vec<String>,
        #[arg(short, long)]
        memo: Option<String>,
    },
    /// Burn one or more NFTs
    BurnAssets {
        #[arg(required = true)]
        asset_ids: Vec<String>,
    },
    /// Mint assets from a template
    Mint {
        collection: String,
        schema: String,
        template_id: i32,
        recipient: String,
        #[arg(short, long)]
        amount: Option<u32>,
    },
    /// Transfer the native token
    SendWax {
        quantity: Decimal,
        recipient: String,
        #[arg(short, long)]
        memo: Option<String>,
    },
    /// Transfer any fungible token (quantity is sent with its own decimals)
    SendTokens {
        quantity: Decimal,
        ticker: String,
        contract: String,
        recipient: String,
        #[arg(short, long)]
        memo: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init_logging(&config.observability);
    metrics::set_enabled(config.observability.metrics_enabled);

    tracing::info!(
        config = %cli.config.display(),
        address = %config.identity.address,
        rpc_url = %config.chain.rpc_url,
        "Configuration loaded"
    );

    let client = Arc::new(RpcChainClient::new(&config.chain)?);

    let build_dispatcher = || -> Result<Dispatcher, Box<dyn std::error::Error>> {
        let signer = Arc::new(RemoteSigner::new(&config.signer)?);
        Ok(Dispatcher::from_config(&config, signer, client.clone())?)
    };

    let result = match cli.command {
        Commands::Info => {
            let info = client.chain_info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
            return Ok(ExitCode::SUCCESS);
        }
        Commands::SendAssets {
            recipient,
            asset_ids,
            memo,
        } => {
            build_dispatcher()?
                .send_assets(&asset_ids, &recipient, memo.as_deref())
                .await
        }
        Commands::BurnAssets { asset_ids } => build_dispatcher()?.burn_assets(asset_ids).await,
        Commands::Mint {
            collection,
            schema,
            template_id,
            recipient,
            amount,
        } => {
            build_dispatcher()?
                .mint_from_template(&collection, &schema, template_id, &recipient, amount)
                .await
        }
        Commands::SendWax {
            quantity,
            recipient,
            memo,
        } => {
            build_dispatcher()?
                .send_wax(quantity, &recipient, memo.as_deref())
                .await
        }
        Commands::SendTokens {
            quantity,
            ticker,
            contract,
            recipient,
            memo,
        } => {
            build_dispatcher()?
                .send_tokens(quantity, &ticker, &contract, &recipient, memo.as_deref())
                .await
        }
    };

    print_result(&result)
}

fn print_result(result: &DispatchResult) -> Result<ExitCode, Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(result)?);
    if result.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
