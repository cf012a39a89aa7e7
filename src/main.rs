//! token-client
//!
//! Command-line driver over the token dApp client.
//!
//! ```text
//! token-client --config token-client.toml status
//! token-client --config token-client.toml buy 2
//! token-client --config token-client.toml mint 100 --to 0x...
//! ```
//!
//! The signing key, when used, comes from `TOKEN_CLIENT_PRIVATE_KEY`.

use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

use token_client::app::{short_address, Notice, TokenDapp};
use token_client::blockchain::{AlloyGateway, ProviderGateway};
use token_client::config::load_config;
use token_client::observability::logging::init_logging;
use token_client::session::SessionManager;

#[derive(Parser)]
#[command(name = "token-client")]
#[command(about = "Connect a wallet and buy or mint tokens", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "token-client.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the connected account, balance and price
    Status,
    /// Buy tokens at the current price
    Buy {
        /// Token amount, e.g. 1.5
        amount: String,
    },
    /// Mint tokens (the contract decides whether the account may)
    Mint {
        /// Token amount, e.g. 100
        amount: String,
        /// Recipient, defaults to the connected account
        #[arg(long)]
        to: Option<Address>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.observability.log_level)?;

    tracing::info!(
        config = %cli.config.display(),
        contract = %config.contract.address,
        chain_id = config.provider.chain_id,
        "token-client v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let gateway = AlloyGateway::from_config(&config.provider)?
        .map(|gateway| Arc::new(gateway) as Arc<dyn ProviderGateway>);
    let sessions = Arc::new(SessionManager::from_config(gateway, &config.contract)?);
    let (dapp, mut notices) = TokenDapp::new(sessions);

    let connected = dapp.connect_wallet().await;
    if connected.is_err() {
        print_notices(&mut notices);
        std::process::exit(1);
    }

    let outcome = match cli.command {
        Commands::Status => Ok(()),
        Commands::Buy { amount } => {
            dapp.inputs().set_buy_amount(amount);
            dapp.buy_tokens().await.map(|_| ())
        }
        Commands::Mint { amount, to } => {
            dapp.inputs().set_mint_amount(amount);
            dapp.mint_tokens(to).await.map(|_| ())
        }
    };

    print_notices(&mut notices);
    print_status(&dapp);
    dapp.disconnect_wallet().await;

    if outcome.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_notices(notices: &mut UnboundedReceiver<Notice>) {
    while let Ok(notice) = notices.try_recv() {
        println!("{notice}");
    }
}

fn print_status(dapp: &TokenDapp) {
    let session = dapp.session();
    let snapshot = dapp.snapshot();
    match session.address {
        Some(address) => println!("account: {}", short_address(&address)),
        None => println!("account: not connected"),
    }
    println!("balance: {}", snapshot.balance);
    println!("price:   {}", snapshot.token_price);
}
