mod cluster;
mod keypair;
mod logging;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use solana_client::nonblocking::{pubsub_client::PubsubClient, rpc_client::RpcClient};
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use tracing::{debug, info};
use wrapped_transfer_api::prelude::*;
use wrapped_transfer_client::{consts::*, encode_transaction, program::*, within, LedgerReader};
use cluster::Cluster;
use keypair::{get_keypair_path, get_payer};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    fn config(self) -> CommitmentConfig {
        let commitment = match self {
            Commitment::Processed => CommitmentLevel::Processed,
            Commitment::Confirmed => CommitmentLevel::Confirmed,
            Commitment::Finalized => CommitmentLevel::Finalized,
        };
        CommitmentConfig { commitment }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "wrapped-transfer", version)]
#[command(about = "Transfer wrapped tokens, creating the receiver's token account when it is missing")]
struct Cli {
    #[arg(
        long,
        env = "WRAPPED_TRANSFER_NETWORK",
        default_value = "devnet",
        help = "Network to broadcast to (devnet, mainnet, testnet, localnet, or a custom RPC URL)"
    )]
    network: Cluster,

    #[arg(long, env = "WRAPPED_TRANSFER_RPC_URL", help = "Override the network's RPC endpoint")]
    rpc_url: Option<String>,

    #[arg(long, env = "WRAPPED_TRANSFER_WS_URL", help = "Override the network's websocket endpoint")]
    ws_url: Option<String>,

    #[arg(
        long,
        env = "WRAPPED_TRANSFER_KEYPAIR",
        help = "Path to the sender's keypair file (default: ~/.config/solana/id.json)"
    )]
    keypair: Option<PathBuf>,

    #[arg(
        long,
        env = "WRAPPED_TRANSFER_PROGRAM_ID",
        default_value = DEFAULT_PROGRAM_ID,
        help = "Program that owns the wrapped mint"
    )]
    program_id: Pubkey,

    #[arg(long, help = "Receiver's wallet address (base58)")]
    receiver: Pubkey,

    #[arg(long, help = "Amount to transfer, in whole tokens")]
    amount: u64,

    #[arg(long, value_enum, default_value_t = Commitment::Finalized, help = "Commitment for ledger reads")]
    commitment: Commitment,

    #[arg(long, value_enum, default_value_t = Commitment::Finalized, help = "Commitment to wait for after sending")]
    confirm_commitment: Commitment,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, help = "Give up after this many seconds")]
    timeout: u64,

    #[arg(long, help = "Build and sign the transaction, print it, and exit without sending")]
    dry_run: bool,

    #[arg(long, short, help = "Skip the confirmation prompt")]
    yes: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[arg(long, short, help = "Log each step to stderr")]
    verbose: bool,
}

struct Endpoints {
    rpc_url: String,
    ws_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_console_subscriber(cli.verbose);

    let endpoints = Endpoints {
        rpc_url: cli.rpc_url.clone().unwrap_or_else(|| cli.network.rpc_url()),
        ws_url: cli.ws_url.clone().unwrap_or_else(|| cli.network.ws_url()),
    };
    let keypair_path = get_keypair_path(cli.keypair.clone())?;
    info!(
        rpc_url = %endpoints.rpc_url,
        ws_url = %endpoints.ws_url,
        keypair = %keypair_path.display(),
        "resolved configuration"
    );
    let payer = get_payer(keypair_path)?;

    let request = TransferRequest {
        program_id: cli.program_id,
        receiver: cli.receiver,
        amount: cli.amount,
        commitment: cli.commitment.config(),
        timeout: Duration::from_secs(cli.timeout),
    };

    tokio::select! {
        result = run(&cli, &endpoints, &payer, &request) => result,
        _ = tokio::signal::ctrl_c() => Err(anyhow!("Interrupted before the transfer was confirmed")),
    }
}

fn confirm_transfer(plan: &TransferPlan, request: &TransferRequest, endpoints: &Endpoints) -> Result<bool> {
    Confirm::new()
        .with_prompt(transfer_prompt(plan, request, &endpoints.rpc_url))
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

fn transfer_prompt(plan: &TransferPlan, request: &TransferRequest, rpc_url: &str) -> String {
    let mut prompt = format!(
        "Transfer {} tokens ({} base units) of {} to {} via {}",
        format_amount(plan.base_amount, plan.decimals),
        plan.base_amount,
        plan.mint,
        request.receiver,
        rpc_url
    );
    if plan.creates_destination {
        prompt.push_str(", creating the receiver's token account");
    }
    prompt.push('?');
    prompt
}

async fn run(cli: &Cli, endpoints: &Endpoints, payer: &Keypair, request: &TransferRequest) -> Result<()> {
    let mut deadline = request.deadline();
    let client = RpcClient::new_with_timeout_and_commitment(
        endpoints.rpc_url.clone(),
        request.timeout,
        request.commitment,
    );

    let prepared = prepare_transfer(&client, payer.pubkey(), request, deadline)
        .await
        .context("Failed to prepare transfer")?;

    if cli.dry_run {
        let transaction = prepared.envelope.sign(payer)?;
        let encoded = encode_transaction(&transaction)?;
        print_dry_run(cli.output, &prepared.plan, &encoded)?;
        return Ok(());
    }

    let prompted = !cli.yes;
    if prompted {
        if !confirm_transfer(&prepared.plan, request, endpoints)? {
            bail!("Transfer cancelled");
        }
        // Time spent at the prompt does not count against the deadline.
        deadline = request.deadline();
    }

    let pubsub = within(deadline, "connect to websocket", async {
        PubsubClient::new(&endpoints.ws_url)
            .await
            .map_err(|e| TransferError::TransientFetch {
                step: "connect to websocket",
                message: format!("{}: {}", endpoints.ws_url, e),
            })
    })
    .await?;

    let envelope = if prompted {
        let recent_blockhash = within(
            deadline,
            "fetch latest blockhash",
            client.fetch_latest_blockhash(request.commitment),
        )
        .await?;
        debug!(%recent_blockhash, "refreshed blockhash after confirmation");
        assemble_transaction(prepared.envelope.instructions().to_vec(), recent_blockhash, payer.pubkey())?
    } else {
        prepared.envelope
    };
    let transaction = envelope.sign(payer)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!("Waiting for {:?} confirmation", cli.confirm_commitment).to_lowercase());
    spinner.enable_steady_tick(Duration::from_millis(120));

    let submitter = RpcSubmitter::new(&client, &pubsub, cli.confirm_commitment.config());
    let submitted = submit_transaction(&submitter, &transaction, deadline).await;
    spinner.finish_and_clear();
    let signature = submitted.context("Failed to transfer tokens")?;

    let receipt = prepared.plan.receipt(signature);
    match cli.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&receipt)?),
        OutputFormat::Text => {
            println!("{}", "Transfer successful.".green().bold());
            println!("  Amount: {} ({} base units)", receipt.amount, receipt.base_amount);
            println!("  Mint: {}", receipt.mint);
            println!("  Source: {}", receipt.source);
            println!("  Destination: {}", receipt.destination);
            if receipt.created_destination {
                println!("  Created destination token account");
            }
            println!("Signature: {}", receipt.signature);
        }
    }

    Ok(())
}

fn print_dry_run(output: OutputFormat, plan: &TransferPlan, encoded: &str) -> Result<()> {
    match output {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "mint": plan.mint.to_string(),
                "source": plan.source.to_string(),
                "destination": plan.destination.to_string(),
                "amount": format_amount(plan.base_amount, plan.decimals),
                "base_amount": plan.base_amount,
                "decimals": plan.decimals,
                "created_destination": plan.creates_destination,
                "transaction": encoded,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            println!("{}", "Dry run, nothing was sent.".yellow().bold());
            println!(
                "  Amount: {} ({} base units)",
                format_amount(plan.base_amount, plan.decimals),
                plan.base_amount
            );
            println!("  Mint: {}", plan.mint);
            println!("  Source: {}", plan.source);
            println!("  Destination: {}", plan.destination);
            println!("  Creates destination: {}", plan.creates_destination);
            println!("Transaction (base64): {}", encoded);
        }
    }
    Ok(())
}
