use std::time::Duration;

use serde::Serialize;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use tokio::time::Instant;
use tracing::{debug, info};
use wrapped_transfer_api::prelude::*;

use crate::consts::*;
use crate::program::{assemble_transaction, submit_transaction, TransactionEnvelope, TransactionSubmitter};
use crate::utils::*;

/// A single transfer of the wrapped mint, fixed for the whole run.
#[derive(Clone, Debug)]
pub struct TransferRequest {
    pub program_id: Pubkey,
    pub receiver: Pubkey,
    pub amount: u64, // whole tokens
    pub commitment: CommitmentConfig,
    pub timeout: Duration,
}

impl TransferRequest {
    pub fn new(program_id: Pubkey, receiver: Pubkey, amount: u64) -> Self {
        Self {
            program_id,
            receiver,
            amount,
            commitment: CommitmentConfig { commitment: READ_COMMITMENT },
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn deadline(&self) -> Instant {
        Instant::now() + self.timeout
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransferPlan {
    pub mint: Pubkey,
    pub decimals: u8,
    pub source: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub base_amount: u64,
    pub creates_destination: bool,
}

impl TransferPlan {
    pub fn receipt(&self, signature: Signature) -> TransferReceipt {
        TransferReceipt {
            signature: signature.to_string(),
            mint: self.mint.to_string(),
            source: self.source.to_string(),
            destination: self.destination.to_string(),
            amount: format_amount(self.base_amount, self.decimals),
            base_amount: self.base_amount,
            decimals: self.decimals,
            created_destination: self.creates_destination,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TransferReceipt {
    pub signature: String,
    pub mint: String,
    pub source: String,
    pub destination: String,
    pub amount: String,
    pub base_amount: u64,
    pub decimals: u8,
    pub created_destination: bool,
}

#[derive(Clone, Debug)]
pub struct PreparedTransfer {
    pub plan: TransferPlan,
    pub envelope: TransactionEnvelope,
}

/// Instructions moving `amount` whole tokens of `mint` from `sender` to
/// `receiver`, creating the receiver's token account first if needed.
pub async fn build_instructions<R: LedgerReader + ?Sized>(
    reader: &R,
    sender: Pubkey,
    receiver: Pubkey,
    mint: Pubkey,
    decimals: u8,
    amount: u64,
    commitment: CommitmentConfig,
    deadline: Instant,
) -> Result<Vec<Instruction>, TransferError> {
    if amount == 0 {
        return Err(TransferError::AmountZero);
    }
    let base_amount = scale_amount(amount, decimals)?;

    let (receiver_ata, _) = find_associated_token_address(&receiver, &mint)?;
    let receiver_ata_exists = token_account_exists(reader, &receiver_ata, commitment, deadline).await?;
    debug!(%receiver_ata, exists = receiver_ata_exists, "checked receiver token account");

    build_transfer_ixs(sender, receiver, mint, base_amount, receiver_ata_exists)
}

/// Resolves everything the transfer needs and assembles the unsigned
/// transaction. The blockhash is the last thing read so it is as fresh as
/// possible when the transaction is signed.
pub async fn prepare_transfer<R: LedgerReader + ?Sized>(
    reader: &R,
    sender: Pubkey,
    request: &TransferRequest,
    deadline: Instant,
) -> Result<PreparedTransfer, TransferError> {
    if request.amount == 0 {
        return Err(TransferError::AmountZero);
    }

    let (mint, _) = find_wrapped_mint_pda(&request.program_id)?;
    let (source, _) = find_associated_token_address(&sender, &mint)?;
    let (destination, _) = find_associated_token_address(&request.receiver, &mint)?;
    debug!(%mint, %source, %destination, "derived addresses");

    let metadata = get_mint_metadata(reader, &mint, request.commitment, deadline).await?;
    let base_amount = scale_amount(request.amount, metadata.decimals)?;

    let instructions = build_instructions(
        reader,
        sender,
        request.receiver,
        mint,
        metadata.decimals,
        request.amount,
        request.commitment,
        deadline,
    )
    .await?;
    let creates_destination = instructions.len() > 1;

    let recent_blockhash = within(
        deadline,
        "fetch latest blockhash",
        reader.fetch_latest_blockhash(request.commitment),
    )
    .await?;
    let envelope = assemble_transaction(instructions, recent_blockhash, sender)?;

    info!(
        %mint,
        %destination,
        base_amount,
        creates_destination,
        "assembled transfer"
    );

    Ok(PreparedTransfer {
        plan: TransferPlan {
            mint,
            decimals: metadata.decimals,
            source,
            destination,
            amount: request.amount,
            base_amount,
            creates_destination,
        },
        envelope,
    })
}

/// Prepares, signs and submits the transfer, returning once it is confirmed.
pub async fn transfer<R, S>(
    reader: &R,
    submitter: &S,
    signer: &Keypair,
    request: &TransferRequest,
) -> Result<TransferReceipt, TransferError>
where
    R: LedgerReader + ?Sized,
    S: TransactionSubmitter + ?Sized,
{
    let deadline = request.deadline();
    let prepared = prepare_transfer(reader, signer.pubkey(), request, deadline).await?;
    let transaction = prepared.envelope.sign(signer)?;
    let signature = submit_transaction(submitter, &transaction, deadline).await?;

    info!(%signature, "transfer confirmed");
    Ok(prepared.plan.receipt(signature))
}
