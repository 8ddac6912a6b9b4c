use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use tokio::time::Instant;
use wrapped_transfer_api::prelude::*;

use crate::utils::{within, LedgerReader};

/// Whether a token account exists at `address`. An account with no data
/// counts as absent.
pub async fn token_account_exists<R: LedgerReader + ?Sized>(
    reader: &R,
    address: &Pubkey,
    commitment: CommitmentConfig,
    deadline: Instant,
) -> Result<bool, TransferError> {
    let account = within(deadline, "fetch token account", reader.fetch_account(address, commitment)).await?;
    Ok(account.is_some_and(|account| !account.data.is_empty()))
}
