use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use tokio::time::Instant;
use tracing::debug;
use wrapped_transfer_api::prelude::*;

use crate::utils::{within, LedgerReader};

/// Fetches and decodes the mint at `mint`. A missing or empty account is an
/// error here, unlike token accounts which may legitimately not exist yet.
pub async fn get_mint_metadata<R: LedgerReader + ?Sized>(
    reader: &R,
    mint: &Pubkey,
    commitment: CommitmentConfig,
    deadline: Instant,
) -> Result<MintMetadata, TransferError> {
    let account = within(deadline, "fetch mint account", reader.fetch_account(mint, commitment))
        .await?
        .filter(|account| !account.data.is_empty())
        .ok_or(TransferError::AccountNotFound { address: *mint })?;

    if account.owner != spl_token::id() {
        return Err(TransferError::InvalidMintOwner {
            address: *mint,
            owner: account.owner,
            expected: spl_token::id(),
        });
    }

    let metadata = MintMetadata::unpack(mint, &account.data)?;
    debug!(%mint, decimals = metadata.decimals, supply = metadata.supply, "decoded mint");
    Ok(metadata)
}
