use std::future::Future;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{account::Account, commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey};
use tokio::time::{timeout_at, Instant};
use wrapped_transfer_api::prelude::*;

/// Read access to the ledger. Implemented for the nonblocking `RpcClient`;
/// tests substitute an in-memory ledger.
#[async_trait(?Send)]
pub trait LedgerReader {
    /// `Ok(None)` when the account does not exist.
    async fn fetch_account(
        &self,
        address: &Pubkey,
        commitment: CommitmentConfig,
    ) -> Result<Option<Account>, TransferError>;

    async fn fetch_latest_blockhash(&self, commitment: CommitmentConfig) -> Result<Hash, TransferError>;
}

#[async_trait(?Send)]
impl LedgerReader for RpcClient {
    async fn fetch_account(
        &self,
        address: &Pubkey,
        commitment: CommitmentConfig,
    ) -> Result<Option<Account>, TransferError> {
        let response = self
            .get_account_with_commitment(address, commitment)
            .await
            .map_err(|e| TransferError::TransientFetch {
                step: "fetch account",
                message: format!("{}: {}", address, e),
            })?;
        Ok(response.value)
    }

    async fn fetch_latest_blockhash(&self, commitment: CommitmentConfig) -> Result<Hash, TransferError> {
        let (blockhash, _last_valid_height) = self
            .get_latest_blockhash_with_commitment(commitment)
            .await
            .map_err(|e| TransferError::TransientFetch {
                step: "fetch latest blockhash",
                message: e.to_string(),
            })?;
        Ok(blockhash)
    }
}

/// Runs `fut` unless `deadline` passes first.
pub async fn within<T, F>(deadline: Instant, step: &'static str, fut: F) -> Result<T, TransferError>
where
    F: Future<Output = Result<T, TransferError>>,
{
    timeout_at(deadline, fut)
        .await
        .map_err(|_| TransferError::DeadlineExceeded { step })?
}
