use async_trait::async_trait;
use futures_util::StreamExt;
use solana_client::{
    nonblocking::{pubsub_client::PubsubClient, rpc_client::RpcClient},
    rpc_config::{RpcSendTransactionConfig, RpcSignatureSubscribeConfig},
    rpc_response::{ProcessedSignatureResult, RpcSignatureResult},
};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    signature::Signature,
    transaction::Transaction,
};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};
use wrapped_transfer_api::prelude::*;

use crate::consts::*;
use crate::utils::within;

/// Hands a signed transaction to the network and waits for it to settle.
#[async_trait(?Send)]
pub trait TransactionSubmitter {
    /// Broadcasts the transaction. Once this returns `Ok` the transfer may
    /// land even if confirmation is never observed.
    async fn send(&self, transaction: &Transaction) -> Result<Signature, TransferError>;

    /// Waits until `signature` reaches the submitter's commitment. Must give
    /// up with `DeadlineExceeded` once `deadline` passes.
    async fn confirm(&self, signature: &Signature, deadline: Instant) -> Result<(), TransferError>;
}

/// Sends `transaction` and waits for its confirmation.
///
/// Every failure after the send has started is reported as
/// `TransferError::Confirmation` carrying the signature, so callers can look
/// the transaction up instead of re-sending it.
pub async fn submit_transaction<S: TransactionSubmitter + ?Sized>(
    submitter: &S,
    transaction: &Transaction,
    deadline: Instant,
) -> Result<Signature, TransferError> {
    let signature = *transaction
        .signatures
        .first()
        .ok_or_else(|| TransferError::Submission("transaction is not signed".to_string()))?;
    let unconfirmed = |message: String| TransferError::Confirmation {
        signature: signature.to_string(),
        message,
    };

    match within(deadline, "send transaction", submitter.send(transaction)).await {
        Ok(_) => {}
        Err(TransferError::DeadlineExceeded { .. }) => {
            return Err(unconfirmed(
                "deadline exceeded while sending, the transaction may still land".to_string(),
            ));
        }
        Err(e) => return Err(e),
    }
    info!(%signature, "transaction sent, awaiting confirmation");

    // The submitter stops at `deadline` itself; the grace period only bounds
    // one that does not, while leaving room to release its subscription.
    match timeout_at(deadline + CONFIRM_RELEASE_GRACE, submitter.confirm(&signature, deadline)).await {
        Ok(Ok(())) => Ok(signature),
        Ok(Err(e @ TransferError::Confirmation { .. })) => Err(e),
        Ok(Err(TransferError::DeadlineExceeded { .. })) | Err(_) => {
            warn!(%signature, "deadline exceeded before confirmation");
            Err(unconfirmed("deadline exceeded before confirmation".to_string()))
        }
        Ok(Err(e)) => Err(unconfirmed(e.to_string())),
    }
}

/// Sends over RPC and waits on a websocket signature subscription.
pub struct RpcSubmitter<'a> {
    rpc: &'a RpcClient,
    pubsub: &'a PubsubClient,
    commitment: CommitmentConfig,
}

impl<'a> RpcSubmitter<'a> {
    pub fn new(rpc: &'a RpcClient, pubsub: &'a PubsubClient, commitment: CommitmentConfig) -> Self {
        Self { rpc, pubsub, commitment }
    }

    /// Status of a transaction that settled before the subscription was open.
    async fn settled_status(&self, signature: &Signature) -> Option<Result<(), TransferError>> {
        match self
            .rpc
            .get_signature_status_with_commitment(signature, self.commitment)
            .await
        {
            Ok(Some(Ok(()))) => Some(Ok(())),
            Ok(Some(Err(err))) => Some(Err(TransferError::Confirmation {
                signature: signature.to_string(),
                message: err.to_string(),
            })),
            Ok(None) => None,
            Err(e) => {
                debug!(%signature, "signature status lookup failed: {}", e);
                None
            }
        }
    }
}

#[async_trait(?Send)]
impl TransactionSubmitter for RpcSubmitter<'_> {
    async fn send(&self, transaction: &Transaction) -> Result<Signature, TransferError> {
        self.rpc
            .send_transaction_with_config(
                transaction,
                RpcSendTransactionConfig {
                    preflight_commitment: Some(self.commitment.commitment),
                    ..RpcSendTransactionConfig::default()
                },
            )
            .await
            .map_err(|e| TransferError::Submission(e.to_string()))
    }

    async fn confirm(&self, signature: &Signature, deadline: Instant) -> Result<(), TransferError> {
        let confirmation_err = |message: String| TransferError::Confirmation {
            signature: signature.to_string(),
            message,
        };

        let (mut notifications, unsubscribe) = within(deadline, "subscribe to signature", async {
            self.pubsub
                .signature_subscribe(
                    signature,
                    Some(RpcSignatureSubscribeConfig {
                        commitment: Some(self.commitment),
                        enable_received_notification: Some(false),
                    }),
                )
                .await
                .map_err(|e| confirmation_err(format!("subscription failed: {}", e)))
        })
        .await?;

        let wait = async {
            // Covers a transaction that settled before the subscription opened.
            if let Some(status) = self.settled_status(signature).await {
                return status;
            }
            loop {
                match notifications.next().await {
                    Some(response) => match response.value {
                        RpcSignatureResult::ProcessedSignature(ProcessedSignatureResult { err: None }) => {
                            return Ok(());
                        }
                        RpcSignatureResult::ProcessedSignature(ProcessedSignatureResult { err: Some(err) }) => {
                            return Err(confirmation_err(err.to_string()));
                        }
                        RpcSignatureResult::ReceivedSignature(_) => {
                            debug!(%signature, "transaction received by validator");
                        }
                    },
                    None => return Err(confirmation_err("subscription closed".to_string())),
                }
            }
        };

        let outcome = timeout_at(deadline, wait)
            .await
            .unwrap_or(Err(TransferError::DeadlineExceeded { step: "confirm transaction" }));

        unsubscribe().await;
        outcome
    }
}
