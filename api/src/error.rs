use solana_program::pubkey::Pubkey;
use thiserror::Error;

/// Everything that can go wrong between reading the command line and a
/// confirmed transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("could not derive {what} address: no off-curve bump found")]
    Derivation { what: &'static str },

    #[error("account {address} not found")]
    AccountNotFound { address: Pubkey },

    #[error("failed to decode account {address}: {reason}")]
    Decode { address: Pubkey, reason: String },

    #[error("mint {address} is owned by {owner}, not the token program {expected}")]
    InvalidMintOwner {
        address: Pubkey,
        owner: Pubkey,
        expected: Pubkey,
    },

    #[error("amount {amount} scaled by 10^{decimals} overflows u64")]
    AmountOverflow { amount: u64, decimals: u8 },

    #[error("amount must be greater than zero")]
    AmountZero,

    #[error("transaction has no instructions")]
    EmptyTransaction,

    #[error("fee payer must not be the zero address")]
    InvalidPayer,

    #[error("failed to {step}: {message}")]
    TransientFetch { step: &'static str, message: String },

    #[error("deadline exceeded while trying to {step}")]
    DeadlineExceeded { step: &'static str },

    #[error("failed to build {what} instruction: {message}")]
    InstructionBuild { what: &'static str, message: String },

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("failed to sign transaction: {0}")]
    Signing(String),

    #[error("failed to submit transaction: {0}")]
    Submission(String),

    #[error("transaction {signature} was not confirmed: {message}")]
    Confirmation { signature: String, message: String },
}

impl TransferError {
    /// Whether running the whole pipeline again could succeed without any
    /// change to its inputs. Failures after a transaction was sent are
    /// `Confirmation` errors and never transient.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TransferError::TransientFetch { .. } | TransferError::DeadlineExceeded { .. }
        )
    }
}
