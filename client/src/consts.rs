use std::time::Duration;

use solana_sdk::commitment_config::CommitmentLevel;

pub const DEFAULT_TIMEOUT_SECS: u64            = 120;

pub const READ_COMMITMENT: CommitmentLevel     = CommitmentLevel::Finalized; // decimals must not be rolled back

pub const CONFIRM_RELEASE_GRACE: Duration      = Duration::from_secs(2);
