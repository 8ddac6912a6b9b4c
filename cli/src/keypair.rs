use std::path::PathBuf;

use anyhow::{anyhow, Result};
use solana_sdk::signature::{read_keypair_file, Keypair};

/// The explicit path when given, otherwise the Solana CLI default under the
/// user's home directory.
pub fn get_keypair_path(keypair: Option<PathBuf>) -> Result<PathBuf> {
    match keypair {
        Some(path) => Ok(path),
        None => dirs::home_dir()
            .map(|home| home.join(".config").join("solana").join("id.json"))
            .ok_or_else(|| anyhow!("Could not resolve home directory; pass --keypair")),
    }
}

pub fn get_payer(keypair_path: PathBuf) -> Result<Keypair> {
    read_keypair_file(&keypair_path)
        .map_err(|e| anyhow!("Failed to read keypair {}: {}", keypair_path.display(), e))
}
