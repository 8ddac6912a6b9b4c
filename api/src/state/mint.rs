use solana_program::{program_pack::Pack, pubkey::Pubkey};
use spl_token::state::Mint;

use crate::error::TransferError;

/// Decoded SPL Token mint account. Only the 82-byte base layout is read;
/// bytes past it (token extensions) are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintMetadata {
    pub mint_authority: Option<Pubkey>,
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    pub freeze_authority: Option<Pubkey>,
}

impl MintMetadata {
    pub fn unpack(address: &Pubkey, data: &[u8]) -> Result<Self, TransferError> {
        let decode_err = |reason: String| TransferError::Decode { address: *address, reason };

        if data.len() < Mint::LEN {
            return Err(decode_err(format!(
                "expected at least {} bytes, got {}",
                Mint::LEN,
                data.len()
            )));
        }

        let mint = Mint::unpack_unchecked(&data[..Mint::LEN])
            .map_err(|e| decode_err(format!("invalid mint layout: {}", e)))?;
        if !mint.is_initialized {
            return Err(decode_err("mint is not initialized".to_string()));
        }

        Ok(Self {
            mint_authority: mint.mint_authority.into(),
            supply: mint.supply,
            decimals: mint.decimals,
            is_initialized: mint.is_initialized,
            freeze_authority: mint.freeze_authority.into(),
        })
    }
}
