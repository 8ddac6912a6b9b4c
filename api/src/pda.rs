use solana_program::pubkey::Pubkey;
use crate::consts::*;
use crate::error::TransferError;

/// Mint owned by `program_id`, derived from the fixed `wrapped_mint` seed.
/// The seed must match the one the program used when it created the mint.
pub fn find_wrapped_mint_pda(program_id: &Pubkey) -> Result<(Pubkey, u8), TransferError> {
    Pubkey::try_find_program_address(&[WRAPPED_MINT], program_id)
        .ok_or(TransferError::Derivation { what: "wrapped mint" })
}

/// Associated token account of `owner` for `mint`, as created by the
/// associated token account program.
pub fn find_associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Result<(Pubkey, u8), TransferError> {
    Pubkey::try_find_program_address(
        &[owner.as_ref(), spl_token::id().as_ref(), mint.as_ref()],
        &spl_associated_token_account::id(),
    )
    .ok_or(TransferError::Derivation { what: "associated token account" })
}
