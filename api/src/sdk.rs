use solana_program::{instruction::Instruction, pubkey::Pubkey};
use crate::error::TransferError;
use crate::pda::find_associated_token_address;

/// Creates `owner`'s associated token account for `mint`, funded by `payer`.
pub fn build_create_ata_ix(payer: Pubkey, owner: Pubkey, mint: Pubkey) -> Instruction {
    spl_associated_token_account::instruction::create_associated_token_account(
        &payer,
        &owner,
        &mint,
        &spl_token::id(),
    )
}

/// Moves `amount` base units from `source` to `destination`, signed by a
/// single `authority` (no multisig cosigners).
pub fn build_transfer_ix(
    source: Pubkey,
    destination: Pubkey,
    authority: Pubkey,
    amount: u64,
) -> Result<Instruction, TransferError> {
    spl_token::instruction::transfer(
        &spl_token::id(),
        &source,
        &destination,
        &authority,
        &[],
        amount,
    )
    .map_err(|e| TransferError::InstructionBuild {
        what: "transfer",
        message: e.to_string(),
    })
}

/// Ordered instructions moving `base_amount` of `mint` from `sender` to
/// `receiver`. The receiver's token account is created first, in the same
/// transaction, when it does not exist yet.
pub fn build_transfer_ixs(
    sender: Pubkey,
    receiver: Pubkey,
    mint: Pubkey,
    base_amount: u64,
    receiver_account_exists: bool,
) -> Result<Vec<Instruction>, TransferError> {
    let (sender_ata, _) = find_associated_token_address(&sender, &mint)?;
    let (receiver_ata, _) = find_associated_token_address(&receiver, &mint)?;

    let mut instructions = Vec::with_capacity(2);
    if !receiver_account_exists {
        instructions.push(build_create_ata_ix(sender, receiver, mint));
    }
    instructions.push(build_transfer_ix(sender_ata, receiver_ata, sender, base_amount)?);

    Ok(instructions)
}
