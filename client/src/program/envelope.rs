use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use wrapped_transfer_api::prelude::*;

/// An unsigned transaction: ordered instructions, the blockhash it must land
/// before, and the account paying its fees. Immutable once assembled.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionEnvelope {
    instructions: Vec<Instruction>,
    recent_blockhash: Hash,
    fee_payer: Pubkey,
}

impl TransactionEnvelope {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn recent_blockhash(&self) -> Hash {
        self.recent_blockhash
    }

    pub fn fee_payer(&self) -> Pubkey {
        self.fee_payer
    }

    pub fn message(&self) -> Message {
        Message::new_with_blockhash(&self.instructions, Some(&self.fee_payer), &self.recent_blockhash)
    }

    /// Signs with the fee payer's keypair. The signer must be the fee payer
    /// and the only required signature.
    pub fn sign(&self, signer: &Keypair) -> Result<Transaction, TransferError> {
        if signer.pubkey() != self.fee_payer {
            return Err(TransferError::Signing(format!(
                "signer {} is not the fee payer {}",
                signer.pubkey(),
                self.fee_payer
            )));
        }

        let mut transaction = Transaction::new_unsigned(self.message());
        transaction
            .try_sign(&[signer], self.recent_blockhash)
            .map_err(|e| TransferError::Signing(e.to_string()))?;
        Ok(transaction)
    }
}

pub fn assemble_transaction(
    instructions: Vec<Instruction>,
    recent_blockhash: Hash,
    fee_payer: Pubkey,
) -> Result<TransactionEnvelope, TransferError> {
    if instructions.is_empty() {
        return Err(TransferError::EmptyTransaction);
    }
    if fee_payer == Pubkey::default() {
        return Err(TransferError::InvalidPayer);
    }

    Ok(TransactionEnvelope {
        instructions,
        recent_blockhash,
        fee_payer,
    })
}
