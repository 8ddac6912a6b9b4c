#![allow(dead_code)]
use std::cell::RefCell;

use async_trait::async_trait;
use litesvm::LiteSVM;
use solana_program::program_pack::Pack;
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use spl_token::state::{Account as TokenAccount, Mint};
use tokio::time::Instant;
use wrapped_transfer_api::prelude::*;
use wrapped_transfer_client::{program::TransactionSubmitter, LedgerReader};

use super::{mint_data, token_account_data};

/// Ledger backed by an in-process validator with the SPL programs loaded.
pub struct SvmLedger {
    pub svm: RefCell<LiteSVM>,
}

impl SvmLedger {
    pub fn new() -> Self {
        Self { svm: RefCell::new(LiteSVM::new()) }
    }

    pub fn create_payer(&self) -> Keypair {
        let payer = Keypair::new();
        self.svm.borrow_mut().airdrop(&payer.pubkey(), 1_000_000_000).unwrap();
        payer
    }

    /// Places an initialized mint at `mint` without running the program that
    /// owns its seeds.
    pub fn set_mint(&self, mint: Pubkey, decimals: u8) {
        let mut svm = self.svm.borrow_mut();
        let lamports = svm.minimum_balance_for_rent_exemption(Mint::LEN);
        svm.set_account(
            mint,
            Account {
                lamports,
                data: mint_data(decimals),
                owner: spl_token::id(),
                executable: false,
                rent_epoch: 0,
            },
        )
        .unwrap();
    }

    pub fn set_token_account(&self, owner: Pubkey, mint: Pubkey, amount: u64) -> Pubkey {
        let (ata, _) = find_associated_token_address(&owner, &mint).unwrap();
        let mut svm = self.svm.borrow_mut();
        let lamports = svm.minimum_balance_for_rent_exemption(TokenAccount::LEN);
        svm.set_account(
            ata,
            Account {
                lamports,
                data: token_account_data(owner, mint, amount),
                owner: spl_token::id(),
                executable: false,
                rent_epoch: 0,
            },
        )
        .unwrap();
        ata
    }

    pub fn token_balance(&self, address: &Pubkey) -> Option<u64> {
        let account = self.svm.borrow().get_account(address)?;
        let token = TokenAccount::unpack(&account.data).ok()?;
        Some(token.amount)
    }
}

#[async_trait(?Send)]
impl LedgerReader for SvmLedger {
    async fn fetch_account(
        &self,
        address: &Pubkey,
        _commitment: CommitmentConfig,
    ) -> Result<Option<Account>, TransferError> {
        Ok(self.svm.borrow().get_account(address))
    }

    async fn fetch_latest_blockhash(&self, _commitment: CommitmentConfig) -> Result<Hash, TransferError> {
        Ok(self.svm.borrow().latest_blockhash())
    }
}

#[async_trait(?Send)]
impl TransactionSubmitter for SvmLedger {
    async fn send(&self, transaction: &Transaction) -> Result<Signature, TransferError> {
        let mut svm = self.svm.borrow_mut();
        match svm.send_transaction(transaction.clone()) {
            Ok(meta) => Ok(meta.signature),
            Err(failed) => Err(TransferError::Submission(format!(
                "{:?}\n{}",
                failed.err,
                failed.meta.logs.join("\n")
            ))),
        }
    }

    // Transactions are executed synchronously on send.
    async fn confirm(&self, _signature: &Signature, _deadline: Instant) -> Result<(), TransferError> {
        Ok(())
    }
}
