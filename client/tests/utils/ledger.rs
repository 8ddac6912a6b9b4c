#![allow(dead_code)]
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use solana_program::{program_option::COption, program_pack::Pack};
use solana_sdk::{account::Account, commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey};
use spl_token::state::{Account as TokenAccount, AccountState, Mint};
use wrapped_transfer_api::prelude::*;
use wrapped_transfer_client::LedgerReader;

#[derive(Clone, Debug, PartialEq)]
pub enum LedgerCall {
    Account(Pubkey),
    Blockhash,
}

/// In-memory ledger that records every read in order.
pub struct MockLedger {
    pub accounts: HashMap<Pubkey, Account>,
    pub fail_accounts: HashSet<Pubkey>,
    pub blockhash: Hash,
    pub fail_blockhash: bool,
    pub calls: RefCell<Vec<LedgerCall>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            fail_accounts: HashSet::new(),
            blockhash: Hash::new_unique(),
            fail_blockhash: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_mint(mut self, mint: Pubkey, decimals: u8) -> Self {
        self.accounts.insert(mint, mint_account(decimals));
        self
    }

    pub fn with_token_account(mut self, owner: Pubkey, mint: Pubkey, amount: u64) -> Self {
        let (ata, _) = find_associated_token_address(&owner, &mint).unwrap();
        self.accounts.insert(ata, token_account(owner, mint, amount));
        self
    }

    pub fn calls(&self) -> Vec<LedgerCall> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl LedgerReader for MockLedger {
    async fn fetch_account(
        &self,
        address: &Pubkey,
        _commitment: CommitmentConfig,
    ) -> Result<Option<Account>, TransferError> {
        self.calls.borrow_mut().push(LedgerCall::Account(*address));
        if self.fail_accounts.contains(address) {
            return Err(TransferError::TransientFetch {
                step: "fetch account",
                message: format!("{}: connection reset", address),
            });
        }
        Ok(self.accounts.get(address).cloned())
    }

    async fn fetch_latest_blockhash(&self, _commitment: CommitmentConfig) -> Result<Hash, TransferError> {
        self.calls.borrow_mut().push(LedgerCall::Blockhash);
        if self.fail_blockhash {
            return Err(TransferError::TransientFetch {
                step: "fetch latest blockhash",
                message: "connection reset".to_string(),
            });
        }
        Ok(self.blockhash)
    }
}

pub fn mint_data(decimals: u8) -> Vec<u8> {
    let mut data = vec![0u8; Mint::LEN];
    Mint::pack(
        Mint {
            mint_authority: COption::Some(Pubkey::new_unique()),
            supply: 1_000_000_000_000,
            decimals,
            is_initialized: true,
            freeze_authority: COption::None,
        },
        &mut data,
    )
    .unwrap();
    data
}

pub fn mint_account(decimals: u8) -> Account {
    Account {
        lamports: 1_461_600,
        data: mint_data(decimals),
        owner: spl_token::id(),
        executable: false,
        rent_epoch: 0,
    }
}

pub fn token_account_data(owner: Pubkey, mint: Pubkey, amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; TokenAccount::LEN];
    TokenAccount::pack(
        TokenAccount {
            mint,
            owner,
            amount,
            delegate: COption::None,
            state: AccountState::Initialized,
            is_native: COption::None,
            delegated_amount: 0,
            close_authority: COption::None,
        },
        &mut data,
    )
    .unwrap();
    data
}

pub fn token_account(owner: Pubkey, mint: Pubkey, amount: u64) -> Account {
    Account {
        lamports: 2_039_280,
        data: token_account_data(owner, mint, amount),
        owner: spl_token::id(),
        executable: false,
        rent_epoch: 0,
    }
}
