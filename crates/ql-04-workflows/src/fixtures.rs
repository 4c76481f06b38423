//! Shared test fixtures.

use shared_types::{
    Account, AccountId, Key, SignatureMap, SignedTransaction, Token, TokenId, TokenType,
    TransactionBody, TransactionData,
};
use ql_01_ledger_state::LedgerState;

pub const PAYER: AccountId = AccountId(1001);
pub const NODE: AccountId = AccountId(3);
pub const FUNDING: AccountId = AccountId(98);
pub const ALICE: AccountId = AccountId(1002);
pub const TREASURY: AccountId = AccountId(1004);

/// Fungible token with a pause key.
pub const FUNGIBLE: TokenId = TokenId(2001);
/// Non-fungible token without keys.
pub const NFT: TokenId = TokenId(2002);

pub const STARTING_BALANCE: u64 = 1_000_000_000;

pub fn key(n: u8) -> Key {
    Key::Ed25519([n; 32])
}

pub fn pause_key() -> Key {
    key(50)
}

pub fn account(id: AccountId) -> Account {
    Account::new(id, key(id.num() as u8), STARTING_BALANCE)
}

pub fn ledger() -> LedgerState {
    let mut treasury = account(TREASURY);
    treasury.num_treasury_titles = 2;
    LedgerState::new()
        .with_account(account(PAYER))
        .with_account(account(NODE))
        .with_account(account(FUNDING))
        .with_account(account(ALICE))
        .with_account(treasury)
        .with_token(
            Token::new(FUNGIBLE, TokenType::FungibleCommon, TREASURY)
                .with_symbol("Fungible", "FUN")
                .with_pause_key(pause_key()),
        )
        .with_token(Token::new(NFT, TokenType::NonFungibleUnique, TREASURY))
}

/// The standard ledger minus one account.
pub fn ledger_without(missing: AccountId) -> LedgerState {
    let mut state = LedgerState::new();
    for id in [PAYER, NODE, FUNDING, ALICE, TREASURY] {
        if id != missing {
            state.insert_account(account(id));
        }
    }
    state.with_token(
        Token::new(FUNGIBLE, TokenType::FungibleCommon, TREASURY).with_pause_key(pause_key()),
    )
}

/// A transaction from [`PAYER`] through [`NODE`], signed by the payer and
/// every key in `signers`.
pub fn signed(data: TransactionData, signers: &[Key]) -> SignedTransaction {
    let mut signatures = SignatureMap::new().with_signature(account(PAYER).key);
    for key in signers {
        signatures.add(key.clone());
    }
    SignedTransaction::new(TransactionBody::new(PAYER, NODE, data), signatures)
}
