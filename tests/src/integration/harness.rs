//! Shared ledger harness.

use std::sync::Arc;

use node_runtime::TransactionOutcome;
use ql_01_ledger_state::{LedgerState, ReadableAccountStore, ReadableTokenStore};
use ql_03_transaction_handlers::LedgerConfig;
use ql_04_workflows::{HandleWorkflow, IngestWorkflow, KeySatisfactionVerifier, QueryWorkflow};
use shared_types::{
    Account, AccountId, Key, Query, QueryData, QueryHeader, QueryPayment, QueryResponse,
    SignatureMap, SignedTransaction, Token, TokenId, TokenType, TransactionBody, TransactionData,
    TransactionRecord,
};

// =============================================================================
// ACCOUNTS AND TOKENS
// =============================================================================

pub const PAYER: AccountId = AccountId(1001);
pub const NODE: AccountId = AccountId(3);
pub const FUNDING: AccountId = AccountId(98);
pub const ALICE: AccountId = AccountId(1002);
/// Requires its own signature to receive value.
pub const BOB: AccountId = AccountId(1003);
/// Treasury of both tokens.
pub const TREASURY: AccountId = AccountId(1004);
pub const CAROL: AccountId = AccountId(1005);

/// Fungible token with pause and fee schedule keys.
pub const FUNGIBLE: TokenId = TokenId(2001);
/// Non-fungible token with a fee schedule key and no pause key.
pub const NFT: TokenId = TokenId(2002);

pub const STARTING_BALANCE: u64 = 1_000_000_000;

pub fn key(n: u8) -> Key {
    Key::Ed25519([n; 32])
}

pub fn account_key(id: AccountId) -> Key {
    key(id.num() as u8)
}

pub fn pause_key() -> Key {
    key(50)
}

pub fn fee_schedule_key() -> Key {
    key(51)
}

fn genesis() -> LedgerState {
    let account = |id| Account::new(id, account_key(id), STARTING_BALANCE);
    let mut treasury = account(TREASURY);
    treasury.num_treasury_titles = 2;

    LedgerState::new()
        .with_account(account(PAYER))
        .with_account(account(NODE))
        .with_account(account(FUNDING))
        .with_account(account(ALICE))
        .with_account(account(BOB).with_receiver_sig_required(true))
        .with_account(account(CAROL))
        .with_account(treasury)
        .with_token(
            Token::new(FUNGIBLE, TokenType::FungibleCommon, TREASURY)
                .with_symbol("Fungible", "FUN")
                .with_pause_key(pause_key())
                .with_fee_schedule_key(fee_schedule_key()),
        )
        .with_token(
            Token::new(NFT, TokenType::NonFungibleUnique, TREASURY)
                .with_symbol("Collectible", "NFT")
                .with_fee_schedule_key(fee_schedule_key()),
        )
}

// =============================================================================
// HARNESS
// =============================================================================

/// One ledger plus the three workflows, wired the way the node wires them.
pub struct Harness {
    pub state: LedgerState,
    ingest: IngestWorkflow,
    handle: HandleWorkflow<KeySatisfactionVerifier>,
    query: QueryWorkflow,
    next_valid_start: i64,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        let config = Arc::new(config);
        Self {
            state: genesis(),
            ingest: IngestWorkflow::new(Arc::clone(&config)),
            handle: HandleWorkflow::new(Arc::clone(&config), KeySatisfactionVerifier::new()),
            query: QueryWorkflow::new(config),
            next_valid_start: 1,
        }
    }

    /// A transaction paid by [`PAYER`] through [`NODE`], signed by the payer
    /// and `signers`. Each call gets a fresh transaction id.
    pub fn transaction(&mut self, data: TransactionData, signers: &[Key]) -> SignedTransaction {
        let mut body = TransactionBody::new(PAYER, NODE, data);
        body.transaction_id.valid_start_nanos = self.next_valid_start;
        self.next_valid_start += 1;

        let mut signatures = SignatureMap::new().with_signature(account_key(PAYER));
        for signer in signers {
            signatures.add(signer.clone());
        }
        SignedTransaction::new(body, signatures)
    }

    /// Ingest, then handle if admitted.
    pub fn submit(&mut self, data: TransactionData, signers: &[Key]) -> TransactionOutcome {
        let transaction = self.transaction(data, signers);
        self.submit_transaction(&transaction)
    }

    pub fn submit_transaction(&mut self, transaction: &SignedTransaction) -> TransactionOutcome {
        if let Err(err) = self.ingest.ingest(&self.state, transaction) {
            return TransactionOutcome::Rejected {
                transaction_id: transaction.body.transaction_id,
                code: err.code(),
            };
        }
        self.handle_transaction(transaction)
    }

    /// Handle without ingest, as for a transaction admitted by another node
    /// against older state.
    pub fn handle_only(&mut self, data: TransactionData, signers: &[Key]) -> TransactionOutcome {
        let transaction = self.transaction(data, signers);
        self.handle_transaction(&transaction)
    }

    pub fn handle_transaction(&mut self, transaction: &SignedTransaction) -> TransactionOutcome {
        match self.handle.handle(&mut self.state, transaction) {
            Ok(record) => TransactionOutcome::Handled(record),
            Err(err) => TransactionOutcome::Aborted(err),
        }
    }

    pub fn ingest(&self) -> &IngestWorkflow {
        &self.ingest
    }

    pub fn query(&self, data: QueryData, header: QueryHeader) -> QueryResponse {
        self.query.answer(&self.state, &Query { header, data })
    }

    /// An answer-only query paid generously by [`PAYER`].
    pub fn paid_query(&self, data: QueryData) -> QueryResponse {
        self.query(
            data,
            QueryHeader::answer_only(Some(QueryPayment {
                payer: PAYER,
                amount: 10_000_000,
            })),
        )
    }

    pub fn account(&self, id: AccountId) -> Account {
        self.state.get_account(id).expect("account exists")
    }

    pub fn token(&self, id: TokenId) -> Token {
        self.state.get_token(id).expect("token exists")
    }

    pub fn balance(&self, id: AccountId) -> u64 {
        self.account(id).balance
    }
}

/// The record of a handled outcome.
pub fn handled(outcome: TransactionOutcome) -> TransactionRecord {
    match outcome {
        TransactionOutcome::Handled(record) => record,
        other => panic!("expected a handled transaction, got {other:?}"),
    }
}

/// Asserts the record's transfers are exactly the fee charge.
pub fn assert_fee_only(record: &TransactionRecord) {
    assert_eq!(record.net_amount(PAYER), -i128::from(record.transaction_fee));
    assert_eq!(
        record.net_amount(NODE) + record.net_amount(FUNDING),
        i128::from(record.transaction_fee)
    );
    let others = record
        .transfers
        .iter()
        .filter(|t| ![PAYER, NODE, FUNDING].contains(&t.account_id))
        .count();
    assert_eq!(others, 0, "unexpected transfers: {:?}", record.transfers);
}
