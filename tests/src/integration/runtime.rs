//! # Node Runtime
//!
//! A genesis built from configuration, a mixed batch through
//! `NodeRuntime::submit_batch`, and queries over the result.

#[cfg(test)]
mod tests {
    use crate::integration::harness::{
        account_key, pause_key, ALICE, CAROL, FUNGIBLE, PAYER, TREASURY,
    };
    use node_runtime::genesis::{GenesisAccount, GenesisToken};
    use node_runtime::{GenesisBuilder, NodeConfig, NodeRuntime, TransactionOutcome};
    use ql_01_ledger_state::{ReadableAccountStore, ReadableTokenStore};
    use shared_types::{
        AccountId, AccountQueryBody, CryptoDeleteBody, CryptoUpdateBody, Key, Query, QueryAnswer,
        QueryData, QueryHeader, ResponseCode, SignatureMap, SignedTransaction, TokenPauseBody,
        TokenType, TransactionBody, TransactionData,
    };

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    const BALANCE: u64 = 500_000_000;

    fn genesis_account(id: AccountId) -> GenesisAccount {
        GenesisAccount {
            id: id.num(),
            key: hex_key(id.num() as u8),
            balance: BALANCE,
            receiver_sig_required: false,
            memo: String::new(),
        }
    }

    fn hex_key(n: u8) -> String {
        hex::encode([n; 32])
    }

    fn runtime() -> NodeRuntime {
        let mut config = NodeConfig::default();
        config.genesis.accounts.extend([PAYER, ALICE, CAROL, TREASURY].map(genesis_account));
        config.genesis.tokens.push(GenesisToken {
            id: FUNGIBLE.num(),
            token_type: TokenType::FungibleCommon,
            name: "Fungible".into(),
            symbol: "FUN".into(),
            treasury: TREASURY.num(),
            pause_key: Some(hex_key(50)),
            fee_schedule_key: None,
        });
        config.validate().unwrap();

        let genesis = GenesisBuilder::new(&config.genesis, &config.ledger)
            .build()
            .unwrap();
        NodeRuntime::new(config.ledger, genesis)
    }

    fn signed(valid_start_nanos: i64, data: TransactionData, signers: &[Key]) -> SignedTransaction {
        let mut body = TransactionBody::new(PAYER, AccountId(3), data);
        body.transaction_id.valid_start_nanos = valid_start_nanos;
        let mut signatures = SignatureMap::new().with_signature(account_key(PAYER));
        for signer in signers {
            signatures.add(signer.clone());
        }
        SignedTransaction::new(body, signatures)
    }

    fn delete(target: AccountId, beneficiary: AccountId) -> TransactionData {
        TransactionData::CryptoDelete(CryptoDeleteBody {
            delete_account_id: Some(target),
            transfer_account_id: Some(beneficiary),
        })
    }

    // =========================================================================
    // BATCHES
    // =========================================================================

    #[tokio::test]
    async fn test_mixed_batch() {
        let runtime = runtime();
        let batch = vec![
            signed(
                1,
                TransactionData::TokenPause(TokenPauseBody {
                    token_id: Some(FUNGIBLE),
                }),
                &[pause_key()],
            ),
            signed(2, delete(ALICE, ALICE), &[account_key(ALICE)]),
            signed(3, delete(ALICE, CAROL), &[account_key(ALICE)]),
            signed(
                4,
                TransactionData::CryptoUpdate(CryptoUpdateBody {
                    account_id: Some(ALICE),
                    memo: Some("too late".into()),
                    ..Default::default()
                }),
                &[account_key(ALICE)],
            ),
        ];

        let outcomes = runtime.submit_batch(batch).await.unwrap();
        let statuses: Vec<_> = outcomes.iter().map(TransactionOutcome::status).collect();
        assert_eq!(
            statuses,
            vec![
                Some(ResponseCode::Success),
                Some(ResponseCode::TransferAccountSameAsDeleteAccount),
                Some(ResponseCode::Success),
                Some(ResponseCode::AccountDeleted),
            ]
        );

        let state = runtime.state();
        let state = state.read();
        assert_eq!(state.records().len(), 3);
        assert!(state.get_token(FUNGIBLE).unwrap().paused);
        assert!(state.get_account(ALICE).unwrap().deleted);
        assert_eq!(state.get_account(CAROL).unwrap().balance, 2 * BALANCE);
    }

    #[tokio::test]
    async fn test_fees_reach_node_and_funding_accounts() {
        let runtime = runtime();
        let config = NodeConfig::default();
        let funding = config.ledger.accounts.funding_account;

        let outcomes = runtime
            .submit_batch(vec![signed(1, delete(ALICE, CAROL), &[account_key(ALICE)])])
            .await
            .unwrap();
        let TransactionOutcome::Handled(record) = &outcomes[0] else {
            panic!("expected a handled transaction, got {:?}", outcomes[0]);
        };

        let state = runtime.state();
        let state = state.read();
        let node = state.get_account(AccountId(3)).unwrap().balance;
        let funding = state.get_account(funding).unwrap().balance;
        assert_eq!(u128::from(node) + u128::from(funding), u128::from(record.transaction_fee));
        assert_eq!(
            state.get_account(PAYER).unwrap().balance,
            BALANCE - record.transaction_fee
        );
    }

    #[tokio::test]
    async fn test_queries_follow_batches() {
        let runtime = runtime();
        let balance = |id| {
            let response = runtime.query(&Query {
                header: QueryHeader::answer_only(None),
                data: QueryData::CryptoGetAccountBalance(AccountQueryBody {
                    account_id: Some(id),
                }),
            });
            match response.answer {
                Some(QueryAnswer::AccountBalance { balance, .. }) => balance,
                other => panic!("expected a balance, got {other:?}"),
            }
        };
        assert_eq!(balance(CAROL), BALANCE);

        runtime
            .submit_batch(vec![signed(1, delete(ALICE, CAROL), &[account_key(ALICE)])])
            .await
            .unwrap();
        assert_eq!(balance(CAROL), 2 * BALANCE);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let runtime = runtime();
        let before = runtime.state_hash();
        let outcomes = runtime.submit_batch(Vec::new()).await.unwrap();
        assert!(outcomes.is_empty());
        assert_eq!(runtime.state_hash(), before);
    }
}
