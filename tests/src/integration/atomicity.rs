//! # Transaction Atomicity
//!
//! A handled transaction commits its fee and its effects, or its fee alone,
//! or nothing at all when an invariant breaks.

#[cfg(test)]
mod tests {
    use crate::integration::harness::*;
    use node_runtime::TransactionOutcome;
    use ql_03_transaction_handlers::LedgerConfig;
    use ql_04_workflows::WorkflowError;
    use shared_types::{
        AccountId, CryptoDeleteBody, CryptoUpdateBody, InvariantViolation, ResponseCode,
        StakedIdKind, StakingElection, TokenPauseBody, TransactionData,
    };

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn pause() -> TransactionData {
        TransactionData::TokenPause(TokenPauseBody {
            token_id: Some(FUNGIBLE),
        })
    }

    fn delete(target: AccountId) -> TransactionData {
        TransactionData::CryptoDelete(CryptoDeleteBody {
            delete_account_id: Some(target),
            transfer_account_id: Some(CAROL),
        })
    }

    fn rename(memo: &str) -> TransactionData {
        TransactionData::CryptoUpdate(CryptoUpdateBody {
            account_id: Some(ALICE),
            memo: Some(memo.into()),
            ..Default::default()
        })
    }

    // =========================================================================
    // FATAL ABORTS
    // =========================================================================

    #[test]
    fn test_unresolvable_election_aborts_without_trace() {
        let mut harness = Harness::new();
        let before = harness.state.state_hash();

        // Ingest would reject this; handling it directly skips the check.
        let election = StakingElection {
            kind: StakedIdKind::Node,
            account_id: None,
            node_id: None,
        };
        let update = TransactionData::CryptoUpdate(CryptoUpdateBody {
            account_id: Some(ALICE),
            staking: Some(election),
            ..Default::default()
        });
        let outcome = harness.handle_only(update, &[account_key(ALICE)]);

        match outcome {
            TransactionOutcome::Aborted(WorkflowError::Fatal { source, .. }) => assert_eq!(
                source,
                InvariantViolation::UnresolvableStakedId {
                    kind: StakedIdKind::Node
                }
            ),
            other => panic!("expected a fatal abort, got {other:?}"),
        }
        assert_eq!(harness.state.state_hash(), before);
        assert!(harness.state.records().is_empty());
        assert_eq!(harness.balance(PAYER), STARTING_BALANCE);
    }

    #[test]
    fn test_missing_funding_account_aborts() {
        let mut config = LedgerConfig::default();
        config.accounts.funding_account = AccountId(777);
        let mut harness = Harness::with_config(config);
        let before = harness.state.state_hash();

        let outcome = harness.submit(pause(), &[pause_key()]);
        match outcome {
            TransactionOutcome::Aborted(WorkflowError::Fatal { source, .. }) => assert_eq!(
                source,
                InvariantViolation::MissingSystemAccount {
                    account: AccountId(777)
                }
            ),
            other => panic!("expected a fatal abort, got {other:?}"),
        }
        assert_eq!(harness.state.state_hash(), before);
        assert!(!harness.token(FUNGIBLE).paused);
    }

    #[test]
    fn test_abort_does_not_disturb_earlier_records() {
        let mut harness = Harness::new();
        handled(harness.submit(pause(), &[pause_key()]));
        let committed = harness.state.state_hash();

        let election = StakingElection {
            kind: StakedIdKind::Account,
            account_id: None,
            node_id: Some(1),
        };
        let update = TransactionData::CryptoUpdate(CryptoUpdateBody {
            account_id: Some(ALICE),
            staking: Some(election),
            ..Default::default()
        });
        let outcome = harness.handle_only(update, &[account_key(ALICE)]);
        assert!(matches!(outcome, TransactionOutcome::Aborted(_)));
        assert_eq!(outcome.status(), None);

        assert_eq!(harness.state.state_hash(), committed);
        assert_eq!(harness.state.records().len(), 1);
        assert!(harness.token(FUNGIBLE).paused);
    }

    // =========================================================================
    // STATE CHANGES BETWEEN INGEST AND HANDLE
    // =========================================================================

    #[test]
    fn test_admitted_transaction_fails_on_newer_state() {
        let mut harness = Harness::new();
        let update = harness.transaction(rename("later"), &[account_key(ALICE)]);
        assert!(harness.ingest().ingest(&harness.state, &update).is_ok());

        handled(harness.submit(delete(ALICE), &[account_key(ALICE)]));

        let record = handled(harness.handle_transaction(&update));
        assert_eq!(record.status, ResponseCode::AccountDeleted);
        assert_fee_only(&record);
        assert_eq!(harness.account(ALICE).memo, "");
    }

    #[test]
    fn test_deleted_payer_pays_nothing() {
        let mut harness = Harness::new();
        let later = harness.transaction(pause(), &[pause_key()]);
        assert!(harness.ingest().ingest(&harness.state, &later).is_ok());

        // The payer key always signs, so the payer can delete itself.
        let record = handled(harness.submit(delete(PAYER), &[]));
        assert_eq!(record.status, ResponseCode::Success);

        let record = handled(harness.handle_transaction(&later));
        assert_eq!(record.status, ResponseCode::PayerAccountDeleted);
        assert_eq!(record.transaction_fee, 0);
        assert!(record.transfers.is_empty());
        assert!(!harness.token(FUNGIBLE).paused);
    }

    // =========================================================================
    // RECORDS
    // =========================================================================

    #[test]
    fn test_every_handled_transaction_leaves_one_record() {
        let mut harness = Harness::new();

        let mut first = harness.transaction(rename("one"), &[account_key(ALICE)]);
        first.body.memo = "first".into();
        let first = handled(harness.submit_transaction(&first));
        let second = handled(harness.submit(delete(TREASURY), &[account_key(TREASURY)]));
        let rejected = harness.submit(delete(AccountId(404)), &[]);

        assert_eq!(second.status, ResponseCode::AccountIsTreasury);
        assert!(matches!(rejected, TransactionOutcome::Rejected { .. }));

        let records = harness.state.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], first);
        assert_eq!(records[1], second);
        assert_eq!(records[0].memo, "first");
        assert_ne!(records[0].transaction_hash, records[1].transaction_hash);
        assert!(
            records[0].transaction_id.valid_start_nanos
                < records[1].transaction_id.valid_start_nanos
        );
        assert_eq!(harness.state.last_record(), Some(&second));
    }
}
