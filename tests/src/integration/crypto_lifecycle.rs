//! # Crypto Account Lifecycle
//!
//! Deletion with a beneficiary, key rotation and staking elections, each
//! followed through ingest, handle and the account queries.

#[cfg(test)]
mod tests {
    use crate::integration::harness::*;
    use ql_03_transaction_handlers::LedgerConfig;
    use shared_types::{
        AccountId, AccountInfo, AccountQueryBody, CryptoDeleteBody, CryptoUpdateBody, QueryAnswer,
        QueryData, QueryHeader, ResponseCode, StakedId, StakingElection, TransactionData,
    };

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn delete(target: AccountId, beneficiary: AccountId) -> TransactionData {
        TransactionData::CryptoDelete(CryptoDeleteBody {
            delete_account_id: Some(target),
            transfer_account_id: Some(beneficiary),
        })
    }

    fn stake(election: StakingElection) -> TransactionData {
        TransactionData::CryptoUpdate(CryptoUpdateBody {
            account_id: Some(ALICE),
            staking: Some(election),
            ..Default::default()
        })
    }

    fn account_info(harness: &Harness, id: AccountId) -> AccountInfo {
        let response = harness.paid_query(QueryData::CryptoGetInfo(AccountQueryBody {
            account_id: Some(id),
        }));
        assert_eq!(response.header.status, ResponseCode::Ok);
        match response.answer {
            Some(QueryAnswer::AccountInfo(info)) => info,
            other => panic!("expected account info, got {other:?}"),
        }
    }

    // =========================================================================
    // DELETION
    // =========================================================================

    #[test]
    fn test_delete_moves_balance_to_beneficiary() {
        let mut harness = Harness::new();

        let record = handled(harness.submit(delete(ALICE, CAROL), &[account_key(ALICE)]));
        assert_eq!(record.status, ResponseCode::Success);
        assert!(record.transaction_fee > 0);
        assert_eq!(record.net_amount(ALICE), -i128::from(STARTING_BALANCE));
        assert_eq!(record.net_amount(CAROL), i128::from(STARTING_BALANCE));

        let alice = harness.account(ALICE);
        assert!(alice.deleted);
        assert_eq!(alice.balance, 0);
        assert_eq!(harness.balance(CAROL), 2 * STARTING_BALANCE);
        assert_eq!(harness.balance(PAYER), STARTING_BALANCE - record.transaction_fee);

        let balance = harness.query(
            QueryData::CryptoGetAccountBalance(AccountQueryBody {
                account_id: Some(ALICE),
            }),
            QueryHeader::answer_only(None),
        );
        assert_eq!(balance.header.status, ResponseCode::AccountDeleted);
        assert!(balance.answer.is_none());
    }

    #[test]
    fn test_repeat_delete_fails_at_handle_and_still_pays() {
        let mut harness = Harness::new();
        handled(harness.submit(delete(ALICE, CAROL), &[account_key(ALICE)]));
        let payer_before = harness.balance(PAYER);

        // The deleted account still exists, so ingest admits the transaction.
        let record = handled(harness.submit(delete(ALICE, CAROL), &[account_key(ALICE)]));
        assert_eq!(record.status, ResponseCode::AccountDeleted);
        assert_fee_only(&record);
        assert_eq!(harness.balance(PAYER), payer_before - record.transaction_fee);
        assert_eq!(harness.balance(CAROL), 2 * STARTING_BALANCE);
    }

    #[test]
    fn test_delete_into_receiver_sig_account_needs_its_signature() {
        let mut harness = Harness::new();

        let record = handled(harness.submit(delete(ALICE, BOB), &[account_key(ALICE)]));
        assert_eq!(record.status, ResponseCode::InvalidSignature);
        assert_fee_only(&record);
        assert!(!harness.account(ALICE).deleted);

        let record = handled(harness.submit(
            delete(ALICE, BOB),
            &[account_key(ALICE), account_key(BOB)],
        ));
        assert_eq!(record.status, ResponseCode::Success);
        assert_eq!(harness.balance(BOB), 2 * STARTING_BALANCE);
    }

    #[test]
    fn test_delete_rejections() {
        let mut harness = Harness::new();
        let before = harness.state.state_hash();

        let outcome = harness.submit(delete(ALICE, ALICE), &[account_key(ALICE)]);
        assert_eq!(
            outcome.status(),
            Some(ResponseCode::TransferAccountSameAsDeleteAccount)
        );
        let outcome = harness.submit(delete(AccountId(404), CAROL), &[]);
        assert_eq!(outcome.status(), Some(ResponseCode::InvalidAccountId));
        assert_eq!(harness.state.state_hash(), before);
        assert!(harness.state.records().is_empty());

        let record = handled(harness.submit(delete(TREASURY, CAROL), &[account_key(TREASURY)]));
        assert_eq!(record.status, ResponseCode::AccountIsTreasury);
        assert!(!harness.account(TREASURY).deleted);
    }

    // =========================================================================
    // KEY ROTATION
    // =========================================================================

    #[test]
    fn test_key_rotation_requires_old_and_new_keys() {
        let mut harness = Harness::new();
        let rotate = || {
            TransactionData::CryptoUpdate(CryptoUpdateBody {
                account_id: Some(ALICE),
                key: Some(key(77)),
                ..Default::default()
            })
        };

        let record = handled(harness.submit(rotate(), &[account_key(ALICE)]));
        assert_eq!(record.status, ResponseCode::InvalidSignature);
        assert_eq!(harness.account(ALICE).key, account_key(ALICE));

        let record = handled(harness.submit(rotate(), &[account_key(ALICE), key(77)]));
        assert_eq!(record.status, ResponseCode::Success);
        assert_eq!(harness.account(ALICE).key, key(77));

        // Later transactions are authorized against the new key.
        let record = handled(harness.submit(delete(ALICE, CAROL), &[account_key(ALICE)]));
        assert_eq!(record.status, ResponseCode::InvalidSignature);
        let record = handled(harness.submit(delete(ALICE, CAROL), &[key(77)]));
        assert_eq!(record.status, ResponseCode::Success);
    }

    // =========================================================================
    // STAKING
    // =========================================================================

    #[test]
    fn test_stake_to_node_zero_is_stored_as_minus_one() {
        let mut harness = Harness::new();

        let record =
            handled(harness.submit(stake(StakingElection::to_node(0)), &[account_key(ALICE)]));
        assert_eq!(record.status, ResponseCode::Success);

        let staked = harness.account(ALICE).staked_id.expect("staking election stored");
        assert_eq!(staked, StakedId::Node(0));
        assert_eq!(staked.to_raw(), -1);

        let info = account_info(&harness, ALICE);
        assert_eq!(info.staking.staked_node_id, Some(0));
        assert_eq!(info.staking.staked_account_id, None);
    }

    #[test]
    fn test_restake_to_account() {
        let mut harness = Harness::new();
        handled(harness.submit(stake(StakingElection::to_node(2)), &[account_key(ALICE)]));

        let record = handled(harness.submit(
            stake(StakingElection::to_account(CAROL)),
            &[account_key(ALICE)],
        ));
        assert_eq!(record.status, ResponseCode::Success);

        let info = account_info(&harness, ALICE);
        assert_eq!(info.staking.staked_account_id, Some(CAROL));
        assert_eq!(info.staking.staked_node_id, None);
        assert_eq!(harness.account(ALICE).staked_id.map(StakedId::to_raw), Some(1005));
    }

    #[test]
    fn test_invalid_staking_targets() {
        let mut harness = Harness::new();

        let record = handled(harness.submit(
            stake(StakingElection::to_account(ALICE)),
            &[account_key(ALICE)],
        ));
        assert_eq!(record.status, ResponseCode::SelfStakingIsNotAllowed);

        // Node 4 is outside the default four-node network.
        let record =
            handled(harness.submit(stake(StakingElection::to_node(4)), &[account_key(ALICE)]));
        assert_eq!(record.status, ResponseCode::InvalidStakingId);

        // A negative node index never gets past ingest.
        let outcome = harness.submit(stake(StakingElection::to_node(-1)), &[account_key(ALICE)]);
        assert_eq!(outcome.status(), Some(ResponseCode::InvalidStakingId));

        assert_eq!(harness.account(ALICE).staked_id, None);
    }

    #[test]
    fn test_staking_disabled() {
        let mut config = LedgerConfig::default();
        config.staking.is_enabled = false;
        let mut harness = Harness::with_config(config);

        let record =
            handled(harness.submit(stake(StakingElection::to_node(0)), &[account_key(ALICE)]));
        assert_eq!(record.status, ResponseCode::StakingNotEnabled);
        assert_fee_only(&record);
        assert_eq!(harness.account(ALICE).staked_id, None);
    }
}
