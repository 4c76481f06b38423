//! # Query Workflow
//!
//! Costs, payments and answers over state changed by handled transactions.

#[cfg(test)]
mod tests {
    use crate::integration::harness::*;
    use shared_types::{
        AccountId, AccountQueryBody, CryptoDeleteBody, CryptoUpdateBody, CustomFee, GetByKeyBody,
        GetBySolidityIdBody, QueryAnswer, QueryData, QueryHeader, QueryPayment, ResponseCode,
        ResponseType, TokenFeeScheduleUpdateBody, TokenQueryBody, TransactionData,
    };

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn alice_info() -> QueryData {
        QueryData::CryptoGetInfo(AccountQueryBody {
            account_id: Some(ALICE),
        })
    }

    fn fungible_info() -> QueryData {
        QueryData::TokenGetInfo(TokenQueryBody {
            token_id: Some(FUNGIBLE),
        })
    }

    fn paid_by(payer: AccountId, amount: u64) -> QueryHeader {
        QueryHeader::answer_only(Some(QueryPayment { payer, amount }))
    }

    // =========================================================================
    // COST AND PAYMENT
    // =========================================================================

    #[test]
    fn test_cost_then_answer() {
        let harness = Harness::new();

        let cost = harness.query(alice_info(), QueryHeader::cost_answer());
        assert_eq!(cost.header.status, ResponseCode::Ok);
        assert_eq!(cost.header.response_type, ResponseType::CostAnswer);
        assert!(cost.answer.is_none());
        let price = cost.header.cost;
        assert!(price > 0);

        let short = harness.query(alice_info(), paid_by(PAYER, price - 1));
        assert_eq!(short.header.status, ResponseCode::InsufficientTxFee);
        assert!(short.answer.is_none());

        let response = harness.query(alice_info(), paid_by(PAYER, price));
        assert_eq!(response.header.status, ResponseCode::Ok);
        assert_eq!(response.header.cost, price);
        match response.answer {
            Some(QueryAnswer::AccountInfo(info)) => {
                assert_eq!(info.account_id, ALICE);
                assert_eq!(info.balance, STARTING_BALANCE);
                assert_eq!(info.key, account_key(ALICE));
            }
            other => panic!("expected account info, got {other:?}"),
        }

        // Answering a query never settles its payment.
        assert_eq!(harness.balance(PAYER), STARTING_BALANCE);
    }

    #[test]
    fn test_payment_from_deleted_payer() {
        let mut harness = Harness::new();
        let delete = TransactionData::CryptoDelete(CryptoDeleteBody {
            delete_account_id: Some(ALICE),
            transfer_account_id: Some(CAROL),
        });
        handled(harness.submit(delete, &[account_key(ALICE)]));

        let response = harness.query(fungible_info(), paid_by(ALICE, 10_000_000));
        assert_eq!(response.header.status, ResponseCode::PayerAccountDeleted);
        let response = harness.query(fungible_info(), paid_by(CAROL, 10_000_000));
        assert_eq!(response.header.status, ResponseCode::Ok);
    }

    #[test]
    fn test_balance_query_is_free() {
        let mut harness = Harness::new();
        let balance = || {
            QueryData::CryptoGetAccountBalance(AccountQueryBody {
                account_id: Some(PAYER),
            })
        };
        let cost = harness.query(balance(), QueryHeader::cost_answer());
        assert_eq!(cost.header.cost, 0);

        let update = TransactionData::CryptoUpdate(CryptoUpdateBody {
            account_id: Some(ALICE),
            memo: Some("renamed".into()),
            ..Default::default()
        });
        let record = handled(harness.submit(update, &[account_key(ALICE)]));

        let response = harness.query(balance(), QueryHeader::answer_only(None));
        assert_eq!(
            response.answer,
            Some(QueryAnswer::AccountBalance {
                account_id: PAYER,
                balance: STARTING_BALANCE - record.transaction_fee,
            })
        );
    }

    // =========================================================================
    // ANSWERS TRACK STATE
    // =========================================================================

    #[test]
    fn test_token_info_cost_grows_with_fee_schedule() {
        let mut harness = Harness::new();
        let before = harness.query(fungible_info(), QueryHeader::cost_answer()).header.cost;

        let update = TransactionData::TokenFeeScheduleUpdate(TokenFeeScheduleUpdateBody {
            token_id: Some(FUNGIBLE),
            custom_fees: vec![CustomFee::fixed(CAROL, 5), CustomFee::fractional(CAROL, 1, 50)],
        });
        let record = handled(harness.submit(update, &[fee_schedule_key()]));
        assert_eq!(record.status, ResponseCode::Success);

        let after = harness.query(fungible_info(), QueryHeader::cost_answer()).header.cost;
        assert!(after > before);

        let response = harness.query(fungible_info(), paid_by(PAYER, after));
        match response.answer {
            Some(QueryAnswer::TokenInfo(info)) => {
                assert_eq!(info.custom_fees.len(), 2);
                assert_eq!(info.treasury_account_id, TREASURY);
                assert_eq!(info.symbol, "FUN");
            }
            other => panic!("expected token info, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_entities() {
        let harness = Harness::new();

        let response = harness.paid_query(QueryData::CryptoGetInfo(AccountQueryBody {
            account_id: Some(AccountId(404)),
        }));
        assert_eq!(response.header.status, ResponseCode::InvalidAccountId);
        assert_eq!(response.header.cost, 0);

        let response =
            harness.paid_query(QueryData::TokenGetInfo(TokenQueryBody { token_id: None }));
        assert_eq!(response.header.status, ResponseCode::InvalidTokenId);
    }

    // =========================================================================
    // UNSUPPORTED
    // =========================================================================

    #[test]
    fn test_state_proofs_not_supported() {
        let harness = Harness::new();
        for response_type in [ResponseType::AnswerStateProof, ResponseType::CostAnswerStateProof] {
            let response = harness.query(
                alice_info(),
                QueryHeader {
                    response_type,
                    payment: None,
                },
            );
            assert_eq!(response.header.status, ResponseCode::NotSupported);
            assert_eq!(response.header.response_type, response_type);
        }
    }

    #[test]
    fn test_retired_queries_not_supported() {
        let harness = Harness::new();
        let retired = [
            QueryData::GetByKey(GetByKeyBody {
                key: Some(account_key(ALICE)),
            }),
            QueryData::GetBySolidityId(GetBySolidityIdBody {
                solidity_id: "00000000000000000000000000000000000003ea".into(),
            }),
            QueryData::CryptoGetStakers(AccountQueryBody {
                account_id: Some(ALICE),
            }),
        ];
        for data in retired {
            for header in [QueryHeader::cost_answer(), QueryHeader::answer_only(None)] {
                let response = harness.query(data.clone(), header);
                assert_eq!(response.header.status, ResponseCode::NotSupported);
                assert!(response.answer.is_none());
            }
        }
    }
}
