//! # Integration Flows
//!
//! Drives the sequencer inbox through its IPC handler and checks what
//! subscribers on the shared bus observe.
//!
//! ## Flows Tested:
//!
//! 1. **Poster → Inbox → Refund**: accepted batches followed by their refund outcome
//! 2. **Operator → Refund policy**: funding, withdrawal and allow-list changes
//! 3. **Delayed queue → Inbox**: poster reads and permissionless force inclusion

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use primitive_types::U256;
    use shared_bus::{EventFilter, EventTopic, InboxEvent, Subscription};
    use shared_types::entities::{Address, BatchDataLocation};
    use si_01_gas_refund::{BudgetAdminCommand, BudgetAdminRequest, RefundPolicy};
    use si_02_sequencer_inbox::{
        ForceInclusionRequest, SequencerInboxApi, SubmissionOrigin,
    };
    use std::time::Duration;
    use tokio::time::timeout;

    // Coarse policy: gas_used * gas_price
    const COARSE_REFUND: u64 = 2_000;
    // Optimized policy: (1_000 + 10_000 + 64 * 16) * 2
    const OPTIMIZED_REFUND: u64 = 24_048;

    async fn next_event(sub: &mut Subscription) -> InboxEvent {
        timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout waiting for event")
            .expect("bus closed")
    }

    fn admin(refunder: Address, caller: Address, command: BudgetAdminCommand) -> BudgetAdminRequest {
        BudgetAdminRequest {
            correlation_id: correlation_id(),
            refunder,
            caller,
            command,
        }
    }

    fn fund(refunder: Address, amount: u64) -> BudgetAdminRequest {
        admin(
            refunder,
            Address::repeat_byte(0x99),
            BudgetAdminCommand::Fund {
                amount: U256::from(amount),
            },
        )
    }

    fn ledger_balance(fx: &Fixture, refunder: Address) -> U256 {
        fx.handler
            .service()
            .refunds()
            .get(&refunder)
            .map(|p| p.ledger().balance())
            .unwrap_or_default()
    }

    // =============================================================================
    // POSTER → INBOX → REFUND
    // =============================================================================

    /// Delivery precedes the refund outcome of the same batch
    #[tokio::test]
    async fn test_batches_with_coarse_refunds() {
        let mut fx = Fixture::new();
        let mut sub = fx.bus.subscribe(EventFilter::all());

        let funded = fx.handler.handle_budget_admin(fund(coarse_refunder(), 5_000)).await;
        assert!(funded.success);
        assert!(matches!(next_event(&mut sub).await, InboxEvent::BudgetFunded { .. }));

        for seq in 0..3u64 {
            let request = fx.next_request(10, coarse_refunder());
            let response = fx.handler.handle_submit(request).await;
            assert!(response.success, "batch {seq} rejected: {:?}", response.error);

            match next_event(&mut sub).await {
                InboxEvent::SequencerBatchDelivered {
                    batch_sequence_number,
                    sequenced_message_count,
                    ..
                } => {
                    assert_eq!(batch_sequence_number, seq);
                    assert_eq!(sequenced_message_count, (seq + 1) * 10);
                }
                other => panic!("Expected SequencerBatchDelivered, got {other:?}"),
            }
            let refund = next_event(&mut sub).await;
            assert_eq!(refund.topic(), EventTopic::GasRefund);
        }

        // 5_000 covers two full refunds and a partial one
        assert_eq!(fx.transfer.total_to(poster()), U256::from(5_000u64));
        assert_eq!(ledger_balance(&fx, coarse_refunder()), U256::zero());

        let request = fx.next_request(1, coarse_refunder());
        let response = fx.handler.handle_submit(request).await;
        assert!(response.success);
        assert_eq!(response.refund_paid, Some(U256::zero()));
        assert_eq!(fx.handler.service().batch_count(), 4);
    }

    /// Ceiling binds within an epoch and resets once it has elapsed
    #[tokio::test]
    async fn test_optimized_refund_epochs() {
        let mut fx = Fixture::new();
        fx.handler.handle_budget_admin(fund(optimized_refunder(), 1_000_000)).await;

        let mut paid = Vec::new();
        for _ in 0..4 {
            let request = fx.next_request(1, optimized_refunder());
            let response = fx.handler.handle_submit(request).await;
            assert!(response.success);
            paid.push(response.refund_paid.unwrap_or_default());
        }

        let remainder = EPOCH_CEILING - 2 * OPTIMIZED_REFUND;
        assert_eq!(
            paid,
            vec![
                U256::from(OPTIMIZED_REFUND),
                U256::from(OPTIMIZED_REFUND),
                U256::from(remainder),
                U256::zero(),
            ]
        );

        fx.host.advance(300, EPOCH_LENGTH);
        let request = fx.next_request(1, optimized_refunder());
        let response = fx.handler.handle_submit(request).await;
        assert_eq!(response.refund_paid, Some(U256::from(OPTIMIZED_REFUND)));

        assert_eq!(
            fx.transfer.total(),
            U256::from(EPOCH_CEILING + OPTIMIZED_REFUND)
        );
        assert_eq!(
            ledger_balance(&fx, optimized_refunder()),
            U256::from(1_000_000 - EPOCH_CEILING - OPTIMIZED_REFUND)
        );
    }

    /// A refused payout leaves the batch in place and the budget untouched
    #[tokio::test]
    async fn test_refused_payout_keeps_batch() {
        let mut fx = Fixture::new();
        fx.handler.handle_budget_admin(fund(coarse_refunder(), 10_000)).await;
        fx.transfer.refuse(poster());
        let mut refunds = fx.bus.subscribe(EventFilter::topics(vec![EventTopic::GasRefund]));

        let request = fx.next_request(5, coarse_refunder());
        let response = fx.handler.handle_submit(request).await;

        assert!(response.success);
        assert_eq!(response.sequenced_message_count, 5);
        match next_event(&mut refunds).await {
            InboxEvent::RefundDenied { reason, .. } => assert!(reason.contains("rejected")),
            other => panic!("Expected RefundDenied, got {other:?}"),
        }
        assert_eq!(ledger_balance(&fx, coarse_refunder()), U256::from(10_000u64));
    }

    /// Of two submissions built against the same head only the first lands
    #[tokio::test]
    async fn test_competing_posters() {
        let mut fx = Fixture::new();
        let mut sub = fx.bus.subscribe(EventFilter::topics(vec![EventTopic::Sequencer]));

        let first = fx.next_request(10, Address::zero());
        let mut second = fx.next_request(7, Address::zero());
        second.caller = second_poster();
        second.origin = SubmissionOrigin::FromContract;

        assert!(fx.handler.handle_submit(first).await.success);
        let rejected = fx.handler.handle_submit(second).await;

        assert!(!rejected.success);
        assert_eq!(rejected.sequenced_message_count, 10);
        assert!(matches!(next_event(&mut sub).await, InboxEvent::SequencerBatchDelivered { .. }));
        assert!(matches!(sub.try_recv(), Ok(None)));

        // Rebuilt against the new head it is accepted and its data published
        let mut retry = fx.next_request(7, Address::zero());
        retry.caller = second_poster();
        retry.origin = SubmissionOrigin::FromContract;
        assert!(fx.handler.handle_submit(retry).await.success);

        match next_event(&mut sub).await {
            InboxEvent::SequencerBatchDelivered { data_location, .. } => {
                assert_eq!(data_location, BatchDataLocation::SeparateBatchEvent)
            }
            other => panic!("Expected SequencerBatchDelivered, got {other:?}"),
        }
        assert!(matches!(
            next_event(&mut sub).await,
            InboxEvent::SequencerBatchData { batch_sequence_number: 1, .. }
        ));
    }

    #[tokio::test]
    async fn test_revoked_poster_rejected() {
        let mut fx = Fixture::new();
        let mut sub = fx.bus.subscribe(EventFilter::all());
        fx.posters.set_batch_poster(poster(), false);

        let request = fx.next_request(1, Address::zero());
        let response = fx.handler.handle_submit(request).await;

        assert!(!response.success);
        assert!(response
            .error
            .unwrap_or_default()
            .contains("Not a batch poster"));
        assert!(matches!(sub.try_recv(), Ok(None)));
    }

    // =============================================================================
    // OPERATOR → REFUND POLICY
    // =============================================================================

    #[tokio::test]
    async fn test_withdrawal_requires_operator() {
        let mut fx = Fixture::new();
        fx.handler.handle_budget_admin(fund(coarse_refunder(), 8_000)).await;
        let mut sub = fx.bus.subscribe(EventFilter::topics(vec![EventTopic::GasRefund]));

        let stranger = Address::repeat_byte(0x66);
        let denied = fx
            .handler
            .handle_budget_admin(admin(
                coarse_refunder(),
                stranger,
                BudgetAdminCommand::Withdraw {
                    amount: U256::from(1_000u64),
                },
            ))
            .await;
        assert!(!denied.success);
        assert!(matches!(sub.try_recv(), Ok(None)));

        let withdrawn = fx
            .handler
            .handle_budget_admin(admin(
                coarse_refunder(),
                operator(),
                BudgetAdminCommand::Withdraw {
                    amount: U256::from(3_000u64),
                },
            ))
            .await;
        assert!(withdrawn.success);
        assert_eq!(withdrawn.balance, Some(U256::from(5_000u64)));
        assert_eq!(fx.transfer.total_to(operator()), U256::from(3_000u64));
        assert!(matches!(
            next_event(&mut sub).await,
            InboxEvent::BudgetWithdrawn { .. }
        ));

        let overdraw = fx
            .handler
            .handle_budget_admin(admin(
                coarse_refunder(),
                operator(),
                BudgetAdminCommand::Withdraw {
                    amount: U256::from(5_001u64),
                },
            ))
            .await;
        assert!(!overdraw.success);
        assert_eq!(ledger_balance(&fx, coarse_refunder()), U256::from(5_000u64));
    }

    #[tokio::test]
    async fn test_allowlist_changes_gate_refunds() {
        let mut fx = Fixture::new();
        fx.handler.handle_budget_admin(fund(coarse_refunder(), 10_000)).await;

        let updated = fx
            .handler
            .handle_budget_admin(admin(
                coarse_refunder(),
                operator(),
                BudgetAdminCommand::DisallowRefundees(vec![poster()]),
            ))
            .await;
        assert!(updated.success);

        let mut refunds = fx.bus.subscribe(EventFilter::topics(vec![EventTopic::GasRefund]));
        let request = fx.next_request(1, coarse_refunder());
        let response = fx.handler.handle_submit(request).await;
        assert!(response.success);
        assert_eq!(response.refund_paid, Some(U256::zero()));
        match next_event(&mut refunds).await {
            InboxEvent::RefundDenied { reason, .. } => assert!(reason.contains("not allowed")),
            other => panic!("Expected RefundDenied, got {other:?}"),
        }

        // The rate-limited policy has a fixed pair and no lists to edit
        let unsupported = fx
            .handler
            .handle_budget_admin(admin(
                optimized_refunder(),
                operator(),
                BudgetAdminCommand::AllowRefundees(vec![second_poster()]),
            ))
            .await;
        assert!(!unsupported.success);
        assert!(unsupported.error.unwrap_or_default().contains("not supported"));
    }

    // =============================================================================
    // DELAYED QUEUE → INBOX
    // =============================================================================

    #[tokio::test]
    async fn test_force_inclusion_after_delay() {
        let mut fx = Fixture::new();
        fx.push_delayed(3);

        let mut request = fx.next_request(10, Address::zero());
        request.after_delayed_messages_read = 2;
        assert!(fx.handler.handle_submit(request).await.success);

        let mut sub = fx.bus.subscribe(EventFilter::topics(vec![EventTopic::Sequencer]));
        let force = |total| ForceInclusionRequest {
            correlation_id: correlation_id(),
            new_total_delayed_messages_read: total,
        };

        let early = fx.handler.handle_force_inclusion(force(3)).await;
        assert!(!early.success);
        assert!(early.error.unwrap_or_default().contains("too soon"));

        fx.host.advance(7_201, 86_401);
        let response = fx.handler.handle_force_inclusion(force(3)).await;
        assert!(response.success);
        assert_eq!(response.batch_sequence_number, Some(1));
        assert_eq!(response.sequenced_message_count, 11);

        match next_event(&mut sub).await {
            InboxEvent::SequencerBatchDelivered {
                data_location,
                after_delayed_messages_read,
                time_bounds,
                ..
            } => {
                assert_eq!(data_location, BatchDataLocation::NoData);
                assert_eq!(after_delayed_messages_read, 3);
                assert_eq!(time_bounds.min_block_number, GENESIS_BLOCK);
                assert_eq!(time_bounds.max_timestamp, GENESIS_TIME);
            }
            other => panic!("Expected SequencerBatchDelivered, got {other:?}"),
        }

        // Posters continue from the forced head
        let next = fx.next_request(5, Address::zero());
        assert_eq!(next.after_delayed_messages_read, 3);
        assert!(fx.handler.handle_submit(next).await.success);

        let service = fx.handler.service();
        assert_eq!(service.sequenced_message_count(), 16);
        assert!(service.verify_log());
    }

    #[tokio::test]
    async fn test_poster_cannot_skip_unarrived_messages() {
        let mut fx = Fixture::new();
        fx.push_delayed(1);

        let mut request = fx.next_request(1, Address::zero());
        request.after_delayed_messages_read = 2;
        let response = fx.handler.handle_submit(request).await;

        assert!(!response.success);
        assert!(response
            .error
            .unwrap_or_default()
            .contains("exceeds observed delayed count"));
        assert_eq!(fx.handler.service().batch_count(), 0);
    }
}
