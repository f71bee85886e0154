//! # Cross-Subsystem Properties
//!
//! Random operation sequences against a wired inbox. After every step the
//! log invariants hold, rejected operations leave no trace and refund
//! payouts stay within both the budget and the epoch ceiling.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use primitive_types::U256;
    use proptest::prelude::*;
    use shared_types::entities::Address;
    use si_01_gas_refund::domain::invariants::invariant_epoch_ceiling;
    use si_01_gas_refund::{RateLimitState, RefundPolicy, RefundPolicyKind};
    use si_02_sequencer_inbox::{SequencerInboxApi, SequencerInboxService};

    #[derive(Debug, Clone)]
    enum Op {
        Submit { messages: u64, read_ahead: u64 },
        ArriveDelayed(u64),
        Advance { blocks: u64, seconds: u64 },
        Force { ahead: u64 },
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0u64..20, 0u64..3).prop_map(|(messages, read_ahead)| Op::Submit { messages, read_ahead }),
            2 => (1u64..4).prop_map(Op::ArriveDelayed),
            2 => (0u64..8_000, 0u64..90_000).prop_map(|(blocks, seconds)| Op::Advance { blocks, seconds }),
            1 => (1u64..3).prop_map(|ahead| Op::Force { ahead }),
        ]
    }

    fn optimized_state(service: &SequencerInboxService) -> Option<(U256, RateLimitState)> {
        match service.refunds().get(&optimized_refunder()) {
            Some(RefundPolicyKind::Optimized(policy)) => {
                Some((policy.ledger().balance(), *policy.rate_limit()))
            }
            _ => None,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_log_consistent_under_mixed_operations(ops in prop::collection::vec(op(), 1..40)) {
            let mut fx = Fixture::new();

            for op in ops {
                let before = fx.handler.service().state().clone();
                let result = match op {
                    Op::Submit { messages, read_ahead } => {
                        let mut request = fx.next_request(messages, Address::zero());
                        request.after_delayed_messages_read += read_ahead;
                        let (caller, submission) = request.into_submission();
                        Some(fx.handler.service_mut().submit(caller, submission))
                    }
                    Op::ArriveDelayed(n) => {
                        fx.push_delayed(n);
                        None
                    }
                    Op::Advance { blocks, seconds } => {
                        fx.host.advance(blocks, seconds);
                        None
                    }
                    Op::Force { ahead } => {
                        let service = fx.handler.service_mut();
                        let target = service.total_delayed_messages_read() + ahead;
                        Some(service.force_inclusion(target))
                    }
                };

                let service = fx.handler.service();
                if let Some(Err(_)) = result {
                    prop_assert_eq!(service.state(), &before);
                }

                let summed: u64 = service.state().batches.iter().map(|b| b.message_count()).sum();
                prop_assert_eq!(service.sequenced_message_count(), summed);
                prop_assert!(service.verify_log());
            }
        }

        #[test]
        fn prop_refunds_bounded_by_budget_and_ceiling(
            steps in prop::collection::vec((0u64..2_000, 1u64..50), 1..30),
            funding in 0u64..200_000,
        ) {
            let mut fx = Fixture::new();
            let funded = U256::from(funding);
            if let Some(policy) = fx.handler.service_mut().refunds_mut().get_mut(&optimized_refunder()) {
                prop_assert!(policy.fund(funded).is_ok());
            }

            for (seconds, price) in steps {
                fx.host.advance(1, seconds);
                fx.host.set_gas(1_000, U256::from(price));

                let (caller, submission) = fx.next_request(1, optimized_refunder()).into_submission();
                let receipt = fx.handler.service_mut().submit(caller, submission);
                prop_assert!(receipt.is_ok());

                let (balance, rate_limit) = optimized_state(fx.handler.service())
                    .ok_or_else(|| TestCaseError::fail("optimized policy missing"))?;
                prop_assert!(invariant_epoch_ceiling(&rate_limit, U256::from(EPOCH_CEILING)));
                prop_assert_eq!(balance + fx.transfer.total(), funded);
            }
        }
    }
}
