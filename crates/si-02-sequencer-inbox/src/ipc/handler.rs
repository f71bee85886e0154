//! IPC Handler for the Sequencer Inbox
//!
//! ## Security Boundaries
//!
//! - Events are published only after the state change committed
//! - A refund event never replaces the delivery event of its batch
//! - Budget administration is routed to the refund subsystem unchanged
//! - Outbound port failures are also reported as `CriticalError`

use crate::application::SequencerInboxService;
use crate::domain::errors::SequencerError;
use crate::ipc::payloads::{BatchResponse, ForceInclusionRequest, SubmitBatchRequest};
use crate::ports::inbound::{SequencerInboxApi, SubmitReceipt};
use crate::SUBSYSTEM_ID;
use shared_bus::{EventPublisher, InboxEvent};
use si_01_gas_refund::ipc::refund_event;
use si_01_gas_refund::{BudgetAdminHandler, BudgetAdminRequest, BudgetAdminResponse};
use std::sync::Arc;
use tracing::{debug, warn};

/// Owns the service and publishes what it produces.
pub struct SequencerInboxHandler {
    service: SequencerInboxService,
    publisher: Arc<dyn EventPublisher>,
    budget_admin: BudgetAdminHandler,
}

impl SequencerInboxHandler {
    pub fn new(service: SequencerInboxService, publisher: Arc<dyn EventPublisher>) -> Self {
        let budget_admin = BudgetAdminHandler::new(service.transfer());
        Self {
            service,
            publisher,
            budget_admin,
        }
    }

    pub fn service(&self) -> &SequencerInboxService {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut SequencerInboxService {
        &mut self.service
    }

    /// Handle a batch submission.
    pub async fn handle_submit(&mut self, request: SubmitBatchRequest) -> BatchResponse {
        let correlation_id = request.correlation_id;
        let (caller, submission) = request.into_submission();
        let result = self.service.submit(caller, submission);
        self.respond(correlation_id, result).await
    }

    /// Handle a force-inclusion request.
    pub async fn handle_force_inclusion(&mut self, request: ForceInclusionRequest) -> BatchResponse {
        let result = self
            .service
            .force_inclusion(request.new_total_delayed_messages_read);
        self.respond(request.correlation_id, result).await
    }

    /// Apply a budget administration command to the registry owned by the service.
    pub async fn handle_budget_admin(&mut self, request: BudgetAdminRequest) -> BudgetAdminResponse {
        let (response, events) = self
            .budget_admin
            .handle(self.service.refunds_mut(), request);
        for event in events {
            self.publisher.publish(event).await;
        }
        response
    }

    async fn respond(
        &self,
        correlation_id: [u8; 16],
        result: Result<SubmitReceipt, SequencerError>,
    ) -> BatchResponse {
        let sequenced_message_count = self.service.sequenced_message_count();
        match result {
            Ok(receipt) => {
                let batch_sequence_number = receipt.batch.sequence_number;
                let refund_paid = receipt.refund.as_ref().map(|r| r.paid());
                for event in receipt_events(receipt, sequenced_message_count) {
                    let delivered = self.publisher.publish(event).await;
                    debug!(batch_sequence_number, delivered, "Event published");
                }
                BatchResponse {
                    correlation_id,
                    success: true,
                    batch_sequence_number: Some(batch_sequence_number),
                    sequenced_message_count,
                    refund_paid,
                    error: None,
                }
            }
            Err(e) => {
                // Only port failures reach the DLQ
                if let SequencerError::Port(port) = &e {
                    warn!(error = %port, "Outbound port failed, routing to DLQ");
                    self.publisher
                        .publish(InboxEvent::CriticalError {
                            subsystem_id: SUBSYSTEM_ID,
                            error: e.to_string(),
                        })
                        .await;
                }
                BatchResponse {
                    correlation_id,
                    success: false,
                    batch_sequence_number: None,
                    sequenced_message_count,
                    refund_paid: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Events for an accepted batch, in emission order.
///
/// Delivery first, then the separate data (contract origin only), then the
/// refund outcome.
pub fn receipt_events(receipt: SubmitReceipt, sequenced_message_count: u64) -> Vec<InboxEvent> {
    let batch = receipt.batch;
    let mut events = vec![InboxEvent::SequencerBatchDelivered {
        batch_sequence_number: batch.sequence_number,
        before_acc: batch.before_acc,
        after_acc: batch.after_acc,
        delayed_acc: batch.delayed_acc,
        after_delayed_messages_read: batch.after_delayed_messages_read,
        time_bounds: batch.time_bounds,
        data_location: batch.data_location,
        sequenced_message_count,
    }];

    if let Some(data) = receipt.separate_data {
        events.push(InboxEvent::SequencerBatchData {
            batch_sequence_number: batch.sequence_number,
            data,
        });
    }

    if let Some(refund) = receipt.refund {
        events.push(refund_event(refund.refunder, refund.recipient, &refund.result));
    }

    events
}
