//! Splits withdrawal requests into paid-out transactions and the open request list.

use crate::model::{RequestAction, WithdrawalRequest};
use serde::Serialize;

/// Withdrawal requests divided by their action code. Every input request is in exactly one of
/// the two lists, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WithdrawalPartition {
    /// Requests with action `A`: money that has been paid out.
    settled: Vec<WithdrawalRequest>,
    /// Everything else, including codes we do not recognize.
    pending_or_rejected: Vec<WithdrawalRequest>,
}

impl WithdrawalPartition {
    pub fn settled(&self) -> &[WithdrawalRequest] {
        &self.settled
    }

    pub fn pending_or_rejected(&self) -> &[WithdrawalRequest] {
        &self.pending_or_rejected
    }

    pub fn len(&self) -> usize {
        self.settled.len() + self.pending_or_rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn partition_withdrawals(records: &[WithdrawalRequest]) -> WithdrawalPartition {
    let (settled, pending_or_rejected) = records.iter().cloned().partition(|r| r.is_settled());
    WithdrawalPartition {
        settled,
        pending_or_rejected,
    }
}

/// The payload of the rejection-detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectionDetail<'a> {
    request: &'a WithdrawalRequest,
}

impl<'a> RejectionDetail<'a> {
    pub fn request(&self) -> &'a WithdrawalRequest {
        self.request
    }
}

/// Called when a row of the request table is selected. Only rejected requests open a detail
/// view; for anything else, or a row whose status cell cannot be selected, there is nothing to
/// show.
pub fn select_request(request: &WithdrawalRequest) -> Option<RejectionDetail<'_>> {
    if !request.is_selectable() {
        return None;
    }
    match request.request_action() {
        RequestAction::Rejected => Some(RejectionDetail { request }),
        _ => None,
    }
}
