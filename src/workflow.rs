//! Shipment fulfillment pipeline.
//!
//! A shipment moves forward through a fixed linear order and never backward:
//! Received -> Accepted -> Invoice Generated -> Payment Received ->
//! Ready to Ship -> Dispatched. Two boolean sub-flags refine a status
//! without changing it: `price_details_added` while Accepted, and
//! `payment_requested` while Invoice Generated.
//!
//! Everything here is pure. The service layer loads a row, asks
//! [`ShipmentAction::check`] whether the operation is permitted, and writes
//! status plus its companion flag in a single update so no intermediate
//! state is ever observable.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ShipmentStatus {
    Received,
    Accepted,
    #[serde(rename = "Invoice Generated")]
    InvoiceGenerated,
    #[serde(rename = "Payment Received")]
    PaymentReceived,
    #[serde(rename = "Ready to Ship")]
    ReadyToShip,
    Dispatched,
}

impl ShipmentStatus {
    pub const ALL: [ShipmentStatus; 6] = [
        ShipmentStatus::Received,
        ShipmentStatus::Accepted,
        ShipmentStatus::InvoiceGenerated,
        ShipmentStatus::PaymentReceived,
        ShipmentStatus::ReadyToShip,
        ShipmentStatus::Dispatched,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShipmentStatus::Received => "Received",
            ShipmentStatus::Accepted => "Accepted",
            ShipmentStatus::InvoiceGenerated => "Invoice Generated",
            ShipmentStatus::PaymentReceived => "Payment Received",
            ShipmentStatus::ReadyToShip => "Ready to Ship",
            ShipmentStatus::Dispatched => "Dispatched",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    fn rank(self) -> u8 {
        match self {
            ShipmentStatus::Received => 0,
            ShipmentStatus::Accepted => 1,
            ShipmentStatus::InvoiceGenerated => 2,
            ShipmentStatus::PaymentReceived => 3,
            ShipmentStatus::ReadyToShip => 4,
            ShipmentStatus::Dispatched => 5,
        }
    }

    /// Dispatched is terminal; nothing moves past it.
    pub fn is_terminal(self) -> bool {
        self == ShipmentStatus::Dispatched
    }

    /// The pipeline is strictly linear: only the immediate successor is reachable.
    pub fn can_advance_to(self, next: ShipmentStatus) -> bool {
        next.rank() == self.rank() + 1
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The slice of a shipment row the transition rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowState {
    pub status: ShipmentStatus,
    pub price_details_added: bool,
    pub payment_requested: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipmentAction {
    Accept,
    SavePriceDetails,
    ConfirmInvoice,
    RequestPay,
    SavePayment,
    Ready,
    Dispatch,
}

impl ShipmentAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ShipmentAction::Accept => "accept",
            ShipmentAction::SavePriceDetails => "save_price_details",
            ShipmentAction::ConfirmInvoice => "confirm_invoice",
            ShipmentAction::RequestPay => "request_pay",
            ShipmentAction::SavePayment => "save_payment",
            ShipmentAction::Ready => "ready",
            ShipmentAction::Dispatch => "dispatch",
        }
    }

    /// Gate an action against the current row state.
    ///
    /// Price details must exist before an invoice can be confirmed, and
    /// payment must have been requested before it can be recorded. The
    /// buttons in the back office hide out-of-order actions, but the API
    /// rejects them regardless of what the client shows.
    pub fn check(self, state: WorkflowState) -> Result<(), TransitionError> {
        let allowed = match self {
            ShipmentAction::Accept => state.status == ShipmentStatus::Received,
            ShipmentAction::SavePriceDetails => state.status == ShipmentStatus::Accepted,
            ShipmentAction::ConfirmInvoice => {
                state.status == ShipmentStatus::Accepted && state.price_details_added
            }
            ShipmentAction::RequestPay => {
                state.status == ShipmentStatus::InvoiceGenerated && !state.payment_requested
            }
            ShipmentAction::SavePayment => {
                state.status == ShipmentStatus::InvoiceGenerated && state.payment_requested
            }
            ShipmentAction::Ready => state.status == ShipmentStatus::PaymentReceived,
            ShipmentAction::Dispatch => state.status == ShipmentStatus::ReadyToShip,
        };

        if allowed {
            Ok(())
        } else {
            Err(TransitionError {
                action: self,
                status: state.status,
            })
        }
    }

    /// Status after a permitted action. `SavePriceDetails` and `RequestPay`
    /// only flip their flag and leave the status where it is.
    pub fn target_status(self, current: ShipmentStatus) -> ShipmentStatus {
        match self {
            ShipmentAction::Accept => ShipmentStatus::Accepted,
            ShipmentAction::SavePriceDetails | ShipmentAction::RequestPay => current,
            ShipmentAction::ConfirmInvoice => ShipmentStatus::InvoiceGenerated,
            ShipmentAction::SavePayment => ShipmentStatus::PaymentReceived,
            ShipmentAction::Ready => ShipmentStatus::ReadyToShip,
            ShipmentAction::Dispatch => ShipmentStatus::Dispatched,
        }
    }
}

impl std::fmt::Display for ShipmentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {action} a shipment in status \"{status}\"")]
pub struct TransitionError {
    pub action: ShipmentAction,
    pub status: ShipmentStatus,
}

/// Label shown wherever a shipment's status is rendered.
///
/// Computed in one place so the list rows and the detail view can never
/// disagree.
pub fn display_status(state: WorkflowState) -> &'static str {
    match state.status {
        ShipmentStatus::Accepted if state.price_details_added => "Price Details Added",
        ShipmentStatus::InvoiceGenerated if state.payment_requested => "Payment Requested",
        status => status.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(status: ShipmentStatus) -> WorkflowState {
        WorkflowState {
            status,
            price_details_added: false,
            payment_requested: false,
        }
    }

    #[test]
    fn statuses_round_trip_through_labels() {
        for status in ShipmentStatus::ALL {
            assert_eq!(ShipmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ShipmentStatus::parse("Pending"), None);
    }

    #[test]
    fn pipeline_is_strictly_linear() {
        let order = ShipmentStatus::ALL;
        for (i, from) in order.into_iter().enumerate() {
            for (j, to) in order.into_iter().enumerate() {
                assert_eq!(from.can_advance_to(to), j == i + 1, "{from} -> {to}");
            }
        }
        assert!(ShipmentStatus::Dispatched.is_terminal());
    }

    #[test]
    fn accept_requires_received() {
        assert!(
            ShipmentAction::Accept
                .check(state(ShipmentStatus::Received))
                .is_ok()
        );
        for status in &ShipmentStatus::ALL[1..] {
            assert!(ShipmentAction::Accept.check(state(*status)).is_err());
        }
    }

    #[test]
    fn invoice_requires_price_details() {
        let mut s = state(ShipmentStatus::Accepted);
        assert!(ShipmentAction::ConfirmInvoice.check(s).is_err());
        s.price_details_added = true;
        assert!(ShipmentAction::ConfirmInvoice.check(s).is_ok());
        assert_eq!(
            ShipmentAction::ConfirmInvoice.target_status(s.status),
            ShipmentStatus::InvoiceGenerated
        );
    }

    #[test]
    fn price_details_can_be_resubmitted_while_accepted() {
        let mut s = state(ShipmentStatus::Accepted);
        assert!(ShipmentAction::SavePriceDetails.check(s).is_ok());
        s.price_details_added = true;
        assert!(ShipmentAction::SavePriceDetails.check(s).is_ok());
        assert_eq!(
            ShipmentAction::SavePriceDetails.target_status(s.status),
            ShipmentStatus::Accepted
        );
    }

    #[test]
    fn payment_must_be_requested_before_recorded() {
        let mut s = state(ShipmentStatus::InvoiceGenerated);
        assert!(ShipmentAction::RequestPay.check(s).is_ok());
        assert!(ShipmentAction::SavePayment.check(s).is_err());

        s.payment_requested = true;
        assert!(ShipmentAction::RequestPay.check(s).is_err());
        assert!(ShipmentAction::SavePayment.check(s).is_ok());
        assert_eq!(
            ShipmentAction::SavePayment.target_status(s.status),
            ShipmentStatus::PaymentReceived
        );
    }

    #[test]
    fn terminal_state_rejects_everything() {
        let s = state(ShipmentStatus::Dispatched);
        let actions = [
            ShipmentAction::Accept,
            ShipmentAction::SavePriceDetails,
            ShipmentAction::ConfirmInvoice,
            ShipmentAction::RequestPay,
            ShipmentAction::SavePayment,
            ShipmentAction::Ready,
            ShipmentAction::Dispatch,
        ];
        for action in actions {
            let err = action.check(s).unwrap_err();
            assert_eq!(err.status, ShipmentStatus::Dispatched);
        }
    }

    #[test]
    fn display_labels_follow_sub_flags() {
        let mut s = state(ShipmentStatus::Accepted);
        assert_eq!(display_status(s), "Accepted");
        s.price_details_added = true;
        assert_eq!(display_status(s), "Price Details Added");

        let mut s = state(ShipmentStatus::InvoiceGenerated);
        s.price_details_added = true;
        assert_eq!(display_status(s), "Invoice Generated");
        s.payment_requested = true;
        assert_eq!(display_status(s), "Payment Requested");

        assert_eq!(display_status(state(ShipmentStatus::Dispatched)), "Dispatched");
    }
}
