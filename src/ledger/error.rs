// Ledger errors - the full failure taxonomy for marketplace operations

use crate::ledger::treasury::TransferError;
use thiserror::Error;

/// Broad classification of a ledger error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller is not allowed to perform the operation
    Authorization,
    /// Inputs or identifiers are malformed
    Validation,
    /// Operation conflicts with current item/order state
    State,
    /// A payout or refund could not be performed
    FundMovement,
}

/// Errors returned by ledger operations.
///
/// Every error aborts the whole operation with no partial state change.
/// Nothing is retried internally; a retrying caller must re-validate
/// state, since it may have changed.
#[derive(Error, Debug)]
pub enum LedgerError {
    // Authorization
    #[error("Caller is not an admin")]
    NotAdmin,

    #[error("Only the order's seller may perform this operation")]
    UnauthorizedSeller,

    #[error("Only the order's buyer may perform this operation")]
    UnauthorizedBuyer,

    #[error("Only the order's buyer or seller may raise a dispute")]
    UnauthorizedDispute,

    // Validation
    #[error("Invalid item id: {0}")]
    InvalidItemId(u64),

    #[error("Invalid order id: {0}")]
    InvalidOrderId(u64),

    #[error("Item name cannot be empty")]
    InvalidName,

    #[error("Item description cannot be empty")]
    InvalidDescription,

    #[error("Price must be greater than zero")]
    PriceTooLow,

    #[error("Cannot grant admin to the null identity")]
    InvalidAdmin,

    // State
    #[error("Item is not available for purchase")]
    ItemNotAvailable,

    #[error("Sellers cannot purchase their own items")]
    SelfPurchase,

    #[error("Incorrect payment: sent {sent}, required {required}")]
    IncorrectPayment { sent: u64, required: u64 },

    #[error("Order is not pending")]
    OrderNotPending,

    #[error("Order has not been shipped")]
    ItemNotShipped,

    #[error("Order is not in dispute")]
    OrderNotInDispute,

    // Fund movement
    #[error("Fund movement failed: {0}")]
    Transfer(#[from] TransferError),

    #[error("Snapshot decode failed")]
    SnapshotDecodeFailed,
}

impl LedgerError {
    /// Classify this error into the taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAdmin
            | Self::UnauthorizedSeller
            | Self::UnauthorizedBuyer
            | Self::UnauthorizedDispute => ErrorKind::Authorization,

            Self::InvalidItemId(_)
            | Self::InvalidOrderId(_)
            | Self::InvalidName
            | Self::InvalidDescription
            | Self::PriceTooLow
            | Self::InvalidAdmin
            | Self::SnapshotDecodeFailed => ErrorKind::Validation,

            Self::ItemNotAvailable
            | Self::SelfPurchase
            | Self::IncorrectPayment { .. }
            | Self::OrderNotPending
            | Self::ItemNotShipped
            | Self::OrderNotInDispute => ErrorKind::State,

            Self::Transfer(_) => ErrorKind::FundMovement,
        }
    }
}
