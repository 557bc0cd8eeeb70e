// Order - An escrow-backed purchase of a single item

use crate::identity::AccountId;
use crate::market::item::ItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an order (sequential, starting at 1)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(u64);

impl OrderId {
    /// Create an OrderId from a raw value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order#{}", self.0)
    }
}

/// Lifecycle status of an order
///
/// Transitions: Pending -> Shipped -> {Delivered, Disputed};
/// Pending -> Cancelled; Disputed -> {Cancelled, Delivered}.
/// Delivered and Cancelled are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Payment custodied, waiting for the seller to ship
    Pending,
    /// Seller has shipped, waiting for the buyer to confirm
    Shipped,
    /// Buyer confirmed (or dispute found for the seller); funds paid out (terminal)
    Delivered,
    /// Cancelled before shipping (or dispute found for the buyer); funds refunded (terminal)
    Cancelled,
    /// Outcome contested, waiting for admin adjudication
    Disputed,
}

impl OrderStatus {
    /// Whether this status is terminal (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether an order in this status still holds escrowed funds
    pub fn holds_escrow(&self) -> bool {
        matches!(self, Self::Pending | Self::Shipped | Self::Disputed)
    }
}

/// An order created by purchasing an item
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    item_id: ItemId,
    buyer: AccountId,
    seller: AccountId,
    /// Exact payment received; fixed at creation
    amount: u64,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new pending order
    pub fn new(id: OrderId, item_id: ItemId, buyer: AccountId, seller: AccountId, amount: u64) -> Self {
        Self {
            id,
            item_id,
            buyer,
            seller,
            amount,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn buyer(&self) -> &AccountId {
        &self.buyer
    }

    pub fn seller(&self) -> &AccountId {
        &self.seller
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
        assert!(!OrderStatus::Disputed.is_terminal());
    }

    #[test]
    fn test_escrow_holding_statuses() {
        assert!(OrderStatus::Pending.holds_escrow());
        assert!(OrderStatus::Shipped.holds_escrow());
        assert!(OrderStatus::Disputed.holds_escrow());
        assert!(!OrderStatus::Delivered.holds_escrow());
        assert!(!OrderStatus::Cancelled.holds_escrow());
    }
}
