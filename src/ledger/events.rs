// Ledger events - the append-only audit trail of marketplace activity

use crate::identity::AccountId;
use crate::market::{ItemId, OrderId};
use serde::{Deserialize, Serialize};

/// Events appended synchronously by the operation that causes them.
///
/// The event log is part of the operation contract, not logging: each
/// entry carries the exact identifiers and amounts of the transition it
/// records, and entries are never removed or reordered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A seller listed a new item
    ItemListed { item_id: ItemId, seller: AccountId },

    /// An admin granted admin rights to a new identity
    AdminAdded { account: AccountId, added_by: AccountId },

    /// A buyer purchased an item; payment is now custodied
    OrderCreated {
        order_id: OrderId,
        item_id: ItemId,
        buyer: AccountId,
        seller: AccountId,
    },

    /// The seller marked the order as shipped
    ItemShipped { order_id: OrderId },

    /// The buyer confirmed receipt; escrow paid out to the seller
    OrderCompleted {
        order_id: OrderId,
        seller: AccountId,
        amount: u64,
    },

    /// The buyer cancelled before shipping; escrow refunded
    OrderCancelled {
        order_id: OrderId,
        buyer: AccountId,
        amount: u64,
    },

    /// Buyer or seller contested a shipped order
    DisputeRaised { order_id: OrderId, raised_by: AccountId },

    /// An admin adjudicated a disputed order
    DisputeResolved {
        order_id: OrderId,
        favor_buyer: bool,
        resolved_by: AccountId,
        amount: u64,
    },

    /// Unsolicited funds arrived outside any purchase
    UnexpectedFundsReceived { from: AccountId, amount: u64 },
}
