// Item - A listing offered for sale by a seller

use crate::identity::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an item (sequential, starting at 1)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u64);

impl ItemId {
    /// Create an ItemId from a raw value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Lifecycle status of an item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    /// Listed and open for purchase
    Available,
    /// Bought into an order; not purchasable
    Sold,
    /// Withdrawn by the seller
    Cancelled,
}

/// An item listed on the marketplace
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    description: String,
    /// Price in the smallest currency unit, always > 0
    price: u64,
    seller: AccountId,
    status: ItemStatus,
    created_at: DateTime<Utc>,
}

impl Item {
    /// Create a new available item
    pub fn new(id: ItemId, name: String, description: String, price: u64, seller: AccountId) -> Self {
        Self {
            id,
            name,
            description,
            price,
            seller,
            status: ItemStatus::Available,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn seller(&self) -> &AccountId {
        &self.seller
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the item can currently be purchased
    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }

    pub(crate) fn set_status(&mut self, status: ItemStatus) {
        self.status = status;
    }
}
