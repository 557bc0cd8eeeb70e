// Marketplace Ledger - owns all items, orders, and escrowed balances

use crate::identity::AccountId;
use crate::ledger::error::LedgerError;
use crate::ledger::events::LedgerEvent;
use crate::ledger::treasury::Treasury;
use crate::market::{Item, ItemId, ItemStatus, Order, OrderId, OrderStatus};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// The single stateful authority over the marketplace.
///
/// Every operation is atomic: either the full state transition plus its
/// fund movement commits, or nothing changes. Transitions mutate status
/// before moving funds and roll the mutation back if the movement fails,
/// so an order's status never disagrees with actual fund custody.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ledger {
    /// All items ever listed; item id N lives at index N-1
    items: Vec<Item>,
    /// All orders ever created; order id N lives at index N-1
    orders: Vec<Order>,
    /// Identities with admin rights; grows only, never shrinks
    admins: HashSet<AccountId>,
    /// Seller identity -> ids of items they listed (append-only)
    seller_items: HashMap<AccountId, Vec<ItemId>>,
    /// Escrow custody and disbursed balances
    treasury: Treasury,
    /// Append-only audit trail
    events: Vec<LedgerEvent>,
}

impl Ledger {
    /// Create an empty ledger with one seed admin
    pub fn new(seed_admin: AccountId) -> Self {
        let mut admins = HashSet::new();
        admins.insert(seed_admin);

        Self {
            items: Vec::new(),
            orders: Vec::new(),
            admins,
            seller_items: HashMap::new(),
            treasury: Treasury::new(),
            events: Vec::new(),
        }
    }

    // ========================================================================
    // ITEM LISTING
    // ========================================================================

    /// List a new item for sale
    pub fn list_item(
        &mut self,
        name: &str,
        description: &str,
        price: u64,
        caller: &AccountId,
    ) -> Result<ItemId, LedgerError> {
        if name.is_empty() {
            return Err(LedgerError::InvalidName);
        }
        if description.is_empty() {
            return Err(LedgerError::InvalidDescription);
        }
        if price == 0 {
            return Err(LedgerError::PriceTooLow);
        }

        let item_id = ItemId::new(self.items.len() as u64 + 1);
        self.items.push(Item::new(
            item_id,
            name.to_string(),
            description.to_string(),
            price,
            caller.clone(),
        ));

        self.seller_items
            .entry(caller.clone())
            .or_default()
            .push(item_id);

        self.events.push(LedgerEvent::ItemListed {
            item_id,
            seller: caller.clone(),
        });

        info!(%item_id, seller = %caller, price, "item listed");
        Ok(item_id)
    }

    // ========================================================================
    // PURCHASE
    // ========================================================================

    /// Purchase an available item, custodying the payment in escrow
    pub fn purchase_item(
        &mut self,
        item_id: ItemId,
        payment: u64,
        caller: &AccountId,
    ) -> Result<OrderId, LedgerError> {
        let idx = self.item_index(item_id)?;

        let seller = {
            let item = &self.items[idx];
            if !item.is_available() {
                return Err(LedgerError::ItemNotAvailable);
            }
            if item.seller() == caller {
                return Err(LedgerError::SelfPurchase);
            }
            if payment != item.price() {
                return Err(LedgerError::IncorrectPayment {
                    sent: payment,
                    required: item.price(),
                });
            }
            item.seller().clone()
        };

        let order_id = OrderId::new(self.orders.len() as u64 + 1);
        self.items[idx].set_status(ItemStatus::Sold);
        self.orders.push(Order::new(
            order_id,
            item_id,
            caller.clone(),
            seller.clone(),
            payment,
        ));

        if let Err(e) = self.treasury.custody(payment) {
            self.orders.pop();
            self.items[idx].set_status(ItemStatus::Available);
            return Err(e.into());
        }

        self.events.push(LedgerEvent::OrderCreated {
            order_id,
            item_id,
            buyer: caller.clone(),
            seller,
        });

        info!(%order_id, %item_id, buyer = %caller, amount = payment, "order created");
        Ok(order_id)
    }

    // ========================================================================
    // ORDER STATE MACHINE
    // ========================================================================

    /// Seller marks a pending order as shipped
    pub fn mark_as_shipped(&mut self, order_id: OrderId, caller: &AccountId) -> Result<(), LedgerError> {
        let idx = self.order_index(order_id)?;

        let order = &self.orders[idx];
        if order.seller() != caller {
            return Err(LedgerError::UnauthorizedSeller);
        }
        if order.status() != OrderStatus::Pending {
            return Err(LedgerError::OrderNotPending);
        }

        self.orders[idx].set_status(OrderStatus::Shipped);
        self.events.push(LedgerEvent::ItemShipped { order_id });

        info!(%order_id, seller = %caller, "item shipped");
        Ok(())
    }

    /// Buyer confirms receipt of a shipped order, releasing escrow to the seller
    pub fn confirm_receipt(&mut self, order_id: OrderId, caller: &AccountId) -> Result<(), LedgerError> {
        let idx = self.order_index(order_id)?;

        let (seller, amount) = {
            let order = &self.orders[idx];
            if order.buyer() != caller {
                return Err(LedgerError::UnauthorizedBuyer);
            }
            if order.status() != OrderStatus::Shipped {
                return Err(LedgerError::ItemNotShipped);
            }
            (order.seller().clone(), order.amount())
        };

        self.orders[idx].set_status(OrderStatus::Delivered);
        if let Err(e) = self.treasury.disburse(&seller, amount) {
            self.orders[idx].set_status(OrderStatus::Shipped);
            return Err(e.into());
        }

        self.events.push(LedgerEvent::OrderCompleted {
            order_id,
            seller: seller.clone(),
            amount,
        });

        info!(%order_id, seller = %seller, amount, "order completed");
        Ok(())
    }

    /// Buyer cancels a pending order, refunding escrow and relisting the item
    pub fn cancel_order(&mut self, order_id: OrderId, caller: &AccountId) -> Result<(), LedgerError> {
        let idx = self.order_index(order_id)?;

        let (buyer, amount, item_id) = {
            let order = &self.orders[idx];
            if order.buyer() != caller {
                return Err(LedgerError::UnauthorizedBuyer);
            }
            if order.status() != OrderStatus::Pending {
                return Err(LedgerError::OrderNotPending);
            }
            (order.buyer().clone(), order.amount(), order.item_id())
        };
        let item_idx = self.item_index(item_id)?;

        self.orders[idx].set_status(OrderStatus::Cancelled);
        self.items[item_idx].set_status(ItemStatus::Available);
        if let Err(e) = self.treasury.disburse(&buyer, amount) {
            self.orders[idx].set_status(OrderStatus::Pending);
            self.items[item_idx].set_status(ItemStatus::Sold);
            return Err(e.into());
        }

        self.events.push(LedgerEvent::OrderCancelled {
            order_id,
            buyer,
            amount,
        });

        info!(%order_id, %item_id, amount, "order cancelled");
        Ok(())
    }

    /// Buyer or seller contests a shipped order
    pub fn raise_dispute(&mut self, order_id: OrderId, caller: &AccountId) -> Result<(), LedgerError> {
        let idx = self.order_index(order_id)?;

        let order = &self.orders[idx];
        if order.buyer() != caller && order.seller() != caller {
            return Err(LedgerError::UnauthorizedDispute);
        }
        if order.status() != OrderStatus::Shipped {
            return Err(LedgerError::ItemNotShipped);
        }

        self.orders[idx].set_status(OrderStatus::Disputed);
        self.events.push(LedgerEvent::DisputeRaised {
            order_id,
            raised_by: caller.clone(),
        });

        info!(%order_id, raised_by = %caller, "dispute raised");
        Ok(())
    }

    /// Admin adjudicates a disputed order.
    ///
    /// In the buyer's favor the order is cancelled, the escrow refunded, and
    /// the item relisted; in the seller's favor the order is delivered and
    /// the escrow paid out.
    pub fn resolve_dispute(
        &mut self,
        order_id: OrderId,
        favor_buyer: bool,
        caller: &AccountId,
    ) -> Result<(), LedgerError> {
        let idx = self.order_index(order_id)?;

        if !self.is_admin(caller) {
            return Err(LedgerError::NotAdmin);
        }
        let (buyer, seller, amount, item_id) = {
            let order = &self.orders[idx];
            if order.status() != OrderStatus::Disputed {
                return Err(LedgerError::OrderNotInDispute);
            }
            (
                order.buyer().clone(),
                order.seller().clone(),
                order.amount(),
                order.item_id(),
            )
        };
        let item_idx = self.item_index(item_id)?;

        if favor_buyer {
            self.orders[idx].set_status(OrderStatus::Cancelled);
            self.items[item_idx].set_status(ItemStatus::Available);
            if let Err(e) = self.treasury.disburse(&buyer, amount) {
                self.orders[idx].set_status(OrderStatus::Disputed);
                self.items[item_idx].set_status(ItemStatus::Sold);
                return Err(e.into());
            }
        } else {
            self.orders[idx].set_status(OrderStatus::Delivered);
            if let Err(e) = self.treasury.disburse(&seller, amount) {
                self.orders[idx].set_status(OrderStatus::Disputed);
                return Err(e.into());
            }
        }

        self.events.push(LedgerEvent::DisputeResolved {
            order_id,
            favor_buyer,
            resolved_by: caller.clone(),
            amount,
        });

        info!(%order_id, favor_buyer, resolved_by = %caller, amount, "dispute resolved");
        Ok(())
    }

    // ========================================================================
    // ADMIN MANAGEMENT
    // ========================================================================

    /// Grant admin rights to an identity. Idempotent for existing admins.
    pub fn add_admin(&mut self, account: &AccountId, caller: &AccountId) -> Result<(), LedgerError> {
        if !self.is_admin(caller) {
            return Err(LedgerError::NotAdmin);
        }
        if account.is_null() {
            return Err(LedgerError::InvalidAdmin);
        }

        if self.admins.insert(account.clone()) {
            self.events.push(LedgerEvent::AdminAdded {
                account: account.clone(),
                added_by: caller.clone(),
            });
            info!(account = %account, added_by = %caller, "admin added");
        }
        Ok(())
    }

    /// Check whether an identity holds admin rights
    pub fn is_admin(&self, account: &AccountId) -> bool {
        self.admins.contains(account)
    }

    // ========================================================================
    // UNSOLICITED FUNDS
    // ========================================================================

    /// Accept an unsolicited incoming payment outside any purchase
    pub fn receive_funds(&mut self, from: &AccountId, amount: u64) -> Result<(), LedgerError> {
        self.treasury.accept_unexpected(amount)?;
        self.events.push(LedgerEvent::UnexpectedFundsReceived {
            from: from.clone(),
            amount,
        });

        info!(from = %from, amount, "unexpected funds received");
        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Look up an item by id
    pub fn get_item(&self, item_id: ItemId) -> Result<&Item, LedgerError> {
        let idx = self.item_index(item_id)?;
        Ok(&self.items[idx])
    }

    /// Look up an order by id
    pub fn get_order(&self, order_id: OrderId) -> Result<&Order, LedgerError> {
        let idx = self.order_index(order_id)?;
        Ok(&self.orders[idx])
    }

    /// Number of items ever listed
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of orders ever created
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Ids of the items a seller has listed, in listing order
    pub fn items_by_seller(&self, seller: &AccountId) -> &[ItemId] {
        self.seller_items
            .get(seller)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total funds currently held in escrow
    pub fn custodied_balance(&self) -> u64 {
        self.treasury.custodied()
    }

    /// Disbursed (withdrawable) balance of an account
    pub fn balance_of(&self, account: &AccountId) -> u64 {
        self.treasury.balance_of(account)
    }

    /// Unsolicited funds held apart from escrow
    pub fn unexpected_funds(&self) -> u64 {
        self.treasury.unexpected()
    }

    /// The full audit trail, oldest first
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Sum of amounts over orders that still hold escrow.
    ///
    /// Always equals `custodied_balance()`; exposed so tests can assert the
    /// invariant after arbitrary operation sequences.
    pub fn open_order_total(&self) -> u64 {
        self.orders
            .iter()
            .filter(|o| o.status().holds_escrow())
            .map(|o| o.amount())
            .sum()
    }

    // ========================================================================
    // SNAPSHOT
    // ========================================================================

    /// Serialize the full ledger state to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        postcard::to_allocvec(self).unwrap_or_default()
    }

    /// Deserialize a ledger from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        postcard::from_bytes(bytes).map_err(|_| LedgerError::SnapshotDecodeFailed)
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn item_index(&self, item_id: ItemId) -> Result<usize, LedgerError> {
        let raw = item_id.value();
        if raw == 0 || raw > self.items.len() as u64 {
            return Err(LedgerError::InvalidItemId(raw));
        }
        Ok(raw as usize - 1)
    }

    fn order_index(&self, order_id: OrderId) -> Result<usize, LedgerError> {
        let raw = order_id.value();
        if raw == 0 || raw > self.orders.len() as u64 {
            return Err(LedgerError::InvalidOrderId(raw));
        }
        Ok(raw as usize - 1)
    }
}
