// Shared ledger handle - one global lock around the ledger

use crate::identity::AccountId;
use crate::ledger::error::LedgerError;
use crate::ledger::events::LedgerEvent;
use crate::ledger::state::Ledger;
use crate::market::{Item, ItemId, Order, OrderId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Thread-safe handle to a ledger.
///
/// Each operation takes the lock for its whole duration, so callers on
/// different threads observe serializable, all-or-nothing semantics: no
/// operation ever sees a partially-updated item or order. Cloning the
/// handle shares the same underlying ledger.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    /// Create a shared ledger with one seed admin
    pub fn new(seed_admin: AccountId) -> Self {
        Self::from_ledger(Ledger::new(seed_admin))
    }

    /// Wrap an existing ledger
    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    // A poisoned lock means a panic mid-operation on another thread; the
    // ledger rolls back before returning errors, so the state is still
    // consistent and we keep serving.
    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list_item(
        &self,
        name: &str,
        description: &str,
        price: u64,
        caller: &AccountId,
    ) -> Result<ItemId, LedgerError> {
        self.lock().list_item(name, description, price, caller)
    }

    pub fn purchase_item(
        &self,
        item_id: ItemId,
        payment: u64,
        caller: &AccountId,
    ) -> Result<OrderId, LedgerError> {
        self.lock().purchase_item(item_id, payment, caller)
    }

    pub fn mark_as_shipped(&self, order_id: OrderId, caller: &AccountId) -> Result<(), LedgerError> {
        self.lock().mark_as_shipped(order_id, caller)
    }

    pub fn confirm_receipt(&self, order_id: OrderId, caller: &AccountId) -> Result<(), LedgerError> {
        self.lock().confirm_receipt(order_id, caller)
    }

    pub fn cancel_order(&self, order_id: OrderId, caller: &AccountId) -> Result<(), LedgerError> {
        self.lock().cancel_order(order_id, caller)
    }

    pub fn raise_dispute(&self, order_id: OrderId, caller: &AccountId) -> Result<(), LedgerError> {
        self.lock().raise_dispute(order_id, caller)
    }

    pub fn resolve_dispute(
        &self,
        order_id: OrderId,
        favor_buyer: bool,
        caller: &AccountId,
    ) -> Result<(), LedgerError> {
        self.lock().resolve_dispute(order_id, favor_buyer, caller)
    }

    pub fn add_admin(&self, account: &AccountId, caller: &AccountId) -> Result<(), LedgerError> {
        self.lock().add_admin(account, caller)
    }

    pub fn receive_funds(&self, from: &AccountId, amount: u64) -> Result<(), LedgerError> {
        self.lock().receive_funds(from, amount)
    }

    /// Snapshot of an item by id
    pub fn get_item(&self, item_id: ItemId) -> Result<Item, LedgerError> {
        self.lock().get_item(item_id).cloned()
    }

    /// Snapshot of an order by id
    pub fn get_order(&self, order_id: OrderId) -> Result<Order, LedgerError> {
        self.lock().get_order(order_id).cloned()
    }

    pub fn item_count(&self) -> usize {
        self.lock().item_count()
    }

    pub fn order_count(&self) -> usize {
        self.lock().order_count()
    }

    pub fn is_admin(&self, account: &AccountId) -> bool {
        self.lock().is_admin(account)
    }

    pub fn custodied_balance(&self) -> u64 {
        self.lock().custodied_balance()
    }

    pub fn balance_of(&self, account: &AccountId) -> u64 {
        self.lock().balance_of(account)
    }

    /// Copy of the audit trail, oldest first
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.lock().events().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_purchases_of_one_item() {
        let admin = AccountId::from_label("admin");
        let seller = AccountId::from_label("seller");
        let ledger = SharedLedger::new(admin);

        let item_id = ledger.list_item("Widget", "A widget", 1000, &seller).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ledger = ledger.clone();
                thread::spawn(move || {
                    let buyer = AccountId::from_label(&format!("buyer-{i}"));
                    ledger.purchase_item(item_id, 1000, &buyer).is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();

        // Exactly one buyer wins; escrow holds exactly one payment
        assert_eq!(successes, 1);
        assert_eq!(ledger.order_count(), 1);
        assert_eq!(ledger.custodied_balance(), 1000);
    }
}
