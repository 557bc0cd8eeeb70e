// escrowmarket - Escrow-mediated marketplace ledger
//
// Sellers list items, buyers purchase them into escrow-held orders,
// sellers ship, buyers confirm receipt to release funds, and either
// party may dispute a shipped order for admin-mediated resolution.

pub mod identity;
pub mod ledger;
pub mod market;

pub use identity::AccountId;
pub use ledger::{Ledger, LedgerError, SharedLedger};
pub use market::{ItemStatus, OrderStatus};
