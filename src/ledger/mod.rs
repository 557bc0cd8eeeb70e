// Ledger module - THE MARKETPLACE AUTHORITY
// Owns items, orders, admin rights, and escrowed funds

mod error;
mod events;
mod shared;
mod state;
mod treasury;

pub use error::{ErrorKind, LedgerError};
pub use events::LedgerEvent;
pub use shared::SharedLedger;
pub use state::Ledger;
pub use treasury::{TransferError, Treasury};
