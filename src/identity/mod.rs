// Identity module - Who is calling (buyers, sellers, admins)

mod account;

pub use account::{AccountId, AccountIdError};
