//! Types that represent the core data model, such as `Transaction`, `Category` and `Amount`.
mod amount;
mod category;
mod seed;
mod transaction;

pub use amount::{Amount, AmountError, AmountFormat, MINOR_UNIT_PLACES};
pub use category::Category;
pub use seed::{seed_transactions, SEED_LEN};
pub use transaction::{Currency, Status, Transaction};
