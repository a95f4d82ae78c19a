//! An in-memory transaction list with category filtering, merchant search and an add flow.
//!
//! The pieces, from the bottom up:
//! - [`model`]: the transaction record and its value types.
//! - [`store`]: the single owner of the collection and of the list view state.
//! - [`projection`]: the pure filter and search over a collection.
//! - [`create`]: the validation gate that turns form input into a new record.

pub mod args;
pub mod clock;
pub mod commands;
mod config;
pub mod create;
mod error;
pub mod model;
pub mod projection;
pub mod store;
mod utils;
pub mod view;


pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use create::{Draft, ValidationError};
pub use error::Error;
pub use error::Result;
pub use projection::project;
pub use store::Store;
