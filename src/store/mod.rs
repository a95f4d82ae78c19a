//! The transaction store: sole owner of the transaction collection and the list view state.
//!
//! `Store` is a plain single-threaded state container. Every mutation goes through one of its
//! named operations (or the equivalent [`Action`] passed to [`Store::dispatch`]) and synchronously
//! notifies subscribers with an [`Event`]. To share a store between tasks, hand it to a
//! [`StoreHandle`], which serializes all access through one owning task.

mod handle;

pub use handle::{Snapshot, StoreHandle};

use crate::model::{seed_transactions, Category, Transaction};
use crate::projection::project;
use std::fmt::{Debug, Formatter};
use tracing::{debug, trace};

/// A mutation request, the message form of the store's operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ReplaceAll(Vec<Transaction>),
    Prepend(Transaction),
    SetCategoryFilter(Option<Category>),
    SetSearchQuery(String),
    Reset,
}

/// Describes a mutation that has just been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Replaced { len: usize },
    Prepended { id: String },
    CategoryFilterSet(Option<Category>),
    SearchQuerySet(String),
    Reset { len: usize },
}

/// Identifies a subscription so that it can be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Event) + Send>;

pub struct Store {
    transactions: Vec<Transaction>,
    selected_category: Option<Category>,
    search_query: String,
    /// The records `reset` restores.
    seed: Vec<Transaction>,
    /// Incremented by every operation.
    version: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Store {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("transactions", &self.transactions.len())
            .field("selected_category", &self.selected_category)
            .field("search_query", &self.search_query)
            .field("version", &self.version)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Store {
    /// Creates a store holding the built-in seed set with no filters applied.
    pub fn new() -> Self {
        Self::with_seed(seed_transactions())
    }

    /// Creates a store that starts from, and resets to, `seed`.
    pub fn with_seed(seed: Vec<Transaction>) -> Self {
        Self {
            transactions: seed.clone(),
            selected_category: None,
            search_query: String::new(),
            seed,
            version: 0,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The whole collection, most recent first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.selected_category
    }

    /// The search text exactly as it was set.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// A counter that changes whenever any part of the store's state may have changed.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Finds a record by id.
    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// The records that pass the current category filter and search query.
    pub fn visible(&self) -> Vec<&Transaction> {
        project(
            &self.transactions,
            self.selected_category,
            &self.search_query,
        )
    }

    /// Replaces the collection with `transactions`, in the given order.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        let len = transactions.len();
        debug!("Replacing all transactions with {len} records");
        self.transactions = transactions;
        self.commit(Event::Replaced { len });
    }

    /// Places `transaction` at the front of the collection. Ids are not checked for uniqueness.
    pub fn prepend(&mut self, transaction: Transaction) {
        debug!("Prepending transaction {}", transaction.id);
        let id = transaction.id.clone();
        self.transactions.insert(0, transaction);
        self.commit(Event::Prepended { id });
    }

    pub fn set_category_filter(&mut self, category: Option<Category>) {
        debug!("Setting category filter to {category:?}");
        self.selected_category = category;
        self.commit(Event::CategoryFilterSet(category));
    }

    /// Stores `query` as given. Trimming and case-folding happen when the view is computed.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        debug!("Setting search query to {query:?}");
        self.search_query = query.clone();
        self.commit(Event::SearchQuerySet(query));
    }

    /// Restores the seed records, discarding additions. The view state is left alone.
    pub fn reset(&mut self) {
        debug!("Resetting transactions to the seed set");
        self.transactions = self.seed.clone();
        let len = self.transactions.len();
        self.commit(Event::Reset { len });
    }

    /// Applies `action` through the matching named operation.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::ReplaceAll(transactions) => self.replace_all(transactions),
            Action::Prepend(transaction) => self.prepend(transaction),
            Action::SetCategoryFilter(category) => self.set_category_filter(category),
            Action::SetSearchQuery(query) => self.set_search_query(query),
            Action::Reset => self.reset(),
        }
    }

    /// Registers `observer` to be called after every operation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Event) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() < before
    }

    fn commit(&mut self, event: Event) {
        self.version += 1;
        trace!(
            "Notifying {} observers of {event:?} at version {}",
            self.observers.len(),
            self.version
        );
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }
}
