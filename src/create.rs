//! The add-transaction gate: validates user input and turns it into a new record.
//!
//! Nothing reaches the store unless every field passes. A rejected draft produces a
//! [`ValidationError`] holding one message per failing field and leaves the store untouched.

use crate::clock::Clock;
use crate::model::{Amount, AmountError, Category, Currency, Status, Transaction};
use crate::store::Store;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::{debug, warn};

pub const AMOUNT_MESSAGE: &str = "Enter a valid amount";
pub const MERCHANT_MESSAGE: &str = "Merchant name is required";
pub const CATEGORY_MESSAGE: &str = "Select a category";
pub const DATE_MESSAGE: &str = "Date cannot be in the future";

/// Raw form input for a new transaction.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Draft {
    /// The amount as typed. The sign is ignored, every added record is an expense.
    pub amount: String,
    /// The merchant as typed. Surrounding whitespace is removed.
    pub merchant: String,
    /// The chosen category name, `None` if nothing was chosen.
    pub category: Option<String>,
    /// The transaction date. `None` means today.
    pub date: Option<NaiveDate>,
}

impl Draft {
    pub fn new(
        amount: impl Into<String>,
        merchant: impl Into<String>,
        category: Option<Category>,
    ) -> Self {
        Self {
            amount: amount.into(),
            merchant: merchant.into(),
            category: category.map(|c| c.to_string()),
            date: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Checks every field and returns the parsed values, or all of the failures at once.
    pub fn validate(&self, today: NaiveDate) -> Result<Valid, ValidationError> {
        let mut errors = ValidationError::default();

        let amount = match Amount::from_str(&self.amount) {
            Ok(amount) => Some(amount),
            Err(e) => {
                log_amount_error(&self.amount, &e);
                errors.insert(Field::Amount, AMOUNT_MESSAGE);
                None
            }
        };

        let merchant = self.merchant.trim();
        if merchant.is_empty() {
            errors.insert(Field::Merchant, MERCHANT_MESSAGE);
        }

        let category = self.category.as_deref().and_then(Category::from_name);
        if category.is_none() {
            errors.insert(Field::Category, CATEGORY_MESSAGE);
        }

        let date = self.date.unwrap_or(today);
        if date > today {
            errors.insert(Field::Date, DATE_MESSAGE);
        }

        match (amount, category) {
            (Some(amount), Some(category)) if errors.is_empty() => Ok(Valid {
                amount,
                merchant: merchant.to_string(),
                category,
                date,
            }),
            _ => Err(errors),
        }
    }

    /// Validates the draft and builds the record it describes.
    ///
    /// The id is the current time in epoch milliseconds. Two records created within the same
    /// millisecond will share an id.
    pub fn into_transaction(self, clock: &dyn Clock) -> Result<Transaction, ValidationError> {
        let valid = self.validate(clock.today())?;
        Ok(Transaction {
            id: clock.now().timestamp_millis().to_string(),
            amount: valid.amount.to_expense(),
            merchant: valid.merchant,
            category: valid.category.to_string(),
            date: valid.date,
            status: Status::Completed,
            currency: Some(Currency::Ngn),
        })
    }
}

fn log_amount_error(input: &str, e: &AmountError) {
    debug!("Rejected amount {input:?}: {e}");
}

/// The parsed fields of a draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Valid {
    pub amount: Amount,
    pub merchant: String,
    pub category: Category,
    pub date: NaiveDate,
}

/// Runs the gate and, on success, prepends the new record to `store` and returns it.
pub fn submit(
    store: &mut Store,
    draft: Draft,
    clock: &dyn Clock,
) -> Result<Transaction, ValidationError> {
    match draft.into_transaction(clock) {
        Ok(transaction) => {
            store.prepend(transaction.clone());
            Ok(transaction)
        }
        Err(e) => {
            warn!("Transaction not added: {e}");
            Err(e)
        }
    }
}

/// An input field of the add form.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Amount,
    Merchant,
    Category,
    Date,
}

serde_plain::derive_display_from_serialize!(Field);
serde_plain::derive_fromstr_from_deserialize!(Field);

/// Field-level messages for a rejected draft.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
pub struct ValidationError {
    errors: BTreeMap<Field, String>,
}

impl ValidationError {
    fn insert(&mut self, field: Field, message: &str) {
        self.errors.insert(field, message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The message for `field`, if that field failed.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// The failing fields, in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
