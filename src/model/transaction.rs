use crate::model::{Amount, Category};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a single financial event.
///
/// The `category` is kept as text so that a record can carry any value handed to the store. Only
/// the add flow restricts it to a [`Category`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    /// Opaque identifier, expected to be unique within a collection.
    pub id: String,
    /// Negative for a debit (expense), otherwise a credit.
    pub amount: Amount,
    pub merchant: String,
    pub category: String,
    /// Calendar date, written as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

impl Transaction {
    /// Returns true if the record is filed under `category`. The comparison is exact.
    pub fn is_in(&self, category: Category) -> bool {
        self.known_category() == Some(category)
    }

    /// The category as a member of the fixed enumeration, if it is one.
    pub fn known_category(&self) -> Option<Category> {
        Category::from_name(&self.category)
    }
}

/// The settlement state of a transaction.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Completed,
    Pending,
    Failed,
}

serde_plain::derive_display_from_serialize!(Status);
serde_plain::derive_fromstr_from_deserialize!(Status);

/// The single currency this system handles.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "NGN")]
    Ngn,
}

serde_plain::derive_display_from_serialize!(Currency);
serde_plain::derive_fromstr_from_deserialize!(Currency);

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Ngn => "₦",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            id: "9".to_string(),
            amount: Amount::from_minor(-5500),
            merchant: "Bolt".to_string(),
            category: "Transportation".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            status: Status::Completed,
            currency: Some(Currency::Ngn),
        }
    }

    #[test]
    fn test_serialize_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "9");
        assert_eq!(json["amount"], "-₦55.00");
        assert_eq!(json["date"], "2024-02-02");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["currency"], "NGN");
    }

    #[test]
    fn test_currency_is_optional() {
        let mut t = sample();
        t.currency = None;
        let json = serde_json::to_string(&t).unwrap();
        assert!(!json.contains("currency"));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.currency, None);
    }

    #[test]
    fn test_is_in_is_exact() {
        let mut t = sample();
        assert!(t.is_in(Category::Transportation));
        assert!(!t.is_in(Category::Dining));
        t.category = "transportation".to_string();
        assert!(!t.is_in(Category::Transportation));
        assert_eq!(t.known_category(), None);
    }

    #[test]
    fn test_status_text() {
        assert_eq!(Status::Pending.to_string(), "pending");
        assert_eq!("failed".parse::<Status>().unwrap(), Status::Failed);
    }
}
