//! The fixed set of records a store starts from and returns to on refresh.

use crate::model::{Amount, Category, Currency, Status, Transaction};
use chrono::NaiveDate;

/// The number of records in the seed set.
pub const SEED_LEN: usize = 18;

// (id, amount in minor units, merchant, category, (year, month, day))
type SeedRow = (&'static str, i64, &'static str, Category, (i32, u32, u32));

const SEED_ROWS: [SeedRow; SEED_LEN] = [
    ("1", -4550, "Whole Foods", Category::Groceries, (2024, 2, 10)),
    ("2", -12000, "AP Gas Station", Category::Transportation, (2024, 2, 9)),
    ("3", -3275, "Chicken Republic", Category::Dining, (2024, 2, 8)),
    ("4", -1599, "Netflix", Category::Entertainment, (2024, 2, 7)),
    ("5", -8500, "H-Medix Pharmacy", Category::Healthcare, (2024, 2, 6)),
    ("6", -19999, "Jumia", Category::Shopping, (2024, 2, 5)),
    ("7", -14200, "AEDC Plc", Category::Utilities, (2024, 2, 4)),
    ("8", -6820, "Mama Success Supermarket", Category::Groceries, (2024, 2, 3)),
    ("9", -5500, "Bolt", Category::Transportation, (2024, 2, 2)),
    ("10", -4250, "RiverPlate Garden", Category::Dining, (2024, 2, 1)),
    ("11", -999, "Spotify", Category::Entertainment, (2024, 1, 31)),
    ("12", -2500, "Nelina Wellness", Category::Healthcare, (2024, 1, 30)),
    ("13", -8900, "Boss Wuse", Category::Shopping, (2024, 1, 29)),
    ("14", -7850, "Water Utility", Category::Utilities, (2024, 1, 28)),
    ("15", -11230, "Bakangizo", Category::Groceries, (2024, 1, 27)),
    ("16", -3500, "Uber", Category::Transportation, (2024, 1, 26)),
    ("17", -2800, "Domino's Pizza", Category::Dining, (2024, 1, 25)),
    ("18", -1999, "DStv", Category::Entertainment, (2024, 1, 24)),
];

/// Builds a fresh copy of the seed set, most recent first.
pub fn seed_transactions() -> Vec<Transaction> {
    SEED_ROWS
        .iter()
        .map(|&(id, minor, merchant, category, (y, m, d))| Transaction {
            id: id.to_string(),
            amount: Amount::from_minor(minor),
            merchant: merchant.to_string(),
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            status: Status::Completed,
            currency: Some(Currency::Ngn),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let seed = seed_transactions();
        let ids: BTreeSet<&str> = seed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), SEED_LEN);
    }

    #[test]
    fn test_seed_is_most_recent_first() {
        let seed = seed_transactions();
        assert_eq!(seed[0].date.to_string(), "2024-02-10");
        assert_eq!(seed[SEED_LEN - 1].date.to_string(), "2024-01-24");
        assert!(seed.windows(2).all(|w| w[0].date > w[1].date));
    }

    #[test]
    fn test_seed_records_are_completed_debits_in_known_categories() {
        for t in seed_transactions() {
            assert!(t.amount.is_negative(), "{} should be a debit", t.merchant);
            assert_eq!(t.status, Status::Completed);
            assert_eq!(t.currency, Some(Currency::Ngn));
            assert!(t.known_category().is_some());
        }
    }
}
