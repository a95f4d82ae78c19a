use crate::args::AddArgs;
use crate::clock::Clock;
use crate::commands::Out;
use crate::create::{submit, Draft};
use crate::model::{Category, Transaction};
use crate::store::Store;
use crate::{view, Config, Result};
use anyhow::Context;

/// Runs the add-transaction gate against a freshly seeded store.
///
/// The category name is matched without regard to case. A name that matches nothing is passed
/// through as typed so that it is reported alongside any other field errors.
///
/// # Returns
///
/// On success, returns an `Out` containing:
/// - A message naming the new record's id, followed by the resulting list.
/// - The new record.
///
/// # Errors
///
/// - Returns the field-level validation messages if the input is rejected.
pub async fn add(config: Config, args: AddArgs, clock: &dyn Clock) -> Result<Out<Transaction>> {
    let category = args.category.map(|name| {
        Category::from_name_ignore_case(&name)
            .map(|c| c.to_string())
            .unwrap_or(name)
    });
    let draft = Draft {
        amount: args.amount,
        merchant: args.merchant,
        category,
        date: args.date,
    };

    let mut store = Store::new();
    let transaction = submit(&mut store, draft, clock).context("Transaction not added")?;

    let message = format!(
        "Added transaction with ID: {}\n\n{}",
        transaction.id,
        view::render_list(&store.visible(), config.amount_format())
    );
    Ok(Out::new(message, transaction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create::{Field, ValidationError};
    use crate::test::FixedClock;

    fn args(amount: &str, merchant: &str, category: Option<&str>) -> AddArgs {
        AddArgs {
            amount: amount.to_string(),
            merchant: merchant.to_string(),
            category: category.map(str::to_string),
            date: None,
        }
    }

    #[tokio::test]
    async fn test_add() {
        let clock = FixedClock::default();
        let out = add(Config::default(), args("45", "  Test Shop  ", Some("dining")), &clock)
            .await
            .unwrap();
        let t = out.structure().unwrap();
        assert_eq!(t.merchant, "Test Shop");
        assert_eq!(t.category, "Dining");
        assert_eq!(t.amount.to_string(), "-₦45.00");
        let first_row = out.message().lines().nth(2).unwrap();
        assert!(first_row.contains("Test Shop"));
    }

    #[tokio::test]
    async fn test_add_reports_field_errors() {
        let clock = FixedClock::default();
        let err = add(Config::default(), args("abc", "", Some("Rent")), &clock)
            .await
            .unwrap_err();
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(
            validation.fields().collect::<Vec<_>>(),
            vec![Field::Amount, Field::Merchant, Field::Category]
        );
    }
}
