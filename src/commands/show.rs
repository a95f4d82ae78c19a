use crate::args::ShowArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::store::Store;
use crate::{view, Config, Result};
use anyhow::anyhow;

/// Shows the detail view of the seed record with the given id.
///
/// # Errors
/// - Returns an error if no record has that id.
pub async fn show(config: Config, args: ShowArgs) -> Result<Out<Transaction>> {
    let store = Store::new();
    let transaction = store
        .get(&args.id)
        .cloned()
        .ok_or_else(|| anyhow!("No transaction with ID '{}'", args.id))?;
    let message = view::render_detail(&transaction, config.amount_format());
    Ok(Out::new(message, transaction))
}
