//! The `list` command: the filtered transaction view.

use crate::args::ListArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::store::Store;
use crate::{view, Config, Result};
use anyhow::Context;

/// Lists the records of a freshly seeded store that match the category and search filters.
///
/// # Returns
///
/// On success, returns an `Out` containing:
/// - The rendered table (or JSON when `args.json` is set), or the empty-state message.
/// - The matching records.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<Vec<Transaction>>> {
    let mut store = Store::new();
    store.set_category_filter(args.category);
    if let Some(search) = args.search {
        store.set_search_query(search);
    }

    let visible: Vec<Transaction> = store.visible().into_iter().cloned().collect();
    let message = if args.json {
        serde_json::to_string_pretty(&visible).context("Unable to serialize transactions")?
    } else {
        let refs: Vec<&Transaction> = visible.iter().collect();
        format!(
            "{}\n\n{}",
            view::render_filters(store.selected_category(), store.search_query()),
            view::render_list(&refs, config.amount_format())
        )
    };
    Ok(Out::new(message, visible))
}
