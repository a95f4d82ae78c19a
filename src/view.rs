//! Plain-text rendering of transaction lists and details.

use crate::model::{AmountFormat, Category, Transaction};
use std::fmt::Write;

/// Shown in place of an empty list.
pub const EMPTY_MESSAGE: &str = "No transactions match your filters.";

const MERCHANT_WIDTH: usize = 26;
const CATEGORY_WIDTH: usize = 14;
const AMOUNT_WIDTH: usize = 14;

/// Renders one line per record, or [`EMPTY_MESSAGE`] when there is nothing to show.
pub fn render_list(transactions: &[&Transaction], format: AmountFormat) -> String {
    if transactions.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    let mut out = String::new();
    for t in transactions {
        let _ = writeln!(out, "{}", render_row(t, format));
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn render_row(t: &Transaction, format: AmountFormat) -> String {
    format!(
        "{date}  {merchant:<mw$}  {category:<cw$}  {amount:>aw$}  {id}",
        date = t.date.format("%Y-%m-%d"),
        merchant = truncate(&t.merchant, MERCHANT_WIDTH),
        category = t.category,
        amount = t.amount.with_format(format).to_string(),
        id = t.id,
        mw = MERCHANT_WIDTH,
        cw = CATEGORY_WIDTH,
        aw = AMOUNT_WIDTH,
    )
}

/// Renders every field of a record as labelled rows.
pub fn render_detail(t: &Transaction, format: AmountFormat) -> String {
    let rows = [
        ("Amount", t.amount.with_format(format).to_string()),
        ("Merchant", t.merchant.clone()),
        ("Category", t.category.clone()),
        ("Date", t.date.format("%A, %B %-d, %Y").to_string()),
        ("Status", t.status.to_string()),
        ("ID", t.id.clone()),
    ];
    rows.iter()
        .map(|(label, value)| format!("{label:<10}{value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Describes the active filters, e.g. `Category: Dining | Search: "pizza"`.
pub fn render_filters(category: Option<Category>, query: &str) -> String {
    let category = category.map_or("All", |c| c.as_str());
    if query.trim().is_empty() {
        format!("Category: {category}")
    } else {
        format!("Category: {category} | Search: {:?}", query.trim())
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(width - 1).collect();
        cut.push('…');
        cut
    }
}
