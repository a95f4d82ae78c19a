//! The `session` command: a line-oriented loop over one long-lived store.
//!
//! Each input line is one command. Output for each command is written as soon as it completes.
//! Mistyped commands and rejected drafts are reported on the output and the loop carries on.

use crate::clock::Clock;
use crate::commands::Out;
use crate::create::{submit, Draft};
use crate::model::{AmountFormat, Category};
use crate::projection::Projection;
use crate::store::{Action, Store, StoreHandle};
use crate::{view, Config, Result};
use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

const HELP: &str = "\
Commands:
  list                                 show the transactions that match the filters
  filter <category|all>                filter by category, or clear the filter
  search [text]                        filter by merchant text, or clear the search
  add <amount> <category> <merchant>   add an expense
  show <id>                            show one transaction
  refresh                              discard additions and reload the sample data
  help                                 show this message
  quit                                 end the session";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    List,
    Filter(Option<Category>),
    Search(String),
    Add {
        amount: String,
        category: String,
        merchant: String,
    },
    Show(String),
    Refresh,
    Help,
    Quit,
}

/// Parses one input line. Blank lines parse to `None`. Errors are messages for the user.
pub fn parse_line(line: &str) -> std::result::Result<Option<SessionCommand>, String> {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line.trim_end(), ""));

    let command = match word.to_lowercase().as_str() {
        "list" | "ls" => SessionCommand::List,
        "filter" => match rest.trim() {
            "" => return Err("Usage: filter <category|all>".to_string()),
            all if all.eq_ignore_ascii_case("all") => SessionCommand::Filter(None),
            name => SessionCommand::Filter(Some(crate::args::parse_category(name)?)),
        },
        "search" => SessionCommand::Search(rest.to_string()),
        "add" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(amount), Some(category)) => SessionCommand::Add {
                    amount: amount.to_string(),
                    category: category.to_string(),
                    merchant: parts.collect::<Vec<_>>().join(" "),
                },
                _ => return Err("Usage: add <amount> <category> <merchant>".to_string()),
            }
        }
        "show" => match rest.trim() {
            "" => return Err("Usage: show <id>".to_string()),
            id => SessionCommand::Show(id.to_string()),
        },
        "refresh" => SessionCommand::Refresh,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("Unknown command '{other}'. Type `help` for commands.")),
    };
    Ok(Some(command))
}

/// The state of an interactive session: a store owned by its own task plus a memoized view.
pub struct Session {
    handle: StoreHandle,
    clock: Arc<dyn Clock>,
    format: AmountFormat,
    memo: Projection,
}

impl Session {
    /// Takes ownership of `store` and starts its task. Must be called within a tokio runtime.
    pub fn new(mut store: Store, clock: Arc<dyn Clock>, format: AmountFormat) -> Self {
        store.subscribe(|event| debug!("Store event: {event:?}"));
        Self {
            handle: StoreHandle::spawn(store),
            clock,
            format,
            memo: Projection::new(),
        }
    }

    /// Runs `command` and returns the text to show. `Quit` is the caller's concern and is a no-op
    /// here.
    pub async fn execute(&mut self, command: SessionCommand) -> Result<String> {
        match command {
            SessionCommand::List => self.render_visible().await,
            SessionCommand::Filter(category) => {
                self.handle
                    .dispatch(Action::SetCategoryFilter(category))
                    .await?;
                self.render_visible().await
            }
            SessionCommand::Search(query) => {
                self.handle.dispatch(Action::SetSearchQuery(query)).await?;
                self.render_visible().await
            }
            SessionCommand::Add {
                amount,
                category,
                merchant,
            } => self.add(amount, category, merchant).await,
            SessionCommand::Show(id) => Ok(match self.handle.get(id.clone()).await? {
                Some(t) => view::render_detail(&t, self.format),
                None => format!("No transaction with ID '{id}'"),
            }),
            SessionCommand::Refresh => {
                self.handle.dispatch(Action::Reset).await?;
                let total = self.handle.snapshot().await?.total;
                Ok(format!("Refreshed, {total} transactions"))
            }
            SessionCommand::Help => Ok(HELP.to_string()),
            SessionCommand::Quit => Ok(String::new()),
        }
    }

    async fn add(&mut self, amount: String, category: String, merchant: String) -> Result<String> {
        let category = Category::from_name_ignore_case(&category)
            .map(|c| c.to_string())
            .unwrap_or(category);
        let draft = Draft {
            amount,
            merchant,
            category: Some(category),
            date: None,
        };
        let clock = self.clock.clone();
        let result = self
            .handle
            .with(move |store| submit(store, draft, clock.as_ref()))
            .await?;
        Ok(match result {
            Ok(t) => format!("Added transaction with ID: {}", t.id),
            Err(e) => e
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect::<Vec<_>>()
                .join("\n"),
        })
    }

    async fn render_visible(&mut self) -> Result<String> {
        let mut memo = std::mem::take(&mut self.memo);
        let format = self.format;
        let (memo, text) = self
            .handle
            .with(move |store| {
                let text = format!(
                    "{}\n\n{}",
                    view::render_filters(store.selected_category(), store.search_query()),
                    view::render_list(&memo.view(store), format)
                );
                (memo, text)
            })
            .await?;
        self.memo = memo;
        Ok(text)
    }
}

/// Reads commands from `input` until it ends or `quit` is read, writing results to `output`.
pub async fn session<R, W>(
    config: Config,
    clock: Arc<dyn Clock>,
    input: R,
    mut output: W,
) -> Result<Out<usize>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session::new(Store::new(), clock, config.amount_format());
    let mut lines = input.lines();
    let mut executed = 0usize;

    write_block(&mut output, "Type `help` for commands.").await?;
    while let Some(line) = lines
        .next_line()
        .await
        .context("Unable to read session input")?
    {
        let text = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(command)) => {
                executed += 1;
                session.execute(command).await?
            }
            Err(message) => message,
        };
        write_block(&mut output, &text).await?;
    }
    output.flush().await.context("Unable to flush output")?;

    info!("Session ended after {executed} commands");
    Ok(Out::new(String::new(), executed))
}

async fn write_block<W>(output: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    output
        .write_all(format!("{text}\n\n").as_bytes())
        .await
        .context("Unable to write session output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SEED_LEN;
    use crate::test::FixedClock;

    async fn run(script: &str) -> (String, usize) {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::default());
        let mut output = Vec::new();
        let out = session(Config::default(), clock, script.as_bytes(), &mut output)
            .await
            .unwrap();
        (String::from_utf8(output).unwrap(), *out.structure().unwrap())
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("LIST"), Ok(Some(SessionCommand::List)));
        assert_eq!(
            parse_line("filter dining"),
            Ok(Some(SessionCommand::Filter(Some(Category::Dining))))
        );
        assert_eq!(
            parse_line("filter All"),
            Ok(Some(SessionCommand::Filter(None)))
        );
        assert_eq!(
            parse_line("search  Whole "),
            Ok(Some(SessionCommand::Search(" Whole ".to_string())))
        );
        assert_eq!(
            parse_line("search"),
            Ok(Some(SessionCommand::Search(String::new())))
        );
        assert_eq!(
            parse_line("add 45 Dining Test  Shop"),
            Ok(Some(SessionCommand::Add {
                amount: "45".to_string(),
                category: "Dining".to_string(),
                merchant: "Test Shop".to_string(),
            }))
        );
        assert!(parse_line("add 45").is_err());
        assert!(parse_line("filter Rent").is_err());
        assert!(parse_line("dance").is_err());
    }

    #[tokio::test]
    async fn test_filter_and_search() {
        let (text, executed) = run("filter groceries\nsearch MAMA\nquit\nlist\n").await;
        assert_eq!(executed, 2);
        let searched = text
            .split_once("Category: Groceries | Search: \"MAMA\"")
            .map(|(_, after)| after)
            .unwrap();
        assert!(searched.contains("Mama Success Supermarket"));
        assert!(!searched.contains("Bakangizo"));
        assert!(!searched.contains("Whole Foods"));
    }

    #[tokio::test]
    async fn test_add_then_list_then_refresh() {
        let (text, _) = run("add 45 dining Test Shop\nsearch test\nrefresh\nlist\n").await;
        assert!(text.contains("Added transaction with ID:"));
        assert!(text.contains("Test Shop"));
        assert!(text.contains(&format!("Refreshed, {SEED_LEN} transactions")));
        // the search survives the refresh but the added record does not
        assert!(text.ends_with(&format!("{}\n\n", view::EMPTY_MESSAGE)));
    }

    #[tokio::test]
    async fn test_rejected_add_reports_fields() {
        let (text, _) = run("add abc Dining Shop\nadd 5 Rent Shop\n").await;
        assert!(text.contains("amount: Enter a valid amount"));
        assert!(text.contains("category: Select a category"));
        assert!(!text.contains("Added transaction"));
    }

    #[tokio::test]
    async fn test_show_and_unknown_command() {
        let (text, executed) = run("show 9\nshow 404\nfly\n").await;
        assert_eq!(executed, 2);
        assert!(text.contains("Merchant  Bolt"));
        assert!(text.contains("No transaction with ID '404'"));
        assert!(text.contains("Unknown command 'fly'"));
    }

    #[tokio::test]
    async fn test_projection_memo_follows_the_store() {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::default());
        let mut session = Session::new(Store::new(), clock, AmountFormat::default());

        async fn memo_is_fresh(session: &Session) -> bool {
            let memo = session.memo.clone();
            session
                .handle
                .with(move |store| memo.is_fresh(store))
                .await
                .unwrap()
        }

        assert!(!memo_is_fresh(&session).await);
        session.execute(SessionCommand::List).await.unwrap();
        assert!(memo_is_fresh(&session).await);

        session
            .handle
            .dispatch(Action::SetSearchQuery("uber".to_string()))
            .await
            .unwrap();
        assert!(!memo_is_fresh(&session).await);

        let text = session.execute(SessionCommand::List).await.unwrap();
        assert!(memo_is_fresh(&session).await);
        assert!(text.contains("Uber"));
    }
}
