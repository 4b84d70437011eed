//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use yebomart_core::{ListController, ListEntity, ListView, QueryState};

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to prompt on, the caller must pass `--yes`.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Status line on stderr, suppressed by `--quiet`.
pub fn notice(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

/// Run `fut` behind a spinner when stderr is interactive.
pub async fn with_spinner<F: Future>(global: &GlobalOpts, message: &str, fut: F) -> F::Output {
    if global.quiet || !std::io::stderr().is_terminal() {
        return fut.await;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = fut.await;
    spinner.finish_and_clear();
    out
}

/// Build the list query: `--query` first, then explicit flags on top.
pub fn build_query(list: &ListArgs, filters: &[(&str, Option<&String>)]) -> QueryState {
    let mut query = list
        .query
        .as_deref()
        .map(QueryState::from_query_string)
        .unwrap_or_default();

    if let Some(ref search) = list.search {
        query.set_search(search.clone());
    }
    for (name, value) in filters {
        if let Some(value) = value {
            query.set_filter(*name, value.as_str());
        }
    }
    // Page last: setting search or a filter resets it.
    if let Some(page) = list.page {
        query.set_page(page);
    }
    query
}

/// Refresh `controller` for `query` and return the published view.
pub async fn load_view<E: ListEntity>(
    global: &GlobalOpts,
    controller: &ListController<E>,
    query: QueryState,
) -> Result<Arc<ListView<E>>, CliError> {
    with_spinner(global, &format!("Loading {}s…", E::KIND), controller.set_query(query))
        .await?
        .ok_or_else(|| CliError::Internal(format!("{} listing was superseded", E::KIND)))
}
