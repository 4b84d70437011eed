//! Command dispatch: bridges CLI args -> console controllers -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod dashboard;
pub mod shops;
pub mod subscriptions;
pub mod users;
pub mod util;

use yebomart_core::AdminConsole;

use crate::cli::{Command, GlobalOpts};
use crate::config::Resolved;
use crate::error::CliError;

/// Dispatch a console-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    console: &AdminConsole,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(console, args, resolved, global).await,
        Command::Logout => auth::logout(console, global),
        Command::Whoami => auth::whoami(console, global),
        Command::Shops(args) => shops::handle(console, args, global).await,
        Command::Users(args) => users::handle(console, args, global).await,
        Command::Subscriptions(args) => subscriptions::handle(console, args, global).await,
        Command::Dashboard => dashboard::overview(console, global).await,
        Command::Analytics { period } => dashboard::analytics(console, period.into(), global).await,
        Command::Health => dashboard::health(console, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
