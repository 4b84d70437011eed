//! Staff user command handlers.

use std::fmt::Write as _;

use tabled::Tabled;
use yebomart_core::{AdminConsole, StaffUser, UserActivity};

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Shop")]
    shop: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Last active")]
    last_active: String,
}

impl From<&StaffUser> for UserRow {
    fn from(u: &StaffUser) -> Self {
        Self {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            phone: u.phone.clone(),
            shop: u.shop_name.clone(),
            role: u.role.to_string(),
            last_active: u.last_active.clone(),
        }
    }
}

fn activity_detail(a: &UserActivity) -> String {
    let u = &a.user;
    let s = &a.stats;
    let mut out = output::detail_block(&[
        ("ID", u.id.clone()),
        ("Name", u.name.clone()),
        ("Email", u.email.clone()),
        ("Shop", u.shop_name.clone()),
        ("Role", u.role.to_string()),
        ("Last active", u.last_active.clone()),
        ("Window", format!("{} days", a.days)),
        ("Revenue", format!("E {:.2}", s.total_revenue)),
        ("Transactions", s.transaction_count.to_string()),
        ("Average sale", format!("E {:.2}", s.average_transaction)),
        ("Largest sale", format!("E {:.2}", s.largest_transaction)),
        ("Voids", format!("{} ({:.1}%)", s.void_count, s.void_rate)),
    ]);

    if !a.daily_sales.is_empty() {
        let _ = writeln!(out, "\n\nDaily sales");
        for day in &a.daily_sales {
            let _ = writeln!(
                out,
                "  {}  {:>4} txns  E {:.2}",
                day.date, day.transactions, day.revenue
            );
        }
    }
    if !a.recent_sales.is_empty() {
        let _ = writeln!(out, "\nRecent sales");
        for sale in &a.recent_sales {
            let _ = writeln!(
                out,
                "  {}  E {:.2}  {} item(s)  {}  {}",
                sale.created_at, sale.total_amount, sale.item_count, sale.payment_method, sale.status
            );
        }
    }
    if !a.insights.is_empty() {
        let _ = writeln!(out, "\nInsights");
        for insight in &a.insights {
            let _ = writeln!(out, "  [{}] {}", insight.kind, insight.text);
        }
    }
    out.trim_end().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &AdminConsole,
    args: UsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List { list, role } => {
            let query = util::build_query(&list, &[("role", role.as_ref())]);
            let view = util::load_view(global, console.users(), query).await?;
            let out = output::render_view(
                &global.output,
                &view,
                |u| UserRow::from(u),
                |u| u.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Get { id, days } => {
            let activity = util::with_spinner(
                global,
                "Loading activity…",
                console.user_activity(&id, days),
            )
            .await?;
            let out = output::render_single(&global.output, &activity, activity_detail, |a| {
                a.user.id.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
