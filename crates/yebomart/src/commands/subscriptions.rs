//! Subscription command handlers, including bulk tier changes and renewals.

use serde::Serialize;
use tabled::Tabled;
use yebomart_core::action::bulk::RENEWAL_DAYS;
use yebomart_core::{
    AdminConsole, BulkAction, BulkOutcome, Subscription, Tier, status_badge, tier_badge,
    tier_breakdown,
};

use crate::cli::{GlobalOpts, SubscriptionsArgs, SubscriptionsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SubscriptionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Shop")]
    shop: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Started")]
    started: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Auto-renew")]
    auto_renew: String,
}

impl SubscriptionRow {
    fn new(s: &Subscription, color: bool) -> Self {
        let tier = s.tier.to_string();
        let status = s.status.to_string();
        Self {
            id: s.id.clone(),
            shop: s.shop_name.clone(),
            owner: s.owner_name.clone(),
            tier: output::badge(&tier, tier_badge(&tier), color),
            status: output::badge(&status, status_badge(&status), color),
            started: output::date(s.start_date),
            expires: output::date(s.expiry_date),
            auto_renew: if s.auto_renew { "yes" } else { "no" }.into(),
        }
    }
}

#[derive(Clone, Copy, Tabled, Serialize)]
struct TierCount {
    #[tabled(rename = "Tier")]
    tier: Tier,
    #[tabled(rename = "Subscriptions")]
    count: usize,
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Result")]
    result: String,
}

fn outcome_table(outcome: &BulkOutcome) -> String {
    let updated = outcome.updated.iter().map(|s| OutcomeRow {
        id: s.id.clone(),
        result: format!("{} · expires {}", s.tier, output::date(s.expiry_date)),
    });
    let failed = outcome.failed.iter().map(|f| OutcomeRow {
        id: f.id.clone(),
        result: format!("failed: {}", f.message),
    });
    let rows: Vec<OutcomeRow> = updated.chain(failed).collect();
    output::render_table(&rows)
}

fn parse_tier(raw: &str) -> Result<Tier, CliError> {
    raw.trim()
        .parse::<Tier>()
        .map_err(|_| CliError::Validation {
            field: "tier".into(),
            reason: format!(
                "unknown tier '{raw}' (expected one of {})",
                Tier::ALL.map(|t| t.to_string()).join(", ")
            ),
        })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &AdminConsole,
    args: SubscriptionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SubscriptionsCommand::List { list, tier, status } => {
            let query = util::build_query(
                &list,
                &[("tier", tier.as_ref()), ("status", status.as_ref())],
            );
            let view = util::load_view(global, console.subscriptions(), query).await?;
            let color = output::should_color(&global.color);
            let out = output::render_view(
                &global.output,
                &view,
                |s| SubscriptionRow::new(s, color),
                |s| s.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SubscriptionsCommand::Tiers => {
            let all = util::with_spinner(
                global,
                "Loading subscriptions…",
                console.subscriptions().collect_all(),
            )
            .await?;
            let counts: Vec<TierCount> = tier_breakdown(&all)
                .into_iter()
                .map(|(tier, count)| TierCount { tier, count })
                .collect();
            let out = output::render_list(
                &global.output,
                &counts,
                |c| *c,
                |c| format!("{}\t{}", c.tier, c.count),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SubscriptionsCommand::ChangeTier { tier, ids } => {
            let tier = parse_tier(&tier)?;
            run_bulk(console, BulkAction::ChangeTier(tier), &ids, global).await
        }

        SubscriptionsCommand::Renew { ids } => {
            run_bulk(console, BulkAction::Renew, &ids, global).await
        }
    }
}

/// Select `ids` across every page, confirm, then apply `action`.
async fn run_bulk(
    console: &AdminConsole,
    action: BulkAction,
    ids: &[String],
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let all = util::with_spinner(
        global,
        "Loading subscriptions…",
        console.subscriptions().collect_all(),
    )
    .await?;

    let mut bulk = console.subscription_bulk();
    for id in ids {
        if bulk.selection().contains(id) {
            continue;
        }
        let row = all
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| CliError::NotFound {
                resource_type: "subscription".into(),
                identifier: id.clone(),
                list_command: "subscriptions list".into(),
            })?;
        bulk.selection_mut().toggle(row);
    }

    let count = bulk.selection().len();
    let summary = match action {
        BulkAction::ChangeTier(tier) => format!("Move {count} subscription(s) to {tier}?"),
        BulkAction::Renew => format!("Renew {count} subscription(s) for {RENEWAL_DAYS} days?"),
    };
    bulk.open(action);
    if !util::confirm("bulk update", &summary, global.yes)? {
        bulk.cancel();
        return Ok(());
    }

    let outcome = util::with_spinner(global, "Updating subscriptions…", bulk.confirm()).await?;
    let out = output::render_single(&global.output, &outcome, outcome_table, |o| {
        o.updated
            .iter()
            .map(|s| s.id.clone())
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    output::print_output(&out, global.quiet);

    if outcome.is_complete() {
        Ok(())
    } else {
        Err(CliError::PartialFailure {
            total: outcome.updated.len() + outcome.failed.len(),
            succeeded: outcome.updated.len(),
            failed: outcome.failed.len(),
        })
    }
}
