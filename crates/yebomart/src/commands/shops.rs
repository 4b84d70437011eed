//! Shop command handlers.

use tabled::Tabled;
use yebomart_core::{
    AdminConsole, Shop, ShopAction, ShopDetailController, ShopStatus, status_badge, tier_badge,
};

use crate::cli::{GlobalOpts, ShopsArgs, ShopsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ShopRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "License expiry")]
    expiry: String,
}

impl ShopRow {
    fn new(s: &Shop, color: bool) -> Self {
        let tier = s.tier.to_string();
        let status = s.status.to_string();
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            owner: s.owner_name.clone(),
            phone: s.phone.clone(),
            tier: output::badge(&tier, tier_badge(&tier), color),
            status: output::badge(&status, status_badge(&status), color),
            expiry: output::date(s.license_expiry),
        }
    }
}

fn detail(s: &Shop) -> String {
    let mut fields = vec![
        ("ID", s.id.clone()),
        ("Name", s.name.clone()),
        ("Owner", s.owner_name.clone()),
        ("Phone", s.phone.clone()),
        ("Email", s.owner_email.clone().unwrap_or_else(|| "-".into())),
        ("Address", s.address.clone().unwrap_or_else(|| "-".into())),
        ("Tier", s.tier.to_string()),
        ("Status", s.status.to_string()),
        ("Created", output::date(s.created_at)),
        ("License expiry", output::date(s.license_expiry)),
    ];
    if let Some(ref stats) = s.stats {
        let count = |n: Option<u64>| n.map_or_else(|| "-".into(), |n| n.to_string());
        fields.push(("Products", count(stats.product_count)));
        fields.push(("Staff", count(stats.user_count)));
        fields.push(("Sales", count(stats.sale_count)));
        fields.push((
            "Revenue",
            stats
                .total_revenue
                .map_or_else(|| "-".into(), |r| format!("E {r:.2}")),
        ));
    }
    output::detail_block(&fields)
}

fn print_shop(shop: &Shop, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, shop, detail, |s| s.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn load<'c>(
    console: &'c AdminConsole,
    id: String,
    global: &GlobalOpts,
) -> Result<ShopDetailController<'c>, CliError> {
    let mut ctl = console.shop_detail(id);
    util::with_spinner(global, "Loading shop…", ctl.load()).await?;
    Ok(ctl)
}

fn loaded<'c>(ctl: &'c ShopDetailController<'_>) -> Result<&'c Shop, CliError> {
    ctl.shop().ok_or_else(|| CliError::NotFound {
        resource_type: "shop".into(),
        identifier: ctl.shop_id().to_owned(),
        list_command: "shops list".into(),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    console: &AdminConsole,
    args: ShopsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ShopsCommand::List { list, status, tier } => {
            let query = util::build_query(
                &list,
                &[("status", status.as_ref()), ("tier", tier.as_ref())],
            );
            let view = util::load_view(global, console.shops(), query).await?;
            let color = output::should_color(&global.color);
            let out = output::render_view(
                &global.output,
                &view,
                |s| ShopRow::new(s, color),
                |s| s.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShopsCommand::Get { id } => {
            let ctl = load(console, id, global).await?;
            print_shop(loaded(&ctl)?, global)
        }

        ShopsCommand::Tier { id, tier } => {
            let mut ctl = load(console, id, global).await?;
            let current = loaded(&ctl)?.tier;
            let target = ctl.select_tier(&tier)?;
            if target == current {
                util::notice(global, &format!("Shop is already on {target}"));
                return Ok(());
            }

            ctl.open(ShopAction::ChangeTier);
            let name = loaded(&ctl)?.name.clone();
            if !util::confirm(
                "change tier",
                &format!("Move '{name}' from {current} to {target}?"),
                global.yes,
            )? {
                ctl.cancel(ShopAction::ChangeTier);
                return Ok(());
            }
            util::with_spinner(global, "Updating tier…", ctl.change_tier()).await?;
            util::notice(global, &format!("Tier changed to {target}"));
            print_shop(loaded(&ctl)?, global)
        }

        ShopsCommand::Suspend { id } => toggle(console, id, ShopStatus::Suspended, global).await,

        ShopsCommand::Reactivate { id } => toggle(console, id, ShopStatus::Active, global).await,

        ShopsCommand::Delete { id } => {
            let mut ctl = load(console, id, global).await?;
            let name = loaded(&ctl)?.name.clone();

            ctl.open(ShopAction::Delete);
            if !util::confirm(
                "delete shop",
                &format!("Delete shop '{name}' and all of its data? This cannot be undone."),
                global.yes,
            )? {
                ctl.cancel(ShopAction::Delete);
                return Ok(());
            }
            util::with_spinner(global, "Deleting shop…", ctl.delete()).await?;
            util::notice(global, &format!("Shop '{name}' deleted"));
            Ok(())
        }
    }
}

/// Suspend or reactivate, refusing when the shop is already there.
async fn toggle(
    console: &AdminConsole,
    id: String,
    wanted: ShopStatus,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut ctl = load(console, id, global).await?;
    let shop = loaded(&ctl)?;
    if shop.status.toggle_target() != wanted {
        return Err(CliError::Validation {
            field: "status".into(),
            reason: format!("shop '{}' is {}", shop.id, shop.status),
        });
    }

    let label = ctl.suspend_label();
    let name = shop.name.clone();
    ctl.open(ShopAction::ToggleSuspension);
    if !util::confirm(
        &label.to_lowercase(),
        &format!("{label} shop '{name}'?"),
        global.yes,
    )? {
        ctl.cancel(ShopAction::ToggleSuspension);
        return Ok(());
    }
    let status = util::with_spinner(global, "Updating status…", ctl.toggle_suspension()).await?;
    util::notice(global, &format!("Shop '{name}' is now {status}"));
    print_shop(loaded(&ctl)?, global)
}
