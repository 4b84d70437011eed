//! Dashboard, analytics and health handlers.

use yebomart_core::{AdminConsole, AnalyticsPeriod, DashboardView, ViewSource};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

fn overview_block(view: &DashboardView) -> String {
    let s = &view.stats;
    let mut out = output::detail_block(&[
        ("Total shops", s.total_shops.to_string()),
        ("Active shops", s.active_shops.to_string()),
        ("New today", s.new_shops_today.to_string()),
        ("Revenue", format!("E {:.2}", s.total_revenue)),
    ]);
    match view.source {
        ViewSource::Live => {}
        ViewSource::Demo => out.push_str("\n\n(demo data)"),
        ViewSource::Fallback => out.push_str("\n\n(demo data: backend unavailable)"),
    }
    out
}

pub async fn overview(console: &AdminConsole, global: &GlobalOpts) -> Result<(), CliError> {
    let view = util::with_spinner(global, "Loading dashboard…", console.dashboard().load()).await?;
    let out = output::render_single(&global.output, &view, overview_block, |v| {
        v.stats.total_shops.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Reports are free-form JSON; table and plain fall back to pretty JSON.
fn render_report(format: &OutputFormat, report: &serde_json::Value) -> Result<String, CliError> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(report)?),
        OutputFormat::Table | OutputFormat::Json | OutputFormat::Plain => {
            Ok(serde_json::to_string_pretty(report)?)
        }
    }
}

pub async fn analytics(
    console: &AdminConsole,
    period: AnalyticsPeriod,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let report = util::with_spinner(
        global,
        "Loading analytics…",
        console.dashboard().analytics(period),
    )
    .await?;
    if report.is_null() {
        util::notice(global, &format!("No analytics for the last {period}"));
        return Ok(());
    }
    output::print_output(&render_report(&global.output, &report)?, global.quiet);
    Ok(())
}

pub async fn health(console: &AdminConsole, global: &GlobalOpts) -> Result<(), CliError> {
    let report = util::with_spinner(global, "Checking backend…", console.dashboard().health()).await?;
    output::print_output(&render_report(&global.output, &report)?, global.quiet);
    Ok(())
}
