//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use yebomart_core::{BadgeVariant, ListView};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Paint a tier or status label with its badge colour.
pub fn badge(label: &str, variant: BadgeVariant, color: bool) -> String {
    if !color {
        return label.to_owned();
    }
    match variant {
        BadgeVariant::Default => label.to_owned(),
        BadgeVariant::Muted => label.dimmed().to_string(),
        BadgeVariant::Info => label.blue().to_string(),
        BadgeVariant::Warning => label.yellow().to_string(),
        BadgeVariant::Success => label.green().to_string(),
        BadgeVariant::Danger => label.red().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact` / `yaml`: serializes the original data via serde
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render one page of a list view. Structured formats carry the paging
/// metadata; the table gets a pager footer.
pub fn render_view<T, R>(
    format: &OutputFormat,
    view: &ListView<T>,
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let table = render_list(format, &view.items, to_row, id_fn)?;
            Ok(format!("{table}\n{}", pager_footer(view)))
        }
        OutputFormat::Json => render_json(view, false),
        OutputFormat::JsonCompact => render_json(view, true),
        OutputFormat::Yaml => render_yaml(view),
        OutputFormat::Plain => render_list(format, &view.items, to_row, id_fn),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since single-item detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// `Page 2 of 5 (47 total) [1 2 3 4 5]`, plus the data source when it is
/// not the live backend.
pub fn pager_footer<T>(view: &ListView<T>) -> String {
    let pages = view
        .visible_pages()
        .iter()
        .map(|p| {
            if *p == view.page {
                format!("[{p}]")
            } else {
                p.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let source = match view.source {
        yebomart_core::ViewSource::Live => String::new(),
        yebomart_core::ViewSource::Demo => " · demo data".into(),
        yebomart_core::ViewSource::Fallback => " · demo data (backend unavailable)".into(),
    };
    format!(
        "Page {} of {} ({} total) {pages}{source}",
        view.page,
        view.total_pages().max(1),
        view.total
    )
}

// ── Format-specific renderers ────────────────────────────────────────

pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}

/// Key/value block for detail views.
pub fn detail_block(fields: &[(&str, String)]) -> String {
    let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(k, v)| format!("{k:<width$}  {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `2025-01-31`, or `-` when absent.
pub fn date(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    value.map_or_else(|| "-".into(), |d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_without_color_is_plain() {
        assert_eq!(badge("Pro", BadgeVariant::Success, false), "Pro");
        assert_ne!(badge("Pro", BadgeVariant::Success, true), "Pro");
        assert_eq!(badge("odd", BadgeVariant::Default, true), "odd");
    }

    #[test]
    fn detail_block_aligns_keys() {
        let block = detail_block(&[("ID", "shop-1".into()), ("Owner", "John".into())]);
        assert_eq!(block, "ID     shop-1\nOwner  John");
    }
}
