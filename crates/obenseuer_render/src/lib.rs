use std::fmt::Write as _;
use std::time::Instant;

use obenseuer_core::core_api::input::AMOUNT_PRESETS;
use obenseuer_core::core_api::stat_table::{self, STAT_VALUE_PRESETS, StatGroup};
use obenseuer_core::core_api::{
    CategoryCount, CategoryFilter, ConsoleCommand, CopyTarget, Item, KeyValueStore, Session,
    ViewState, format_stat_command,
};
use serde_json::{Map as JsonMap, Value as JsonValue};

const CARD_RULE_WIDTH: usize = 60;
const DESCRIPTION_WIDTH: usize = 56;
const COPIED_LABEL: &str = "Copied!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    /// Show descriptions and amount presets on every card.
    pub verbose: bool,
}

/// Favorites section (when any favorite is loaded) followed by the filtered,
/// sorted item cards.
pub fn render_catalog_text<S: KeyValueStore>(
    session: &Session<S>,
    options: TextRenderOptions,
    now: Instant,
) -> String {
    let mut out = String::new();
    let state = session.view_state();

    let favorites = session.favorite_items();
    if !session.preferences().favorite_ids.is_empty() {
        writeln!(out, " ::: Favorites ({}) :::", favorites.len())
            .expect("writing to String cannot fail");
        writeln!(out).expect("writing to String cannot fail");
        for item in &favorites {
            write_item_card(&mut out, item, state, true, options, now);
        }
        writeln!(out, "{}", "=".repeat(CARD_RULE_WIDTH)).expect("writing to String cannot fail");
        writeln!(out).expect("writing to String cannot fail");
    }

    let view = session.view();
    writeln!(
        out,
        " ::: Items ({} of {}) :::",
        view.items.len(),
        session.catalog().len()
    )
    .expect("writing to String cannot fail");
    writeln!(out).expect("writing to String cannot fail");
    if view.items.is_empty() {
        writeln!(out, "  none").expect("writing to String cannot fail");
        return out;
    }
    for item in &view.items {
        write_item_card(
            &mut out,
            item,
            state,
            session.is_favorite(item.id),
            options,
            now,
        );
    }
    out
}

pub fn render_item_card(
    item: &Item,
    state: &ViewState,
    favorite: bool,
    options: TextRenderOptions,
    now: Instant,
) -> String {
    let mut out = String::new();
    write_item_card(&mut out, item, state, favorite, options, now);
    out
}

fn write_item_card(
    out: &mut String,
    item: &Item,
    state: &ViewState,
    favorite: bool,
    options: TextRenderOptions,
    now: Instant,
) {
    let marker = if favorite { '*' } else { ' ' };
    writeln!(out, " [{marker}] {}  #{}", display_title(item), item.id)
        .expect("writing to String cannot fail");

    if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
        let description = if options.verbose {
            description.to_string()
        } else {
            fit_column(description, DESCRIPTION_WIDTH)
        };
        writeln!(out, "     {description}").expect("writing to String cannot fail");
    }

    if !item.categories.is_empty() {
        let chips: Vec<String> = item
            .categories
            .iter()
            .map(|category| category_chip(category, &state.selected_category))
            .collect();
        writeln!(out, "     {}", chips.join(" ")).expect("writing to String cannot fail");
    }

    let amount = state.amount_for(item.id);
    let command = ConsoleCommand::add_item(item.id, i64::from(amount));
    let copied = if state.is_copied(CopyTarget::Item(item.id), now) {
        format!("  {COPIED_LABEL}")
    } else {
        String::new()
    };
    writeln!(out, "     > {command}{copied}").expect("writing to String cannot fail");
    if options.verbose {
        writeln!(out, "       amounts: {}", amount_presets(amount))
            .expect("writing to String cannot fail");
    }

    let mut footer = format!("     Value: {}", item.value);
    if let Some(stack) = item.stackable {
        write!(footer, "    Stack: {stack}").expect("writing to String cannot fail");
    }
    writeln!(out, "{footer}").expect("writing to String cannot fail");
    writeln!(out).expect("writing to String cannot fail");
}

fn display_title(item: &Item) -> &str {
    match item.title.as_deref() {
        Some(title) if !title.is_empty() => title,
        _ => "(untitled)",
    }
}

fn category_chip(category: &str, selected: &CategoryFilter) -> String {
    match selected {
        CategoryFilter::Named(name) if name == category => format!("[{category}]"),
        _ => format!("({category})"),
    }
}

fn amount_presets(current: u32) -> String {
    AMOUNT_PRESETS
        .iter()
        .map(|&preset| {
            if preset == current {
                format!("[{preset}]")
            } else {
                preset.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One `Name (count)` line per category, the selected one marked with `>`.
pub fn render_category_menu(categories: &[CategoryCount], selected: &CategoryFilter) -> String {
    let mut out = String::new();
    for entry in categories {
        let marker = if entry.category == *selected { '>' } else { ' ' };
        writeln!(out, "{marker} {} ({})", entry.category, entry.count)
            .expect("writing to String cannot fail");
    }
    out
}

/// The console command panel: stat picker, value presets, the resulting
/// command and the quick toggles.
pub fn render_console_panel(state: &ViewState, now: Instant) -> String {
    let mut out = String::new();
    writeln!(out, " ::: Player Stats :::").expect("writing to String cannot fail");
    for group in StatGroup::ALL {
        writeln!(out, "  {group}").expect("writing to String cannot fail");
        for stat in stat_table::in_group(group) {
            let marker = if stat.id == state.selected_stat { '>' } else { ' ' };
            writeln!(out, "   {marker} {:<16}{}", stat.label, stat.id)
                .expect("writing to String cannot fail");
        }
    }
    writeln!(out).expect("writing to String cannot fail");

    let presets: Vec<String> = STAT_VALUE_PRESETS
        .iter()
        .map(|&preset| {
            if preset == state.stat_value {
                format!("[{preset}]")
            } else {
                preset.to_string()
            }
        })
        .collect();
    writeln!(out, "  Value: {}   presets: {}", state.stat_value, presets.join(" "))
        .expect("writing to String cannot fail");

    let copied = if state.is_copied(CopyTarget::ConsolePanel, now) {
        format!("  {COPIED_LABEL}")
    } else {
        String::new()
    };
    writeln!(
        out,
        "  > {}{copied}",
        format_stat_command(&state.selected_stat, state.stat_value)
    )
    .expect("writing to String cannot fail");
    writeln!(out).expect("writing to String cannot fail");

    writeln!(out, " ::: Quick Toggles :::").expect("writing to String cannot fail");
    for command in [ConsoleCommand::GodMode, ConsoleCommand::Noclip] {
        writeln!(out, "  > {command}").expect("writing to String cannot fail");
    }
    out
}

/// Canonical JSON for the current view, keys in a fixed order.
pub fn render_view_json<S: KeyValueStore>(session: &Session<S>) -> JsonValue {
    let state = session.view_state();
    let view = session.view();
    let mut out = JsonMap::new();

    out.insert(
        "search".to_string(),
        JsonValue::String(state.search_term.clone()),
    );
    out.insert(
        "category".to_string(),
        JsonValue::String(state.selected_category.to_string()),
    );
    out.insert(
        "sort".to_string(),
        JsonValue::String(state.sort_key.to_string()),
    );
    out.insert(
        "categories".to_string(),
        categories_to_json(&view.categories),
    );
    out.insert(
        "favorites".to_string(),
        JsonValue::Array(
            session
                .favorite_items()
                .into_iter()
                .map(|item| item_to_json(item, state, true))
                .collect(),
        ),
    );
    out.insert(
        "items".to_string(),
        JsonValue::Array(
            view.items
                .iter()
                .map(|item| item_to_json(item, state, session.is_favorite(item.id)))
                .collect(),
        ),
    );
    JsonValue::Object(out)
}

pub fn categories_to_json(categories: &[CategoryCount]) -> JsonValue {
    JsonValue::Array(
        categories
            .iter()
            .map(|entry| {
                let mut m = JsonMap::new();
                m.insert(
                    "name".to_string(),
                    JsonValue::String(entry.category.to_string()),
                );
                m.insert("count".to_string(), JsonValue::from(entry.count));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn item_to_json(item: &Item, state: &ViewState, favorite: bool) -> JsonValue {
    let amount = state.amount_for(item.id);
    let mut m = JsonMap::new();
    m.insert("id".to_string(), JsonValue::from(item.id));
    m.insert(
        "title".to_string(),
        item.title
            .as_ref()
            .map_or(JsonValue::Null, |t| JsonValue::String(t.clone())),
    );
    m.insert(
        "description".to_string(),
        item.description
            .as_ref()
            .map_or(JsonValue::Null, |d| JsonValue::String(d.clone())),
    );
    m.insert(
        "categories".to_string(),
        JsonValue::Array(
            item.categories
                .iter()
                .map(|c| JsonValue::String(c.clone()))
                .collect(),
        ),
    );
    m.insert("value".to_string(), JsonValue::from(item.value));
    m.insert(
        "stackable".to_string(),
        item.stackable.map_or(JsonValue::Null, JsonValue::from),
    );
    m.insert("favorite".to_string(), JsonValue::Bool(favorite));
    m.insert("amount".to_string(), JsonValue::from(amount));
    m.insert(
        "command".to_string(),
        JsonValue::String(ConsoleCommand::add_item(item.id, i64::from(amount)).to_string()),
    );
    JsonValue::Object(m)
}

fn fit_column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 3 {
        return value.chars().take(width).collect();
    }

    let mut out = String::with_capacity(width);
    for ch in value.chars().take(width - 3) {
        out.push(ch);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::fit_column;

    #[test]
    fn fit_column_truncates_with_ellipsis() {
        assert_eq!(fit_column("short", 10), "short");
        assert_eq!(fit_column("a long description", 9), "a long...");
        assert_eq!(fit_column("abcdef", 3), "abc");
    }
}
