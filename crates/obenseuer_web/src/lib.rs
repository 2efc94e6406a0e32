use obenseuer_core::core_api::input::parse_amount_input;
use obenseuer_core::core_api::stat_table;
use obenseuer_core::core_api::{
    CategoryFilter, ConsoleCommand, DARK_MODE_KEY, FAVORITES_KEY, ItemId, KeyValueStore,
    MemoryStore, PreferenceStore, Session, SortKey, UserPreferences, ViewAction,
};
use obenseuer_render::render_view_json;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WebViewOptions {
    pub search_term: String,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub favorites: Option<String>,
}

#[derive(Debug, Clone)]
struct WebError {
    code: &'static str,
    message: String,
}

#[derive(Debug, Clone, Serialize)]
struct WebErrorPayload {
    code: String,
    message: String,
}

impl WebError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn to_js_value(&self) -> JsValue {
        let payload = WebErrorPayload {
            code: self.code.to_string(),
            message: self.message.clone(),
        };
        serde_wasm_bindgen::to_value(&payload).unwrap_or_else(|_| {
            JsValue::from_str(&format!("{}: {}", payload.code, payload.message))
        })
    }
}

/// Filters, sorts and counts `catalog_text` for the page. Returns the
/// canonical view JSON as a string.
#[wasm_bindgen]
pub fn derive_view(catalog_text: &str, options: JsValue) -> Result<String, JsValue> {
    let parsed_options = parse_options(options).map_err(|err| err.to_js_value())?;
    derive_view_impl(catalog_text, &parsed_options).map_err(|err| err.to_js_value())
}

fn derive_view_impl(catalog_text: &str, options: &WebViewOptions) -> Result<String, WebError> {
    let mut session = Session::new(memory_store(None, options.favorites.clone()));
    session
        .load_catalog_text(catalog_text)
        .map_err(|err| WebError::new("parse_failed", err.message))?;

    session.dispatch(ViewAction::SetSearch(options.search_term.clone()));
    if let Some(category) = options.category.as_deref() {
        session.dispatch(ViewAction::SelectCategory(CategoryFilter::from_name(category)));
    }
    if let Some(sort) = options.sort.as_deref() {
        session.dispatch(ViewAction::SetSortKey(SortKey::parse(sort)));
    }

    serde_json::to_string(&render_view_json(&session)).map_err(|err| {
        WebError::new(
            "render_failed",
            format!("failed to serialize view JSON: {err}"),
        )
    })
}

/// Decodes the raw local-storage values into preferences.
#[wasm_bindgen]
pub fn load_preferences(
    dark_mode: Option<String>,
    favorites: Option<String>,
) -> Result<JsValue, JsValue> {
    let prefs = load_preferences_impl(dark_mode, favorites);
    serde_wasm_bindgen::to_value(&prefs).map_err(|err| {
        WebError::new("render_failed", format!("failed to encode preferences: {err}"))
            .to_js_value()
    })
}

fn load_preferences_impl(dark_mode: Option<String>, favorites: Option<String>) -> UserPreferences {
    preference_store(dark_mode, favorites).load_preferences()
}

/// Returns the new `favorites` value to write back to local storage.
#[wasm_bindgen]
pub fn toggle_favorite(favorites: Option<String>, id: f64) -> Result<String, JsValue> {
    item_id_from_js(id)
        .and_then(|id| toggle_favorite_impl(favorites, id))
        .map_err(|err| err.to_js_value())
}

fn toggle_favorite_impl(favorites: Option<String>, id: ItemId) -> Result<String, WebError> {
    let mut store = preference_store(None, favorites);
    store
        .toggle_favorite(id)
        .map_err(|err| WebError::new("storage_failed", err.message))?;
    Ok(store
        .store()
        .get(FAVORITES_KEY)
        .ok()
        .flatten()
        .unwrap_or_else(|| "[]".to_string()))
}

#[wasm_bindgen]
pub fn item_command(id: f64, amount: &str) -> Result<String, JsValue> {
    item_id_from_js(id)
        .and_then(|id| item_command_impl(id, amount))
        .map_err(|err| err.to_js_value())
}

fn item_command_impl(id: ItemId, amount: &str) -> Result<String, WebError> {
    let amount = parse_amount_input(amount).ok_or_else(|| {
        WebError::new(
            "invalid_amount",
            format!("Invalid amount '{amount}'. Expected a whole number of at least 1"),
        )
    })?;
    Ok(ConsoleCommand::add_item(id, i64::from(amount)).to_string())
}

#[wasm_bindgen]
pub fn stat_command(stat: &str, value: i32) -> Result<String, JsValue> {
    stat_command_impl(stat, i64::from(value)).map_err(|err| err.to_js_value())
}

fn stat_command_impl(stat: &str, value: i64) -> Result<String, WebError> {
    ConsoleCommand::player_stat(stat, value)
        .map(|command| command.to_string())
        .map_err(|err| WebError::new("unknown_stat", err.message))
}

/// The stat picker table, grouped as the console panel shows it.
#[wasm_bindgen]
pub fn player_stats() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(stat_table::all()).map_err(|err| {
        WebError::new("render_failed", format!("failed to encode stats: {err}")).to_js_value()
    })
}

/// Largest integer a JS number holds exactly (`Number.MAX_SAFE_INTEGER`).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn item_id_from_js(id: f64) -> Result<ItemId, WebError> {
    if id.fract() != 0.0 || id.abs() > MAX_SAFE_INTEGER {
        return Err(WebError::new(
            "invalid_id",
            format!("Invalid item id {id}. Expected a whole number"),
        ));
    }
    Ok(id as ItemId)
}

/// Local-storage values as handed over by the page; `None` means unset.
fn memory_store(dark_mode: Option<String>, favorites: Option<String>) -> MemoryStore {
    [(DARK_MODE_KEY, dark_mode), (FAVORITES_KEY, favorites)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
}

fn preference_store(
    dark_mode: Option<String>,
    favorites: Option<String>,
) -> PreferenceStore<MemoryStore> {
    PreferenceStore::new(memory_store(dark_mode, favorites))
}

fn parse_options(options: JsValue) -> Result<WebViewOptions, WebError> {
    if options.is_null() || options.is_undefined() {
        return Ok(WebViewOptions::default());
    }

    serde_wasm_bindgen::from_value(options).map_err(|err| {
        WebError::new(
            "invalid_options",
            format!("Failed to parse view options: {err}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::{
        WebViewOptions, derive_view_impl, item_command_impl, item_id_from_js,
        load_preferences_impl, stat_command_impl, toggle_favorite_impl,
    };

    #[test]
    fn derive_view_impl_filters_fixture() {
        let text = fixture_text("tests/fixtures/items.json");
        let options = WebViewOptions {
            search_term: "a".to_string(),
            category: Some("Food".to_string()),
            sort: Some("title".to_string()),
            favorites: Some("[7]".to_string()),
        };
        let rendered = derive_view_impl(&text, &options).expect("fixture should derive");

        let parsed: serde_json::Value =
            serde_json::from_str(&rendered).expect("view output should parse");
        assert_eq!(parsed["category"], "Food");
        assert_eq!(parsed["items"][0]["title"], "apple");
        assert_eq!(parsed["items"][0]["favorite"], true);
        assert_eq!(parsed["favorites"][0]["id"], 7);
    }

    #[test]
    fn derive_view_impl_rejects_malformed_catalog() {
        let err = derive_view_impl("not json", &WebViewOptions::default())
            .expect_err("malformed catalog should fail");
        assert_eq!(err.code, "parse_failed");
    }

    #[test]
    fn load_preferences_impl_defaults_and_recovers() {
        let prefs = load_preferences_impl(None, None);
        assert!(prefs.dark_mode);
        assert!(prefs.favorite_ids.is_empty());

        let prefs = load_preferences_impl(Some("false".into()), Some("oops".into()));
        assert!(!prefs.dark_mode);
        assert!(prefs.favorite_ids.is_empty());
    }

    #[test]
    fn toggle_favorite_impl_returns_storage_text() {
        let added = toggle_favorite_impl(None, 5).expect("toggle should work");
        assert_eq!(added, "[5]");
        let removed = toggle_favorite_impl(Some(added), 5).expect("toggle should work");
        assert_eq!(removed, "[]");
    }

    #[test]
    fn command_impls_format_and_validate() {
        assert_eq!(
            item_command_impl(42, "10").expect("valid amount"),
            "add_item 42 10"
        );
        assert_eq!(
            item_command_impl(42, "0").expect_err("zero amount").code,
            "invalid_amount"
        );
        assert_eq!(
            stat_command_impl("health", 100).expect("known stat"),
            "player_stats health set 100"
        );
        assert_eq!(
            stat_command_impl("mana", 1).expect_err("unknown stat").code,
            "unknown_stat"
        );
    }

    #[test]
    fn item_ids_from_js_keep_full_range() {
        assert_eq!(item_id_from_js(42.0).expect("whole id"), 42);
        assert_eq!(
            item_id_from_js(4_294_967_296.0).expect("id above i32"),
            4_294_967_296
        );
        assert_eq!(item_id_from_js(-7.0).expect("negative id"), -7);
        assert_eq!(item_id_from_js(1.5).expect_err("fraction").code, "invalid_id");
        assert_eq!(item_id_from_js(f64::NAN).expect_err("nan").code, "invalid_id");
        assert_eq!(
            item_id_from_js(f64::INFINITY).expect_err("infinite").code,
            "invalid_id"
        );
        assert_eq!(
            item_command_impl(4_294_967_296, "2").expect("large id formats"),
            "add_item 4294967296 2"
        );
    }

    fn fixture_text(relative_path: &str) -> String {
        let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../..")
            .join(relative_path);
        fs::read_to_string(full_path).expect("fixture should be readable")
    }
}
