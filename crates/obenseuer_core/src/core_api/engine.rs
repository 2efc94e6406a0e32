use std::path::Path;
use std::time::Instant;

use tracing::info;

use super::catalog::Catalog;
use super::clipboard::{Clipboard, copy_with_fallback};
use super::commands::ConsoleCommand;
use super::error::CoreError;
use super::pipeline::{DerivedView, derive_view, favorite_items};
use super::preferences::{KeyValueStore, PreferenceStore};
use super::types::{Item, ItemId, UserPreferences};
use super::view::{CopyTarget, ViewAction, ViewState, reduce};

/// One viewer: the loaded catalog, its view state and the user's stored
/// preferences.
#[derive(Debug)]
pub struct Session<S> {
    catalog: Catalog,
    view: ViewState,
    store: PreferenceStore<S>,
    preferences: UserPreferences,
}

impl<S: KeyValueStore> Session<S> {
    /// Starts with an empty catalog and whatever preferences `store` holds.
    pub fn new(store: S) -> Self {
        let store = PreferenceStore::new(store);
        let preferences = store.load_preferences();
        Self {
            catalog: Catalog::default(),
            view: ViewState::default(),
            store,
            preferences,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn preference_store(&self) -> &PreferenceStore<S> {
        &self.store
    }

    /// Parses `text` and installs it. On error nothing changes.
    pub fn load_catalog_text(&mut self, text: &str) -> Result<usize, CoreError> {
        let catalog = Catalog::parse(text)?;
        Ok(self.replace_catalog(catalog))
    }

    pub fn load_catalog_file(&mut self, path: &Path) -> Result<usize, CoreError> {
        let catalog = Catalog::load_file(path)?;
        Ok(self.replace_catalog(catalog))
    }

    pub fn replace_catalog(&mut self, catalog: Catalog) -> usize {
        self.catalog = catalog;
        self.dispatch(ViewAction::CatalogReplaced);
        info!(items = self.catalog.len(), "installed item catalog");
        self.catalog.len()
    }

    pub fn dispatch(&mut self, action: ViewAction) {
        self.view = reduce(&self.view, action);
    }

    pub fn view(&self) -> DerivedView<'_> {
        derive_view(&self.catalog, &self.view)
    }

    pub fn favorite_items(&self) -> Vec<&Item> {
        favorite_items(&self.catalog, &self.preferences.favorite_ids)
    }

    pub fn is_favorite(&self, id: ItemId) -> bool {
        self.preferences.favorite_ids.contains(id)
    }

    /// Returns whether `id` is a favorite after the toggle.
    pub fn toggle_favorite(&mut self, id: ItemId) -> Result<bool, CoreError> {
        self.preferences.favorite_ids = self.store.toggle_favorite(id)?;
        Ok(self.is_favorite(id))
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) -> Result<(), CoreError> {
        self.store.save_dark_mode(dark_mode)?;
        self.preferences.dark_mode = dark_mode;
        Ok(())
    }

    pub fn toggle_dark_mode(&mut self) -> Result<bool, CoreError> {
        let dark_mode = !self.preferences.dark_mode;
        self.set_dark_mode(dark_mode)?;
        Ok(dark_mode)
    }

    /// `add_item` for `id` with the amount currently entered for it.
    pub fn item_command(&self, id: ItemId) -> ConsoleCommand {
        ConsoleCommand::add_item(id, i64::from(self.view.amount_for(id)))
    }

    /// `player_stats` for the stat and value picked in the console panel.
    pub fn stat_command(&self) -> Result<ConsoleCommand, CoreError> {
        ConsoleCommand::player_stat(&self.view.selected_stat, self.view.stat_value)
    }

    /// Copies `command` and marks `target` as copied at `now`. The marker is
    /// only set when the copy succeeded.
    pub fn copy_command<P, F>(
        &mut self,
        command: &ConsoleCommand,
        target: CopyTarget,
        primary: &mut P,
        fallback: &mut F,
        now: Instant,
    ) -> Result<String, CoreError>
    where
        P: Clipboard + ?Sized,
        F: Clipboard + ?Sized,
    {
        let text = command.to_string();
        copy_with_fallback(primary, fallback, &text)?;
        self.dispatch(ViewAction::MarkCopied { target, at: now });
        Ok(text)
    }

    pub fn into_store(self) -> S {
        self.store.into_inner()
    }
}
