mod catalog;
pub mod clipboard;
mod commands;
mod engine;
mod error;
pub mod input;
mod pipeline;
mod preferences;
pub mod stat_table;
mod types;
mod view;

pub use catalog::Catalog;
pub use clipboard::{Clipboard, RecordingClipboard, copy_with_fallback};
pub use commands::{
    ConsoleCommand, GOD_MODE_COMMAND, NOCLIP_COMMAND, format_item_command, format_stat_command,
};
pub use engine::Session;
pub use error::{CoreError, CoreErrorCode};
pub use pipeline::{
    CategoryCount, DerivedView, category_counts, compare_titles, derive_view, derive_view_with,
    favorite_items,
};
pub use preferences::{
    DARK_MODE_KEY, FAVORITES_KEY, JsonFileStore, KeyValueStore, MemoryStore, PreferenceStore,
};
pub use types::{
    ALL_CATEGORIES, CategoryFilter, FavoriteIds, Item, ItemId, SortKey, UserPreferences,
};
pub use view::{
    COPIED_FEEDBACK, CopyFeedback, CopyTarget, DEFAULT_AMOUNT, ViewAction, ViewState, reduce,
};
