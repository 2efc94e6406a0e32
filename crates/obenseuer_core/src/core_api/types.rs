use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub type ItemId = i64;

/// One spawnable game object as it appears in a catalog file.
///
/// Field names follow the catalog export (`ID`, `Title`, ...). Unknown fields
/// are ignored. `ID` must be unique within a catalog; duplicates are not
/// detected and make favorite/amount lookups ambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "ID")]
    pub id: ItemId,
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "Categories",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub categories: Vec<String>,
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "Stackable", default, skip_serializing_if = "Option::is_none")]
    pub stackable: Option<f64>,
}

impl Item {
    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Id,
    Title,
    /// Keeps catalog order. Any unrecognized sort name maps here.
    CatalogOrder,
}

impl SortKey {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "id" => Self::Id,
            "title" => Self::Title,
            _ => Self::CatalogOrder,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::CatalogOrder => "catalog_order",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn from_name(name: &str) -> Self {
        if name == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(name) => name,
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => item.has_category(name),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Favorite item ids in the order they were added. Never holds duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ItemId>", into = "Vec<ItemId>")]
pub struct FavoriteIds(Vec<ItemId>);

impl FavoriteIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.0.contains(&id)
    }

    /// Removes `id` if present, appends it otherwise. Returns whether `id` is
    /// a favorite afterwards.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if let Some(pos) = self.0.iter().position(|&fav| fav == id) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(id);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[ItemId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ItemId>> for FavoriteIds {
    fn from(ids: Vec<ItemId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<FavoriteIds> for Vec<ItemId> {
    fn from(value: FavoriteIds) -> Self {
        value.0
    }
}

impl FromIterator<ItemId> for FavoriteIds {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        let mut out = Vec::new();
        for id in iter {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        Self(out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub dark_mode: bool,
    pub favorite_ids: FavoriteIds,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            favorite_ids: FavoriteIds::new(),
        }
    }
}
