use std::fs;
use std::path::Path;

use tracing::debug;

use super::error::{CoreError, CoreErrorCode};
use super::types::{Item, ItemId};

/// The item list currently loaded into a viewer. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Parses a catalog export: a JSON array of item records.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let items: Vec<Item> = serde_json::from_str(text).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Parse,
                format!("failed to parse item catalog: {e}"),
            )
        })?;
        debug!(items = items.len(), "parsed item catalog");
        Ok(Self { items })
    }

    pub fn load_file(path: &Path) -> Result<Self, CoreError> {
        let text = fs::read_to_string(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;
        Self::parse(&text).map_err(|e| {
            CoreError::new(e.code, format!("{}: {}", path.display(), e.message))
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item carrying `id`.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_applies_optional_defaults() {
        let catalog = Catalog::parse(
            r#"[
                {"ID": 1, "Title": "Beer", "Description": "Cold", "Categories": ["Drink"], "Value": 3, "Stackable": 20},
                {"ID": 2, "Value": 0.5, "Extra": {"ignored": true}},
                {"ID": 3, "Title": "Rock", "Categories": null, "Value": 0}
            ]"#,
        )
        .expect("catalog should parse");

        assert_eq!(catalog.len(), 3);
        let beer = catalog.get(1).expect("beer present");
        assert_eq!(beer.title.as_deref(), Some("Beer"));
        assert_eq!(beer.stackable, Some(20.0));

        let untitled = catalog.get(2).expect("untitled present");
        assert_eq!(untitled.title, None);
        assert!(untitled.categories.is_empty());
        assert_eq!(untitled.description, None);

        assert!(catalog.get(3).expect("rock present").categories.is_empty());
    }

    #[test]
    fn parse_rejects_malformed_text() {
        let err = Catalog::parse("[{\"ID\": 1,").expect_err("truncated json should fail");
        assert_eq!(err.code, CoreErrorCode::Parse);

        let err = Catalog::parse("{\"ID\": 1}").expect_err("object is not a catalog");
        assert_eq!(err.code, CoreErrorCode::Parse);

        let err = Catalog::parse(r#"[{"Title": "No id", "Value": 1}]"#)
            .expect_err("ID is required");
        assert_eq!(err.code, CoreErrorCode::Parse);
    }

    #[test]
    fn field_names_are_case_sensitive() {
        let err = Catalog::parse(r#"[{"id": 1, "Value": 1}]"#).expect_err("lowercase id");
        assert_eq!(err.code, CoreErrorCode::Parse);
    }
}
