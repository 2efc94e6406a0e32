use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::stat_table::{DEFAULT_STAT, DEFAULT_STAT_VALUE};
use super::types::{CategoryFilter, ItemId, SortKey};

/// How long a "Copied!" marker stays visible after a successful copy.
pub const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

pub const DEFAULT_AMOUNT: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Item(ItemId),
    ConsolePanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyFeedback {
    pub target: CopyTarget,
    pub at: Instant,
}

impl CopyFeedback {
    pub fn is_active(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.at) < COPIED_FEEDBACK
    }
}

/// Transient, never persisted, filter/sort/input state of one viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    pub selected_category: CategoryFilter,
    pub sort_key: SortKey,
    amounts: BTreeMap<ItemId, u32>,
    pub selected_stat: String,
    pub stat_value: i64,
    pub copied: Option<CopyFeedback>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selected_category: CategoryFilter::All,
            sort_key: SortKey::Id,
            amounts: BTreeMap::new(),
            selected_stat: DEFAULT_STAT.to_string(),
            stat_value: DEFAULT_STAT_VALUE,
            copied: None,
        }
    }
}

impl ViewState {
    pub fn amount_for(&self, id: ItemId) -> u32 {
        self.amounts.get(&id).copied().unwrap_or(DEFAULT_AMOUNT)
    }

    pub fn is_copied(&self, target: CopyTarget, now: Instant) -> bool {
        self.copied
            .is_some_and(|feedback| feedback.target == target && feedback.is_active(now))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    SetSearch(String),
    SelectCategory(CategoryFilter),
    /// A category chip on an item card was clicked.
    ToggleCategoryChip(String),
    SetSortKey(SortKey),
    SetAmount { id: ItemId, amount: u32 },
    SelectStat(String),
    SetStatValue(i64),
    CatalogReplaced,
    MarkCopied { target: CopyTarget, at: Instant },
    ExpireCopied { now: Instant },
}

pub fn reduce(state: &ViewState, action: ViewAction) -> ViewState {
    let mut next = state.clone();
    match action {
        ViewAction::SetSearch(term) => next.search_term = term,
        ViewAction::SelectCategory(filter) => next.selected_category = filter,
        ViewAction::ToggleCategoryChip(name) => {
            next.selected_category = match &state.selected_category {
                CategoryFilter::Named(current) if *current == name => CategoryFilter::All,
                _ => CategoryFilter::Named(name),
            };
        }
        ViewAction::SetSortKey(key) => next.sort_key = key,
        ViewAction::SetAmount { id, amount } => {
            if amount >= DEFAULT_AMOUNT {
                next.amounts.insert(id, amount);
            }
        }
        ViewAction::SelectStat(stat) => next.selected_stat = stat,
        ViewAction::SetStatValue(value) => next.stat_value = value,
        ViewAction::CatalogReplaced => next.selected_category = CategoryFilter::All,
        ViewAction::MarkCopied { target, at } => next.copied = Some(CopyFeedback { target, at }),
        ViewAction::ExpireCopied { now } => {
            if next.copied.is_some_and(|feedback| !feedback.is_active(now)) {
                next.copied = None;
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_chip_toggles_back_to_all() {
        let state = ViewState::default();
        let state = reduce(&state, ViewAction::ToggleCategoryChip("Food".into()));
        assert_eq!(
            state.selected_category,
            CategoryFilter::Named("Food".to_string())
        );

        let state = reduce(&state, ViewAction::ToggleCategoryChip("Tools".into()));
        assert_eq!(
            state.selected_category,
            CategoryFilter::Named("Tools".to_string())
        );

        let state = reduce(&state, ViewAction::ToggleCategoryChip("Tools".into()));
        assert_eq!(state.selected_category, CategoryFilter::All);
    }

    #[test]
    fn amounts_below_one_are_ignored() {
        let state = reduce(
            &ViewState::default(),
            ViewAction::SetAmount { id: 7, amount: 50 },
        );
        assert_eq!(state.amount_for(7), 50);
        assert_eq!(state.amount_for(8), DEFAULT_AMOUNT);

        let state = reduce(&state, ViewAction::SetAmount { id: 7, amount: 0 });
        assert_eq!(state.amount_for(7), 50);
    }

    #[test]
    fn catalog_replacement_only_resets_category() {
        let mut state = ViewState::default();
        for action in [
            ViewAction::SetSearch("stim".into()),
            ViewAction::SelectCategory(CategoryFilter::Named("Drugs".into())),
            ViewAction::SetSortKey(SortKey::Title),
            ViewAction::SetAmount { id: 3, amount: 10 },
        ] {
            state = reduce(&state, action);
        }

        let next = reduce(&state, ViewAction::CatalogReplaced);
        assert_eq!(next.selected_category, CategoryFilter::All);
        assert_eq!(next.search_term, "stim");
        assert_eq!(next.sort_key, SortKey::Title);
        assert_eq!(next.amount_for(3), 10);
    }

    #[test]
    fn copied_feedback_expires_after_delay() {
        let start = Instant::now();
        let state = reduce(
            &ViewState::default(),
            ViewAction::MarkCopied {
                target: CopyTarget::Item(4),
                at: start,
            },
        );
        assert!(state.is_copied(CopyTarget::Item(4), start));
        assert!(!state.is_copied(CopyTarget::Item(5), start));
        assert!(!state.is_copied(CopyTarget::ConsolePanel, start));

        let early = reduce(
            &state,
            ViewAction::ExpireCopied {
                now: start + Duration::from_millis(500),
            },
        );
        assert!(early.copied.is_some());

        let later = start + COPIED_FEEDBACK;
        assert!(!state.is_copied(CopyTarget::Item(4), later));
        let expired = reduce(&state, ViewAction::ExpireCopied { now: later });
        assert_eq!(expired.copied, None);
    }

    #[test]
    fn defaults_match_console_panel() {
        let state = ViewState::default();
        assert_eq!(state.selected_stat, "health");
        assert_eq!(state.stat_value, 100);
        assert_eq!(state.sort_key, SortKey::Id);
    }
}
