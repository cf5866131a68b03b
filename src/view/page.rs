use std::collections::HashSet;

use crate::types::DisplayItem;

/// Ids of the items a user picked on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.ids = ids.into_iter().map(str::to_string).collect();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Items listed on a page together with their selection.
#[derive(Debug, Clone, Default)]
pub struct ItemPage {
    items: Vec<DisplayItem>,
    selection: SelectionSet,
}

impl ItemPage {
    pub fn new(items: Vec<DisplayItem>) -> Self {
        Self {
            items,
            selection: SelectionSet::new(),
        }
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Replaces the listed items; the selection is cleared.
    pub fn replace_items(&mut self, items: Vec<DisplayItem>) {
        self.items = items;
        self.selection.clear();
    }

    /// Drops items and selection.
    pub fn reset(&mut self) {
        self.replace_items(Vec::new());
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_all(&mut self) {
        self.selection
            .select_all(self.items.iter().map(|i| i.id.as_str()));
    }

    /// Whether every listed item is selected.
    pub fn all_selected(&self) -> bool {
        self.items.iter().all(|i| self.selection.is_selected(&i.id))
    }

    /// Selects the items at the given 1-based ranks.
    ///
    /// Ranks past the end of the list are returned unchanged and nothing is
    /// selected for them.
    pub fn select_ranks(&mut self, ranks: &[usize]) -> Vec<usize> {
        let mut out_of_range = Vec::new();
        for &rank in ranks {
            match rank.checked_sub(1).and_then(|i| self.items.get(i)) {
                Some(item) => {
                    if !self.selection.is_selected(&item.id) {
                        self.selection.toggle(&item.id);
                    }
                }
                None => out_of_range.push(rank),
            }
        }
        out_of_range
    }

    /// Selected items in list order.
    pub fn selected_items(&self) -> Vec<&DisplayItem> {
        self.items
            .iter()
            .filter(|i| self.selection.is_selected(&i.id))
            .collect()
    }
}
