use std::collections::BTreeSet;

/// Tri-state value of a checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    Checked,
    Indeterminate,
}

/// Display ids the operator has checked.
///
/// Ids are not reconciled against later pages: an id selected on one page stays
/// in the set until it is toggled off, cleared, or its task is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the set with exactly `page_ids`.
    pub fn select_all<I, S>(&mut self, page_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = page_ids.into_iter().map(Into::into).collect();
    }

    pub fn clear_all(&mut self) {
        self.ids.clear();
    }

    /// Adds or removes one id; other members are untouched.
    pub fn toggle(&mut self, id: &str, checked: bool) {
        if checked {
            self.ids.insert(id.to_owned());
        } else {
            self.ids.remove(id);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Header checkbox state for the rendered page. Ids selected on other
    /// pages do not count.
    pub fn header_state<'a>(&self, page_ids: impl IntoIterator<Item = &'a str>) -> CheckState {
        let (mut on_page, mut selected) = (0usize, 0usize);
        for id in page_ids {
            on_page += 1;
            if self.ids.contains(id) {
                selected += 1;
            }
        }
        if selected == 0 {
            CheckState::Unchecked
        } else if selected == on_page {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        }
    }
}
