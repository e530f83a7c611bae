use api_types::{category::Category, wallet::Wallet};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickerOption {
    pub id: Uuid,
    pub label: String,
    /// Secondary text, e.g. a wallet's currency.
    pub detail: String,
}

impl From<&Wallet> for PickerOption {
    fn from(wallet: &Wallet) -> Self {
        Self {
            id: wallet.id,
            label: wallet.name.clone(),
            detail: wallet.currency.clone(),
        }
    }
}

impl From<&Category> for PickerOption {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            label: category.name.clone(),
            detail: String::new(),
        }
    }
}

/// Searchable single-choice select.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Picker {
    options: Vec<PickerOption>,
    query: String,
    cursor: usize,
    selected: Option<Uuid>,
}

impl Picker {
    /// Replaces the options, keeping the selection if it is still offered.
    pub fn set_options(&mut self, options: Vec<PickerOption>) {
        self.options = options;
        if let Some(id) = self.selected
            && !self.options.iter().any(|option| option.id == id)
        {
            self.selected = None;
        }
        self.cursor = 0;
    }

    pub fn options(&self) -> &[PickerOption] {
        &self.options
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.cursor = 0;
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
        self.cursor = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.cursor = 0;
    }

    /// Options whose label contains the query, case-insensitively.
    pub fn filtered(&self) -> Vec<&PickerOption> {
        let needle = self.query.trim().to_lowercase();
        self.options
            .iter()
            .filter(|option| needle.is_empty() || option.label.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, down: bool) {
        let len = self.filtered().len();
        if len == 0 {
            self.cursor = 0;
        } else if down {
            self.cursor = (self.cursor + 1).min(len - 1);
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    /// Selects the option under the cursor and clears the query.
    pub fn choose(&mut self) -> bool {
        let Some(id) = self.filtered().get(self.cursor).map(|option| option.id) else {
            return false;
        };
        self.selected = Some(id);
        self.query.clear();
        self.cursor = 0;
        true
    }

    pub fn select_id(&mut self, id: Uuid) -> bool {
        let found = self.options.iter().any(|option| option.id == id);
        if found {
            self.selected = Some(id);
        }
        found
    }

    /// Selects the first option with exactly this label.
    pub fn select_by_label(&mut self, label: &str) -> bool {
        match self.options.iter().find(|option| option.label == label) {
            Some(option) => {
                self.selected = Some(option.id);
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&PickerOption> {
        let id = self.selected?;
        self.options.iter().find(|option| option.id == id)
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected().map(|option| option.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: u128, label: &str) -> PickerOption {
        PickerOption {
            id: Uuid::from_u128(id),
            label: label.to_string(),
            detail: String::new(),
        }
    }

    fn picker() -> Picker {
        let mut picker = Picker::default();
        picker.set_options(vec![
            option(1, "Tiền mặt"),
            option(2, "Techcombank"),
            option(3, "Ví MoMo"),
        ]);
        picker
    }

    #[test]
    fn filters_case_insensitively() {
        let mut picker = picker();
        picker.set_query("TI");
        let labels: Vec<&str> = picker.filtered().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Tiền mặt"]);

        picker.set_query("mo");
        assert_eq!(picker.filtered().len(), 1);
        picker.set_query("");
        assert_eq!(picker.filtered().len(), 3);
    }

    #[test]
    fn choose_selects_under_cursor() {
        let mut picker = picker();
        picker.set_query("e");
        picker.move_cursor(true);
        assert!(picker.choose());
        assert_eq!(picker.selected_id(), Some(Uuid::from_u128(2)));
        assert_eq!(picker.query(), "");

        picker.set_query("zzz");
        assert!(!picker.choose());
        assert_eq!(picker.selected_id(), Some(Uuid::from_u128(2)));
    }

    #[test]
    fn selection_survives_option_reload_only_if_present() {
        let mut picker = picker();
        assert!(picker.select_by_label("Ví MoMo"));
        picker.set_options(vec![option(3, "Ví MoMo")]);
        assert_eq!(picker.selected_id(), Some(Uuid::from_u128(3)));
        picker.set_options(vec![option(1, "Tiền mặt")]);
        assert_eq!(picker.selected_id(), None);
    }
}
