use api_types::{
    category::{Category, CategoryKind},
    transaction::Transaction,
    wallet::Wallet,
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use finance_client::{
    Resource,
    forms::{CategoryForm, Form, Picker, TransactionForm, WalletForm},
    list::{SearchFilter, TransactionFilters},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Space flips between two values.
    Toggle,
    Picker,
}

/// Terminal editing surface of a modal form.
pub trait FormFields: Form {
    const TITLE_ADD: &'static str;
    const TITLE_EDIT: &'static str;
    const LABELS: &'static [&'static str];
    /// Whether opening the modal needs wallet and category options.
    const NEEDS_OPTIONS: bool = false;

    fn blank(tz: Tz) -> Self;
    fn seeded(item: &<Self::Resource as Resource>::Item, tz: Tz) -> Self;

    fn kind(_index: usize) -> FieldKind {
        FieldKind::Text
    }

    fn text_mut(&mut self, index: usize) -> Option<&mut String>;

    /// Value shown next to the label.
    fn display(&self, index: usize) -> String;

    fn toggle(&mut self, _index: usize) {}

    fn picker(&self, _index: usize) -> Option<&Picker> {
        None
    }

    fn picker_mut(&mut self, _index: usize) -> Option<&mut Picker> {
        None
    }

    fn set_options(&mut self, _wallets: &[Wallet], _categories: &[Category]) {}
}

impl FormFields for WalletForm {
    const TITLE_ADD: &'static str = "Thêm ví";
    const TITLE_EDIT: &'static str = "Sửa ví";
    const LABELS: &'static [&'static str] = &["Tên ví", "Biểu tượng", "Tiền tệ"];

    fn blank(_tz: Tz) -> Self {
        Self::default()
    }

    fn seeded(item: &Wallet, _tz: Tz) -> Self {
        Self::from_wallet(item)
    }

    fn text_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.icon),
            2 => Some(&mut self.currency),
            _ => None,
        }
    }

    fn display(&self, index: usize) -> String {
        match index {
            0 => self.name.clone(),
            1 => self.icon.clone(),
            2 => self.currency.clone(),
            _ => String::new(),
        }
    }
}

pub fn kind_label(kind: CategoryKind) -> &'static str {
    match kind {
        CategoryKind::Expense => "Chi tiêu",
        CategoryKind::Income => "Thu nhập",
    }
}

impl FormFields for CategoryForm {
    const TITLE_ADD: &'static str = "Thêm danh mục";
    const TITLE_EDIT: &'static str = "Sửa danh mục";
    const LABELS: &'static [&'static str] = &["Tên danh mục", "Biểu tượng", "Loại"];

    fn blank(_tz: Tz) -> Self {
        Self::default()
    }

    fn seeded(item: &Category, _tz: Tz) -> Self {
        Self::from_category(item)
    }

    fn kind(index: usize) -> FieldKind {
        if index == 2 {
            FieldKind::Toggle
        } else {
            FieldKind::Text
        }
    }

    fn text_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.icon),
            _ => None,
        }
    }

    fn display(&self, index: usize) -> String {
        match index {
            0 => self.name.clone(),
            1 => self.icon.clone(),
            2 => kind_label(self.kind).to_string(),
            _ => String::new(),
        }
    }

    fn toggle(&mut self, index: usize) {
        if index == 2 {
            self.toggle_kind();
        }
    }
}

impl FormFields for TransactionForm {
    const TITLE_ADD: &'static str = "Thêm giao dịch";
    const TITLE_EDIT: &'static str = "Sửa giao dịch";
    const LABELS: &'static [&'static str] =
        &["Ví", "Danh mục", "Số tiền", "Ghi chú", "Thời gian"];
    const NEEDS_OPTIONS: bool = true;

    fn blank(tz: Tz) -> Self {
        Self::new(tz)
    }

    fn seeded(item: &Transaction, tz: Tz) -> Self {
        Self::from_transaction(item, tz)
    }

    fn kind(index: usize) -> FieldKind {
        if index < 2 {
            FieldKind::Picker
        } else {
            FieldKind::Text
        }
    }

    fn text_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            2 => Some(&mut self.amount),
            3 => Some(&mut self.note),
            4 => Some(&mut self.occurred_at),
            _ => None,
        }
    }

    fn display(&self, index: usize) -> String {
        match index {
            0 | 1 => self.picker(index).map(picker_display).unwrap_or_default(),
            2 => self.amount.clone(),
            3 => self.note.clone(),
            4 => self.occurred_at.clone(),
            _ => String::new(),
        }
    }

    fn picker(&self, index: usize) -> Option<&Picker> {
        match index {
            0 => Some(&self.wallet),
            1 => Some(&self.category),
            _ => None,
        }
    }

    fn picker_mut(&mut self, index: usize) -> Option<&mut Picker> {
        match index {
            0 => Some(&mut self.wallet),
            1 => Some(&mut self.category),
            _ => None,
        }
    }

    fn set_options(&mut self, wallets: &[Wallet], categories: &[Category]) {
        self.set_wallets(wallets);
        self.set_categories(categories);
    }
}

fn picker_display(picker: &Picker) -> String {
    if !picker.query().is_empty() {
        return format!("🔍 {}", picker.query());
    }
    picker
        .selected()
        .map(|option| option.label.clone())
        .unwrap_or_else(|| "(chưa chọn)".to_string())
}

/// Filter inputs typed on a list screen.
pub trait FilterDraft: Default + std::fmt::Debug {
    type Filters;
    const LABELS: &'static [&'static str];

    fn field(&self, index: usize) -> &str;
    fn field_mut(&mut self, index: usize) -> Option<&mut String>;
    fn to_filters(&self) -> Self::Filters;
}

#[derive(Debug, Default)]
pub struct SearchDraft {
    pub search: String,
}

impl FilterDraft for SearchDraft {
    type Filters = SearchFilter;
    const LABELS: &'static [&'static str] = &["Tìm kiếm"];

    fn field(&self, _index: usize) -> &str {
        &self.search
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        (index == 0).then_some(&mut self.search)
    }

    fn to_filters(&self) -> SearchFilter {
        SearchFilter {
            search: self.search.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct TransactionFilterDraft {
    pub search: String,
    pub wallet: String,
    pub category: String,
    /// `YYYY-MM-DD`; ignored until it parses.
    pub start_date: String,
    pub end_date: String,
    pub note: String,
}

impl FilterDraft for TransactionFilterDraft {
    type Filters = TransactionFilters;
    const LABELS: &'static [&'static str] =
        &["Tìm kiếm", "Ví", "Danh mục", "Từ ngày", "Đến ngày", "Ghi chú"];

    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.search,
            1 => &self.wallet,
            2 => &self.category,
            3 => &self.start_date,
            4 => &self.end_date,
            _ => &self.note,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.search),
            1 => Some(&mut self.wallet),
            2 => Some(&mut self.category),
            3 => Some(&mut self.start_date),
            4 => Some(&mut self.end_date),
            5 => Some(&mut self.note),
            _ => None,
        }
    }

    fn to_filters(&self) -> TransactionFilters {
        TransactionFilters {
            search: self.search.clone(),
            wallet: self.wallet.clone(),
            category: self.category.clone(),
            start_date: parse_date(&self.start_date),
            end_date: parse_date(&self.end_date),
            note: self.note.clone(),
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_dates_are_not_sent() {
        let draft = TransactionFilterDraft {
            start_date: "2025-03".to_string(),
            end_date: "2025-03-31".to_string(),
            ..TransactionFilterDraft::default()
        };
        let filters = draft.to_filters();
        assert_eq!(filters.start_date, None);
        assert_eq!(filters.end_date, NaiveDate::from_ymd_opt(2025, 3, 31));
    }

    #[test]
    fn category_kind_field_toggles() {
        let mut form = CategoryForm::blank(chrono_tz::UTC);
        assert_eq!(form.display(2), "Chi tiêu");
        form.toggle(2);
        assert_eq!(form.display(2), "Thu nhập");
        assert!(form.text_mut(2).is_none());
    }

    #[test]
    fn unselected_picker_shows_placeholder() {
        let form = TransactionForm::blank(chrono_tz::UTC);
        assert_eq!(form.display(0), "(chưa chọn)");
        assert_eq!(TransactionForm::kind(1), FieldKind::Picker);
        assert_eq!(TransactionForm::kind(2), FieldKind::Text);
    }
}
