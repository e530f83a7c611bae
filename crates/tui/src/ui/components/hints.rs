use finance_client::routes::Route;
use ratatui::{style::Style, text::Span};

use crate::{
    app::{AppState, Focus},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

const LIST: [KeyHint; 7] = [
    KeyHint::new("↑↓", "chọn"),
    KeyHint::new("←→", "trang"),
    KeyHint::new("s", "số dòng"),
    KeyHint::new("/", "lọc"),
    KeyHint::new("a", "thêm"),
    KeyHint::new("e", "sửa"),
    KeyHint::new("d", "xoá"),
];

const FILTER: [KeyHint; 3] = [
    KeyHint::new("Tab", "ô kế"),
    KeyHint::new("Enter", "áp dụng"),
    KeyHint::new("Esc", "đóng"),
];

const MODAL: [KeyHint; 4] = [
    KeyHint::new("Tab", "ô kế"),
    KeyHint::new("↑↓", "gợi ý"),
    KeyHint::new("Enter", "lưu"),
    KeyHint::new("Esc", "huỷ"),
];

const DELETE: [KeyHint; 3] = [
    KeyHint::new("Space", "xác nhận"),
    KeyHint::new("Enter", "xoá"),
    KeyHint::new("Esc", "huỷ"),
];

const DASHBOARD: [KeyHint; 1] = [KeyHint::new("r", "tải lại")];

const GLOBAL: [KeyHint; 2] = [KeyHint::new("L", "đăng xuất"), KeyHint::new("q", "thoát")];

/// Hints for what the keyboard currently drives.
pub fn context_hints(state: &AppState) -> Vec<KeyHint> {
    let (focus, modal, delete) = match state.route {
        Route::Login => return Vec::new(),
        Route::Dashboard => return DASHBOARD.to_vec(),
        Route::Transactions => (
            state.transactions.focus,
            state.transactions.modal.is_some(),
            state.transactions.delete.is_some(),
        ),
        Route::Wallets => (
            state.wallets.focus,
            state.wallets.modal.is_some(),
            state.wallets.delete.is_some(),
        ),
        Route::Categories => (
            state.categories.focus,
            state.categories.modal.is_some(),
            state.categories.delete.is_some(),
        ),
    };

    if delete {
        DELETE.to_vec()
    } else if modal {
        MODAL.to_vec()
    } else if focus == Focus::Filter {
        FILTER.to_vec()
    } else {
        LIST.to_vec()
    }
}

pub fn global_hints(state: &AppState) -> Vec<KeyHint> {
    if state.is_editing() {
        vec![KeyHint::new("Ctrl+C", "thoát")]
    } else {
        GLOBAL.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::keymap::AppAction;

    #[test]
    fn hints_follow_the_focused_widget() {
        let mut state = AppState::new(String::new(), chrono_tz::UTC, None);
        state.route = Route::Wallets;
        assert_eq!(context_hints(&state)[0].action, "chọn");

        state
            .wallets
            .handle_key(AppAction::Input('/'), state.tz, std::time::Instant::now());
        assert_eq!(context_hints(&state)[0].key, "Tab");
        assert_eq!(global_hints(&state)[0].key, "Ctrl+C");
    }
}
