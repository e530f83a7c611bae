use api_types::category::{Category, CategoryKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
};

use crate::{
    app::{AppState, kind_label},
    ui::{
        screens::{
            dashboard::truncate,
            list::{self, Columns},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let row = |category: &Category| category_row(category, theme);
    let columns = Columns {
        title: "Danh mục",
        header: Line::from(format!("  {:<4}{:<28} Loại", "", "Tên danh mục")),
        empty: "Chưa có danh mục nào",
        row: &row,
    };
    list::render(frame, area, &state.categories, &columns, theme);
}

fn category_row(category: &Category, theme: &Theme) -> Line<'static> {
    let kind_color = match category.kind {
        CategoryKind::Expense => theme.negative,
        CategoryKind::Income => theme.positive,
    };
    Line::from(vec![
        Span::raw(format!("{:<4}", category.icon)),
        Span::styled(
            format!("{:<28} ", truncate(&category.name, 28)),
            Style::default().fg(theme.text),
        ),
        Span::styled(kind_label(category.kind), Style::default().fg(kind_color)),
    ])
}
