//! Layout shared by the three list screens: filter bar, table body,
//! pagination footer and the modal overlays.
use finance_client::{Resource, list::ListView};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{FilterDraft, Focus, FormFields, ListScreen},
    ui::{
        components::{
            card::Card,
            form::{render_delete, render_modal},
        },
        theme::Theme,
    },
};

/// How one screen draws its rows.
pub struct Columns<'a, T> {
    pub title: &'a str,
    pub header: Line<'static>,
    pub empty: &'a str,
    pub row: &'a dyn Fn(&T) -> Line<'static>,
}

pub fn render<R, F, D>(
    frame: &mut Frame<'_>,
    area: Rect,
    screen: &ListScreen<R, F, D>,
    columns: &Columns<'_, R::Item>,
    theme: &Theme,
) where
    R: Resource,
    F: FormFields<Resource = R>,
    D: FilterDraft,
{
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_filter_bar(frame, rows[0], screen, theme);
    render_body(frame, rows[1], screen, columns, theme);
    render_footer(frame, rows[2], screen, theme);

    if let Some(modal) = &screen.modal {
        render_modal(frame, area, modal, screen.modal_field, theme);
    }
    if let Some(confirm) = &screen.delete {
        render_delete(frame, area, confirm, screen.deleting, theme);
    }
}

fn render_filter_bar<R, F, D>(
    frame: &mut Frame<'_>,
    area: Rect,
    screen: &ListScreen<R, F, D>,
    theme: &Theme,
) where
    R: Resource,
    F: FormFields<Resource = R>,
    D: FilterDraft,
{
    let editing = screen.focus == Focus::Filter;
    let mut spans = Vec::new();
    for (index, label) in D::LABELS.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        let focused = editing && index == screen.filter_field;
        let label_style = if focused {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_muted)
        };
        spans.push(Span::styled(format!("{label}: "), label_style));

        let value = screen.draft.field(index);
        let cursor = if focused { "│" } else { "" };
        let value_style = if value.is_empty() && !focused {
            Style::default().fg(theme.dim)
        } else {
            Style::default().fg(theme.text)
        };
        let shown = if value.is_empty() && !focused { "-" } else { value };
        spans.push(Span::styled(format!("{shown}{cursor}"), value_style));
    }
    if screen.debounce.is_pending() {
        spans.push(Span::styled("  …", Style::default().fg(theme.dim)));
    }

    Card::new("Bộ lọc", theme)
        .focused(editing)
        .render_with(frame, area, Paragraph::new(Line::from(spans)));
}

fn render_body<R, F, D>(
    frame: &mut Frame<'_>,
    area: Rect,
    screen: &ListScreen<R, F, D>,
    columns: &Columns<'_, R::Item>,
    theme: &Theme,
) where
    R: Resource,
    F: FormFields<Resource = R>,
    D: FilterDraft,
{
    let card = Card::new(columns.title, theme).focused(screen.focus == Focus::List);
    let items = match screen.list.view() {
        ListView::Loading => {
            return card.render_message(frame, area, "Đang tải...", Style::default().fg(theme.dim));
        }
        ListView::Error(message) => {
            return card.render_message(frame, area, message, Style::default().fg(theme.error));
        }
        ListView::Empty => {
            return card.render_message(
                frame,
                area,
                columns.empty,
                Style::default().fg(theme.text_muted),
            );
        }
        ListView::Items(items) => items,
    };

    let inner = card.inner(area);
    card.render_frame(frame, area);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(columns.header.clone()).style(Style::default().fg(theme.dim)),
        parts[0],
    );

    let list = List::new(
        items
            .iter()
            .map(|item| ListItem::new((columns.row)(item)))
            .collect::<Vec<_>>(),
    )
    .highlight_style(Style::default().bg(theme.panel).add_modifier(Modifier::BOLD))
    .highlight_symbol("» ");
    let mut state = ListState::default().with_selected(Some(screen.list.selected()));
    frame.render_stateful_widget(list, parts[1], &mut state);
}

fn render_footer<R, F, D>(
    frame: &mut Frame<'_>,
    area: Rect,
    screen: &ListScreen<R, F, D>,
    theme: &Theme,
) where
    R: Resource,
    F: FormFields<Resource = R>,
    D: FilterDraft,
{
    let mut spans = vec![Span::styled(
        pagination_label(&screen.list.pagination(), screen.list.query().page_size),
        Style::default().fg(theme.text_muted),
    )];
    // Items from the last good page stay visible while reloading or after an error.
    if !screen.list.items().is_empty() {
        if screen.list.is_loading() {
            spans.push(Span::styled("  Đang tải...", Style::default().fg(theme.dim)));
        } else if let Some(error) = screen.list.error() {
            spans.push(Span::styled(
                format!("  {error}"),
                Style::default().fg(theme.error),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn pagination_label(pagination: &api_types::page::Pagination, page_size: u32) -> String {
    format!(
        " Trang {}/{} · {} mục · {}/trang",
        pagination.current_page + 1,
        pagination.total_pages.max(1),
        pagination.total_items,
        page_size
    )
}
