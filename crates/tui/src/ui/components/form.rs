use finance_client::{
    Resource,
    forms::{DeleteConfirmation, Modal, ModalMode},
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{FieldKind, FormFields},
    ui::theme::Theme,
};

/// Picker suggestions shown under the focused picker field.
const SUGGESTIONS: usize = 5;

pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render_field(
    label: &str,
    value: &str,
    focused: bool,
    label_width: usize,
    theme: &Theme,
) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let value_style = if focused {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let cursor = if focused { "│" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label:<label_width$}"), label_style),
        Span::raw(" "),
        Span::styled(format!("{value}{cursor}"), value_style),
    ])
}

fn overlay_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.panel))
}

/// Add/edit dialog for any form.
pub fn render_modal<F: FormFields>(
    frame: &mut Frame<'_>,
    area: Rect,
    modal: &Modal<F>,
    focus: usize,
    theme: &Theme,
) {
    let form = modal.form();
    let label_width = F::LABELS
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    let mut lines = Vec::new();
    for (index, label) in F::LABELS.iter().enumerate() {
        let focused = index == focus;
        lines.push(render_field(
            label,
            &form.display(index),
            focused,
            label_width,
            theme,
        ));
        if focused
            && F::kind(index) == FieldKind::Picker
            && let Some(picker) = form.picker(index)
        {
            let options = picker.filtered();
            if options.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("{:label_width$} Không có kết quả", ""),
                    Style::default().fg(theme.dim),
                )));
            }
            for (row, option) in options.iter().take(SUGGESTIONS).enumerate() {
                let style = if row == picker.cursor() {
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text_muted)
                };
                let marker = if row == picker.cursor() { "»" } else { " " };
                let mut text = format!("{:label_width$}{marker} {}", "", option.label);
                if !option.detail.is_empty() {
                    text.push_str(&format!(" ({})", option.detail));
                }
                lines.push(Line::from(Span::styled(text, style)));
            }
        }
    }

    lines.push(Line::from(""));
    if modal.is_submitting() {
        lines.push(Line::from(Span::styled(
            "Đang lưu...",
            Style::default().fg(theme.warning),
        )));
    } else if let Some(error) = modal.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(theme.error),
        )));
    }

    let title = match modal.mode() {
        ModalMode::Add => F::TITLE_ADD,
        ModalMode::Edit(_) => F::TITLE_EDIT,
    };
    let height = lines.len() as u16 + 2;
    let rect = centered_box(64, height, area);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(overlay_block(title, theme)),
        rect,
    );
}

/// Two-step delete dialog: a checkbox, then Enter.
pub fn render_delete<R: Resource>(
    frame: &mut Frame<'_>,
    area: Rect,
    confirm: &DeleteConfirmation<R>,
    deleting: bool,
    theme: &Theme,
) {
    let checkbox = if confirm.is_confirmed() { "[x]" } else { "[ ]" };
    let mut lines = vec![
        Line::from(Span::styled(confirm.prompt(), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(vec![
            Span::styled(checkbox, Style::default().fg(theme.accent)),
            Span::raw(" Tôi hiểu thao tác này không thể hoàn tác"),
        ]),
    ];
    if deleting {
        lines.push(Line::from(Span::styled(
            "Đang xoá...",
            Style::default().fg(theme.warning),
        )));
    } else if let Some(error) = confirm.error() {
        lines.push(Line::from(Span::styled(error, Style::default().fg(theme.error))));
    } else if !confirm.is_confirmed() {
        lines.push(Line::from(Span::styled(
            "Nhấn Space để xác nhận",
            Style::default().fg(theme.dim),
        )));
    }

    let rect = centered_box(60, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(overlay_block("Xác nhận xoá", theme)),
        rect,
    );
}
