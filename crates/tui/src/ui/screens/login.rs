use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, AuthMode},
    ui::{components::form::centered_box, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let login = &state.login;
    let labels = login.labels();

    let box_width = 52;
    let box_height = labels.len() as u16 * 2 + 3;
    let card_area = centered_box(box_width, box_height, area);
    frame.render_widget(Clear, card_area);

    let title = match login.mode {
        AuthMode::Login => " Đăng nhập ",
        AuthMode::Register => " Đăng ký ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    // label/value pairs separated by a spacer
    let constraints = labels
        .iter()
        .flat_map(|_| [Constraint::Length(1), Constraint::Length(1)])
        .collect::<Vec<_>>();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 1;
    for (index, label) in labels.iter().enumerate() {
        let Some(row) = rows.get(index * 2) else {
            break;
        };
        render_input(
            frame,
            *row,
            label,
            label_width,
            login.value(index),
            login.is_secret(index),
            login.focus == index,
            theme,
        );
    }

    let mut below = Vec::new();
    if let Some(message) = &login.message {
        below.push(Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(theme.error),
        )));
    }
    let switch = match login.mode {
        AuthMode::Login => "Esc: tạo tài khoản",
        AuthMode::Register => "Esc: đã có tài khoản",
    };
    below.push(Line::from(Span::styled(
        format!("Tab: ô kế • Enter: gửi • {switch} • Ctrl+C: thoát"),
        Style::default().fg(theme.dim),
    )));
    below.push(Line::from(Span::styled(
        state.base_url.as_str(),
        Style::default().fg(theme.dim),
    )));

    let below_area = Rect {
        x: area.x,
        y: (card_area.y + card_area.height + 1).min(area.bottom().saturating_sub(1)),
        width: area.width,
        height: (below.len() as u16).min(area.bottom().saturating_sub(card_area.bottom())),
    };
    frame.render_widget(Paragraph::new(below).alignment(Alignment::Center), below_area);
}

#[allow(clippy::too_many_arguments)]
fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    label_width: usize,
    value: &str,
    is_password: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let display = if is_password {
        format!("{}{cursor}", mask_password(value))
    } else {
        format!("{value}{cursor}")
    };

    let (label_style, value_style) = if focused {
        (
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(theme.accent),
        )
    } else {
        (
            Style::default().fg(theme.text_muted),
            Style::default().fg(theme.text),
        )
    };

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{label:<label_width$}"), label_style),
            Span::styled(display, value_style),
        ])),
        area,
    );
}

/// One bullet per character.
fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}
