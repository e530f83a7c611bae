pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use chrono::Utc;
use finance_client::routes::{Guard, Route, guard};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::AppState;
use theme::Theme;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    match guard(state.route, state.session) {
        Guard::Pending => {
            let text = Paragraph::new(Span::styled(
                "Đang khôi phục phiên...",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(text, area);
        }
        Guard::Redirect(_) | Guard::Allow(Route::Login) => {
            screens::login::render(frame, area, state, &theme);
            components::toast::render(frame, area, state.toast.as_ref(), &theme);
        }
        Guard::Allow(route) => render_shell(frame, area, route, state, &theme),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, route: Route, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // info bar
            Constraint::Length(2), // tabs
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, theme);
    components::tabs::render_tabs(frame, layout[1], route, theme);

    let content = layout[2];
    match route {
        Route::Login => {}
        Route::Dashboard => screens::dashboard::render(frame, content, state, theme),
        Route::Transactions => screens::transactions::render(frame, content, state, theme),
        Route::Wallets => screens::wallets::render(frame, content, state, theme),
        Route::Categories => screens::categories::render(frame, content, state, theme),
    }

    render_bottom_bar(frame, layout[3], state, theme);
    components::toast::render(frame, area, state.toast.as_ref(), theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let now = Utc::now().with_timezone(&state.tz);
    let line = Line::from(vec![
        Span::styled("Máy chủ", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Múi giờ", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.tz.name())),
        Span::styled(
            now.format("%d/%m/%Y %H:%M").to_string(),
            Style::default().fg(theme.dim),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::hints::hints_to_spans(&components::hints::context_hints(state), theme);
    let global = components::hints::global_hints(state);
    if !parts.is_empty() && !global.is_empty() {
        parts.push(components::hints::hint_separator(theme));
    }
    parts.extend(components::hints::hints_to_spans(&global, theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
