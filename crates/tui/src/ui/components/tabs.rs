use finance_client::routes::Route;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::Theme;

/// Navigation key of each tab, in [`Route::NAV`] order.
pub const TAB_KEYS: [char; 4] = ['h', 't', 'w', 'c'];

pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, active: Route, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];

    for (i, (route, key)) in Route::NAV.iter().zip(TAB_KEYS).enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }

        let label = format!("{key}:{}", route.label());
        if *route == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
