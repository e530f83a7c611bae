use finance_client::money::{format_amount, format_signed};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};
use rust_decimal::Decimal;

use crate::ui::theme::Theme;

fn amount_color(amount: Decimal, theme: &Theme) -> ratatui::style::Color {
    if amount > Decimal::ZERO {
        theme.positive
    } else if amount < Decimal::ZERO {
        theme.negative
    } else {
        theme.text
    }
}

/// Signed amount: green with `+` for income, red for expenses.
#[must_use]
pub fn styled_amount(amount: Decimal, currency: &str, theme: &Theme) -> Span<'static> {
    Span::styled(
        format_signed(amount, currency),
        Style::default().fg(amount_color(amount, theme)),
    )
}

/// Used where the label already gives the direction ("Chi tiêu: 1.200.000 ₫").
#[must_use]
pub fn styled_amount_no_sign(amount: Decimal, currency: &str, theme: &Theme) -> Span<'static> {
    Span::styled(
        format_amount(amount.abs(), currency),
        Style::default().fg(amount_color(amount, theme)),
    )
}

#[must_use]
pub fn styled_amount_bold(amount: Decimal, currency: &str, theme: &Theme) -> Span<'static> {
    let span = styled_amount(amount, currency, theme);
    let style = span.style.add_modifier(Modifier::BOLD);
    span.style(style)
}
