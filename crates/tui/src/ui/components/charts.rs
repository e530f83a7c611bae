use finance_client::aggregate::{Slice, shares};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{BarChart, Paragraph},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::ui::{components::card::Card, theme::Theme};

/// Whole units for bar heights; fractions do not matter at chart scale.
pub fn to_units(value: Decimal) -> u64 {
    value.abs().round().to_u64().unwrap_or_default()
}

/// Vertical bars, one per label.
pub fn render_bar_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    data: &[(&str, u64)],
    theme: &Theme,
) {
    let chart = BarChart::default()
        .data(data)
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.negative))
        .value_style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(theme.dim));

    if title.is_empty() {
        frame.render_widget(chart, area);
    } else {
        Card::new(title, theme).render_with(frame, area, chart);
    }
}

/// Horizontal share bars with percentages, largest first as given.
pub fn render_share_bars(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    slices: &[Slice],
    theme: &Theme,
) {
    let card = Card::new(title, theme);
    let inner = card.inner(area);
    let label_width = slices
        .iter()
        .map(|slice| slice.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(18);
    let bar_width = usize::from(inner.width).saturating_sub(label_width + 10).max(4);
    let max = slices.iter().map(|slice| to_units(slice.value)).max().unwrap_or(0);

    let lines = shares(slices)
        .into_iter()
        .map(|(slice, percent)| {
            let label: String = slice.label.chars().take(label_width).collect();
            Line::from(vec![
                Span::styled(
                    format!("{label:<label_width$} "),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    ascii_bar(to_units(slice.value), max, bar_width),
                    Style::default().fg(theme.negative),
                ),
                Span::styled(
                    format!(" {:>5.1}%", percent.to_f64().unwrap_or_default()),
                    Style::default().fg(theme.dim),
                ),
            ])
        })
        .collect::<Vec<_>>();

    card.render_with(frame, area, Paragraph::new(lines));
}

/// Returns a string like `████████░░░░░░░░░░░░` representing the ratio.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Returns something like `▁▂▃▅▇▅▃▂▁` for a series of values.
#[must_use]
pub fn mini_bar_chart(values: &[u64]) -> String {
    let max = values.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return " ".repeat(values.len());
    }

    let bars = [
        symbols::bar::ONE_EIGHTH,
        symbols::bar::ONE_QUARTER,
        symbols::bar::THREE_EIGHTHS,
        symbols::bar::HALF,
        symbols::bar::FIVE_EIGHTHS,
        symbols::bar::THREE_QUARTERS,
        symbols::bar::SEVEN_EIGHTHS,
        symbols::bar::FULL,
    ];

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                " "
            } else {
                let index = ((v as f64 / max as f64) * 7.0) as usize;
                bars[index.min(7)]
            }
        })
        .collect()
}
