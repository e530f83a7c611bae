use api_types::transaction::{MonthlyBalance, Transaction};
use chrono_tz::Tz;
use finance_client::{
    dashboard::{ChartData, Panel},
    forms::DEFAULT_CURRENCY,
    money::format_amount,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::{mini_bar_chart, render_bar_chart, render_share_bars, to_units},
            money::{styled_amount, styled_amount_bold, styled_amount_no_sign},
        },
        theme::Theme,
    },
};

const LOADING: &str = "Đang tải...";

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    render_summary(frame, rows[0], &state.dashboard.summary, theme);
    render_stats(frame, rows[1], &state.dashboard.charts, theme);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[2]);
    render_charts(frame, body[0], &state.dashboard.charts, theme);
    render_recent(frame, body[1], &state.dashboard.recent, state.tz, theme);
}

/// Draws the placeholder for a panel that has nothing to show yet.
/// Returns the value when the panel is ready.
fn settle<'a, T>(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    panel: &'a Panel<T>,
    theme: &Theme,
) -> Option<&'a T> {
    let card = Card::new(title, theme);
    match panel {
        Panel::Ready(value) => return Some(value),
        Panel::Loading => card.render_message(frame, area, LOADING, Style::default().fg(theme.dim)),
        Panel::Empty(message) => {
            card.render_message(frame, area, message, Style::default().fg(theme.text_muted));
        }
        Panel::Failed(message) => {
            card.render_message(frame, area, message, Style::default().fg(theme.error));
        }
    }
    None
}

fn three_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area)
}

fn render_summary(
    frame: &mut Frame<'_>,
    area: Rect,
    panel: &Panel<MonthlyBalance>,
    theme: &Theme,
) {
    let Some(balance) = settle(frame, area, "Tháng này", panel, theme) else {
        return;
    };

    let columns = three_columns(area);
    StatCard::styled(
        "Thu nhập",
        styled_amount_no_sign(balance.total_income, DEFAULT_CURRENCY, theme),
        theme,
    )
    .render(frame, columns[0]);
    // Some servers report expenses as a negative total.
    StatCard::styled(
        "Chi tiêu",
        styled_amount_no_sign(-balance.total_expense.abs(), DEFAULT_CURRENCY, theme),
        theme,
    )
    .render(frame, columns[1]);
    StatCard::styled(
        "Số dư",
        styled_amount_bold(balance.net, DEFAULT_CURRENCY, theme),
        theme,
    )
    .render(frame, columns[2]);
}

fn render_stats(frame: &mut Frame<'_>, area: Rect, panel: &Panel<ChartData>, theme: &Theme) {
    let Some(data) = settle(frame, area, "Thống kê", panel, theme) else {
        return;
    };

    let stats = &data.stats;
    let columns = three_columns(area);
    let trend = data
        .charts
        .by_day
        .iter()
        .map(|slice| to_units(slice.value))
        .collect::<Vec<_>>();

    StatCard::new("Giao dịch hôm nay", stats.transactions_today.to_string(), theme)
        .render(frame, columns[0]);
    StatCard::new(
        "Chi tiêu TB/ngày",
        format_amount(stats.average_daily_expense, DEFAULT_CURRENCY),
        theme,
    )
    .subtitle(mini_bar_chart(&trend))
    .render(frame, columns[1]);
    StatCard::new(
        "Chi nhiều nhất",
        stats.top_category.as_deref().unwrap_or("—"),
        theme,
    )
    .render(frame, columns[2]);
}

fn render_charts(frame: &mut Frame<'_>, area: Rect, panel: &Panel<ChartData>, theme: &Theme) {
    let Some(data) = settle(frame, area, "Biểu đồ chi tiêu", panel, theme) else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    if data.charts.by_category.is_empty() {
        Card::new("Theo danh mục", theme).render_message(
            frame,
            rows[0],
            "Chưa có chi tiêu",
            Style::default().fg(theme.text_muted),
        );
    } else {
        render_share_bars(frame, rows[0], "Theo danh mục", &data.charts.by_category, theme);
    }

    let bars = data
        .charts
        .by_day
        .iter()
        .map(|slice| (slice.label.as_str(), to_units(slice.value)))
        .collect::<Vec<_>>();
    render_bar_chart(frame, rows[1], "Theo ngày", &bars, theme);
}

fn render_recent(
    frame: &mut Frame<'_>,
    area: Rect,
    panel: &Panel<Vec<Transaction>>,
    tz: Tz,
    theme: &Theme,
) {
    let title = "Giao dịch gần đây";
    let Some(transactions) = settle(frame, area, title, panel, theme) else {
        return;
    };

    let lines = transactions
        .iter()
        .map(|tx| recent_line(tx, tz, theme))
        .collect::<Vec<_>>();
    Card::new(title, theme).render_with(frame, area, Paragraph::new(lines));
}

fn recent_line(tx: &Transaction, tz: Tz, theme: &Theme) -> Line<'static> {
    let when = tx.occurred_at.with_timezone(&tz).format("%d/%m %H:%M");
    let mut spans = vec![
        Span::styled(format!("{when}  "), Style::default().fg(theme.dim)),
        Span::styled(
            format!("{:<14} ", truncate(&tx.category_name, 14)),
            Style::default().fg(theme.text),
        ),
        styled_amount(tx.amount, &tx.currency, theme),
    ];
    if !tx.note.is_empty() {
        spans.push(Span::styled(
            format!("  {}", truncate(&tx.note, 20)),
            Style::default().fg(theme.text_muted),
        ));
    }
    Line::from(spans)
}

pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
