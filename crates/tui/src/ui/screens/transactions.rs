use api_types::transaction::Transaction;
use chrono_tz::Tz;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
};

use crate::{
    app::AppState,
    ui::{
        components::money::styled_amount,
        screens::{
            dashboard::truncate,
            list::{self, Columns},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let tz = state.tz;
    let row = |tx: &Transaction| transaction_row(tx, tz, theme);
    let columns = Columns {
        title: "Giao dịch",
        header: Line::from(format!(
            "  {:<16} {:<14} {:<14} {:>16}  Ghi chú",
            "Thời gian", "Ví", "Danh mục", "Số tiền"
        )),
        empty: "Không có giao dịch nào",
        row: &row,
    };
    list::render(frame, area, &state.transactions, &columns, theme);
}

fn transaction_row(tx: &Transaction, tz: Tz, theme: &Theme) -> Line<'static> {
    let when = tx.occurred_at.with_timezone(&tz).format("%d/%m/%Y %H:%M");
    let amount = styled_amount(tx.amount, &tx.currency, theme);
    let padded = format!("{:>16}", amount.content);
    Line::from(vec![
        Span::styled(format!("{when:<16} "), Style::default().fg(theme.dim)),
        Span::styled(
            format!("{:<14} ", truncate(&tx.wallet_name, 14)),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("{:<14} ", truncate(&tx.category_name, 14)),
            Style::default().fg(theme.text),
        ),
        Span::styled(padded, amount.style),
        Span::styled(
            format!("  {}", truncate(&tx.note, 30)),
            Style::default().fg(theme.text_muted),
        ),
    ])
}
