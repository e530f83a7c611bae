use api_types::wallet::Wallet;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
};

use crate::{
    app::AppState,
    ui::{
        screens::{
            dashboard::truncate,
            list::{self, Columns},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let row = |wallet: &Wallet| wallet_row(wallet, theme);
    let columns = Columns {
        title: "Ví",
        header: Line::from(format!("  {:<4}{:<28} Tiền tệ", "", "Tên ví")),
        empty: "Chưa có ví nào",
        row: &row,
    };
    list::render(frame, area, &state.wallets, &columns, theme);
}

fn wallet_row(wallet: &Wallet, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{:<4}", wallet.icon)),
        Span::styled(
            format!("{:<28} ", truncate(&wallet.name, 28)),
            Style::default().fg(theme.text),
        ),
        Span::styled(wallet.currency.clone(), Style::default().fg(theme.text_muted)),
    ])
}
