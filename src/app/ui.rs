use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};
use rust_decimal::Decimal;
use strum::IntoEnumIterator;

use crate::{
    app::{
        chart::{self, ChartView, Period},
        currency,
        portfolio::Portfolio,
    },
    models::{Holding, InstrumentKind, PricePoint, TransactionSide},
};

/// History series of the selected holding, as last fetched.
#[derive(Clone, Debug, Default)]
pub struct HistoryPanel {
    points: Vec<PricePoint>,
    current_price: Decimal,
}

impl HistoryPanel {
    pub fn new(points: Vec<PricePoint>, current_price: Decimal) -> Self {
        Self {
            points,
            current_price,
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn current_price(&self) -> Decimal {
        self.current_price
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render(
    frame: &mut Frame,
    portfolio: &Portfolio,
    bucket: InstrumentKind,
    period: Period,
    history: &HistoryPanel,
    table_state: &mut TableState,
    popup_message: &Option<String>,
    error_popup: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(9),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, portfolio, chunks[0]);
    render_selectors(frame, bucket, period, chunks[1]);
    render_holdings(frame, portfolio, bucket, table_state, chunks[2]);
    render_detail(frame, portfolio, bucket, period, history, table_state, chunks[3]);
    render_footer(frame, chunks[4]);

    if let Some(message) = popup_message {
        render_popup(frame, message, "Working", Color::Yellow);
    }

    if let Some(message) = error_popup {
        render_popup(frame, message, "Error", Color::Red);
    }
}

fn gain_color(value: Decimal) -> Color {
    if value >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    }
}

fn signed(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn render_header(frame: &mut Frame, portfolio: &Portfolio, area: Rect) {
    let summary = portfolio.summary();
    let total_gain = *summary.total_gain();

    let line = Line::from(vec![
        Span::styled("Investment Tracker", Style::default().fg(Color::Cyan)),
        Span::raw(format!("  Value {:.2}", summary.market_value())),
        Span::raw("  P/L "),
        Span::styled(signed(total_gain), Style::default().fg(gain_color(total_gain))),
        Span::raw(format!(
            "  (realized {:.2} / unrealized {:.2})",
            summary.realized_gain(),
            summary.unrealized_gain()
        )),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_selectors(frame: &mut Frame, bucket: InstrumentKind, period: Period, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let mut bucket_spans = Vec::new();
    for kind in InstrumentKind::iter() {
        let label = format!(" {} {} ", kind.emoji(), kind.section_title());
        let style = if kind == bucket {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        bucket_spans.push(Span::styled(label, style));
        bucket_spans.push(Span::raw(" "));
    }
    let buckets = Paragraph::new(Line::from(bucket_spans))
        .block(Block::default().title("Buckets [Tab]").borders(Borders::ALL));
    frame.render_widget(buckets, halves[0]);

    let mut period_spans = Vec::new();
    for p in Period::iter() {
        let style = if p == period {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        period_spans.push(Span::styled(format!(" {} ", p.label()), style));
    }
    let periods = Paragraph::new(Line::from(period_spans))
        .block(Block::default().title("Period [p]").borders(Borders::ALL));
    frame.render_widget(periods, halves[1]);
}

fn render_holdings(
    frame: &mut Frame,
    portfolio: &Portfolio,
    bucket: InstrumentKind,
    table_state: &mut TableState,
    area: Rect,
) {
    let holdings = portfolio.bucket(bucket);
    let title = format!("{} {}", bucket.emoji(), bucket.section_title());

    if holdings.is_empty() {
        let empty_message = Paragraph::new(format!(
            "No {} added yet",
            bucket.section_title().to_lowercase()
        ))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(empty_message, area);
        return;
    }

    let header_cells = [
        "Symbol",
        "Name",
        "Price",
        "Chg %",
        "Shares",
        "Avg Buy",
        "Real. G/L",
        "Unr. G/L",
        "Total G/L",
        "G/L %",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = holdings.iter().map(|holding| {
        let position = holding.position();

        let price = currency::format_price(*holding.current_price(), Some(holding.currency()));
        let change = match holding.change_percent() {
            Some(percent) => format!("{:.1}%", percent),
            None => String::from("-"),
        };
        let change_color =
            gain_color((*holding.change_percent()).unwrap_or(Decimal::ZERO));

        let average_buy = if *position.total_bought_shares() > Decimal::ZERO {
            currency::format_price(Some(*position.average_buy_price()), Some(holding.currency()))
        } else {
            String::from("-")
        };

        let realized = *position.realized_gain();
        let unrealized = *position.unrealized_gain();
        let total = *position.total_gain();
        let percent = *position.total_gain_percent();

        let cells = [
            Cell::from(holding.symbol().clone()),
            Cell::from(holding.name().clone()),
            Cell::from(price),
            Cell::from(change).style(Style::default().fg(change_color)),
            Cell::from(format!("{:.2}", position.current_shares())),
            Cell::from(average_buy),
            Cell::from(signed(realized)).style(Style::default().fg(gain_color(realized))),
            Cell::from(signed(unrealized)).style(Style::default().fg(gain_color(unrealized))),
            Cell::from(signed(total)).style(Style::default().fg(gain_color(total))),
            Cell::from(format!("{:.2}%", percent)).style(Style::default().fg(gain_color(percent))),
        ];

        Row::new(cells).height(1)
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Length(24),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, table_state);
}

fn render_detail(
    frame: &mut Frame,
    portfolio: &Portfolio,
    bucket: InstrumentKind,
    period: Period,
    history: &HistoryPanel,
    table_state: &mut TableState,
    area: Rect,
) {
    let selected = table_state
        .selected()
        .and_then(|index| portfolio.bucket(bucket).get(index));

    let Some(holding) = selected else {
        let hint = Paragraph::new("Select a holding with Up/Down to see history and transactions")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(hint, area);
        return;
    };

    let mut lines = Vec::new();
    lines.push(history_line(holding, period, history));
    lines.push(trades_line(holding, history));

    for transaction in holding.transactions().iter().rev().take(4) {
        lines.push(Line::from(format!(
            "{}  {:4}  {:.2} @ {}",
            transaction.date(),
            transaction.side().to_str(),
            transaction.shares(),
            currency::format_price(Some(*transaction.price()), Some(holding.currency())),
        )));
    }

    let title = format!("{} — {}", holding.symbol(), holding.name());
    let detail = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(detail, area);
}

fn history_line(holding: &Holding, period: Period, history: &HistoryPanel) -> Line<'static> {
    if history.points().is_empty() {
        return Line::from(Span::styled(
            "No data available",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let view = ChartView::new(
        history.points(),
        history.current_price(),
        holding.transactions(),
        holding.legacy().as_ref(),
    );
    let trend_color = if *view.rising() { Color::Green } else { Color::Red };

    Line::from(vec![
        Span::raw(format!("{}  ", period.label())),
        Span::styled(
            format!("{}%", signed(*view.change_percent())),
            Style::default().fg(trend_color),
        ),
        Span::raw(format!(
            "  {} → {}",
            currency::format_price(Some(*view.first_price()), Some(holding.currency())),
            currency::format_price(Some(*view.last_price()), Some(holding.currency())),
        )),
    ])
}

fn trades_line(holding: &Holding, history: &HistoryPanel) -> Line<'static> {
    let (average_buy, average_sell) =
        chart::average_trade_prices(holding.transactions(), holding.legacy().as_ref());

    if average_buy.is_none() && average_sell.is_none() {
        return Line::from(Span::styled(
            "No trades yet — press b to buy",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut spans = Vec::new();

    if let Some(price) = average_buy {
        let buys = holding
            .transactions()
            .iter()
            .filter(|t| *t.side() == TransactionSide::Buy)
            .count();
        spans.push(Span::styled("● ", Style::default().fg(Color::Blue)));
        spans.push(Span::raw(format!(
            "Avg Buy: {}{}",
            currency::format_price(Some(price), Some(holding.currency())),
            trade_count_suffix(buys, holding, TransactionSide::Buy),
        )));
    }

    if let Some(price) = average_sell {
        let sells = holding
            .transactions()
            .iter()
            .filter(|t| *t.side() == TransactionSide::Sell)
            .count();
        if !spans.is_empty() {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled("● ", Style::default().fg(Color::Red)));
        spans.push(Span::raw(format!(
            "Avg Sell: {}{}",
            currency::format_price(Some(price), Some(holding.currency())),
            trade_count_suffix(sells, holding, TransactionSide::Sell),
        )));
    }

    let markers =
        chart::place_markers(history.points(), holding.transactions(), holding.legacy().as_ref());
    if !markers.is_empty() {
        spans.push(Span::raw(format!("   {} in window", markers.len())));
    }

    Line::from(spans)
}

/// `(3 trades)` for multi-trade histories, the legacy date for holdings
/// still on single buy/sell fields.
fn trade_count_suffix(count: usize, holding: &Holding, side: TransactionSide) -> String {
    if count > 1 {
        return format!(" ({} trades)", count);
    }
    if count == 0 {
        if let Some(legacy) = holding.legacy() {
            let date = match side {
                TransactionSide::Buy => legacy.buy_date(),
                TransactionSide::Sell => legacy.sell_date(),
            };
            if let Some(date) = date {
                return format!(" ({})", date);
            }
        }
    }
    String::new()
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(
        "q quit  Tab bucket  Up/Down select  p period  r refresh  b buy  s sell  [ ] shares  d delete  Esc back",
    )
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_popup(frame: &mut Frame, message: &str, title: &str, color: Color) {
    let area = centered_rect(60, 20, frame.area());
    let popup = Paragraph::new(message)
        .style(Style::default().fg(color))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
