use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::TableState,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    api::QuoteSource,
    app::{Portfolio, chart::Period, debounce::Debouncer, ui},
    models::{Holding, InstrumentKind, TransactionSide},
};

const AUTOSAVE_DELAY: Duration = Duration::from_millis(600);
const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct App {
    portfolio: Portfolio,
    quotes: Arc<dyn QuoteSource>,
    bucket: InstrumentKind,
    period: Period,
    table_state: TableState,
    history: ui::HistoryPanel,
    debouncer: Debouncer,
    popup_message: Option<String>,
    error_popup: Option<String>,
    last_refresh: Instant,
}

impl App {
    pub fn new(
        portfolio: Portfolio,
        quotes: Arc<dyn QuoteSource>,
        bucket: InstrumentKind,
        period: Period,
    ) -> Self {
        Self {
            portfolio,
            quotes,
            bucket,
            period,
            table_state: TableState::default(),
            history: ui::HistoryPanel::default(),
            debouncer: Debouncer::new(),
            popup_message: None,
            error_popup: None,
            last_refresh: Instant::now(),
        }
    }

    fn show_popup(&mut self, message: &str) {
        self.popup_message = Some(message.to_string());
    }

    fn clear_popup(&mut self) {
        self.popup_message = None;
    }

    fn show_error_popup(&mut self, message: &str) {
        self.error_popup = Some(message.to_string());
    }

    fn clear_error_popup(&mut self) {
        self.error_popup = None;
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        self.debouncer.cancel_all();

        result
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.load_history().await;

        loop {
            self.draw(terminal)?;

            if !event::poll(POLL_INTERVAL)? {
                self.maybe_auto_refresh().await;
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Enter | KeyCode::Esc => {
                        if self.error_popup.is_some() {
                            self.clear_error_popup();
                            continue;
                        }
                        if key.code == KeyCode::Esc {
                            self.table_state.select(None);
                            self.history = ui::HistoryPanel::default();
                        }
                    }
                    KeyCode::Tab => {
                        self.bucket = self.bucket.next();
                        self.table_state.select(None);
                        self.history = ui::HistoryPanel::default();
                    }
                    KeyCode::Down => {
                        self.select_next(1);
                        self.load_history().await;
                    }
                    KeyCode::Up => {
                        self.select_next(-1);
                        self.load_history().await;
                    }
                    KeyCode::Char('p') => {
                        self.period = self.period.next();
                        self.last_refresh = Instant::now();
                        self.load_history().await;
                    }
                    KeyCode::Char('r') => {
                        self.show_popup("Updating prices...");
                        self.draw(terminal)?;

                        let refresh_result = self
                            .portfolio
                            .refresh_prices(self.quotes.as_ref())
                            .await;
                        self.load_history().await;
                        self.last_refresh = Instant::now();

                        self.clear_popup();
                        self.draw(terminal)?;

                        if let Err(e) = refresh_result {
                            self.show_error_popup(&format!("Error updating prices: {:?}", e));
                        }
                    }
                    KeyCode::Char('d') => {
                        if let Err(e) = self.remove_selected().await {
                            self.show_error_popup(&format!("Error removing holding: {:?}", e));
                        }
                    }
                    KeyCode::Char('b') => self.record_trade(TransactionSide::Buy),
                    KeyCode::Char('s') => self.record_trade(TransactionSide::Sell),
                    KeyCode::Char('[') => self.adjust_last_shares(dec!(-1)),
                    KeyCode::Char(']') => self.adjust_last_shares(dec!(1)),
                    _ => {}
                }
            }
        }
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|frame| {
            ui::render(
                frame,
                &self.portfolio,
                self.bucket,
                self.period,
                &self.history,
                &mut self.table_state,
                &self.popup_message,
                &self.error_popup,
            )
        })?;
        Ok(())
    }

    fn selected_holding(&self) -> Option<&Holding> {
        let index = self.table_state.selected()?;
        self.portfolio.bucket(self.bucket).get(index)
    }

    fn select_next(&mut self, step: i64) {
        let holdings = self.portfolio.bucket(self.bucket);
        if holdings.is_empty() {
            self.table_state.select(None);
            return;
        }

        let len = holdings.len() as i64;
        let index = match self.table_state.selected() {
            Some(i) => (i as i64 + step).rem_euclid(len),
            None => {
                if step >= 0 {
                    0
                } else {
                    len - 1
                }
            }
        };
        self.table_state.select(Some(index as usize));
    }

    async fn load_history(&mut self) {
        let Some(symbol) = self.selected_holding().map(|h| h.symbol().clone()) else {
            self.history = ui::HistoryPanel::default();
            return;
        };

        match self.quotes.get_history(&symbol, self.period).await {
            Ok(dto) => {
                self.history = ui::HistoryPanel::new(
                    dto.to_price_points(),
                    (*dto.current_price()).unwrap_or(Decimal::ZERO),
                );
            }
            Err(e) => {
                self.history = ui::HistoryPanel::default();
                self.show_error_popup(&format!("Error loading history: {:?}", e));
            }
        }
    }

    async fn maybe_auto_refresh(&mut self) {
        let Some(interval) = self.period.refresh_interval() else {
            return;
        };
        if self.last_refresh.elapsed() < interval {
            return;
        }

        self.last_refresh = Instant::now();
        if self
            .portfolio
            .refresh_prices(self.quotes.as_ref())
            .await
            .is_ok()
        {
            self.load_history().await;
        }
    }

    async fn remove_selected(&mut self) -> Result<()> {
        let Some(holding) = self.selected_holding() else {
            return Ok(());
        };
        let symbol = holding.symbol().clone();
        let kind = *holding.kind();

        self.portfolio.remove(&symbol, kind).await?;
        self.table_state.select(None);
        self.history = ui::HistoryPanel::default();
        Ok(())
    }

    /// Records a one-share trade at the current price and schedules the
    /// debounced autosave for it.
    fn record_trade(&mut self, side: TransactionSide) {
        let Some(holding) = self.selected_holding() else {
            return;
        };
        let Some(price) = *holding.current_price() else {
            self.show_error_popup("No price available for this holding");
            return;
        };
        let symbol = holding.symbol().clone();
        let kind = *holding.kind();

        let Some(holding) = self.portfolio.holding_mut(&symbol, kind) else {
            return;
        };
        let id = holding.record_transaction(side, price, Decimal::ONE, Local::now().date_naive());
        self.schedule_autosave(&id, &symbol, kind);
    }

    /// Inline edit of the most recent transaction's share count, floored
    /// at one share.
    fn adjust_last_shares(&mut self, delta: Decimal) {
        let Some(holding) = self.selected_holding() else {
            return;
        };
        let symbol = holding.symbol().clone();
        let kind = *holding.kind();
        let Some((id, price, shares)) = holding
            .transactions()
            .last()
            .map(|t| (t.id().clone(), *t.price(), *t.shares()))
        else {
            return;
        };

        let shares = (shares + delta).max(Decimal::ONE);
        if let Some(holding) = self.portfolio.holding_mut(&symbol, kind) {
            holding.update_transaction(&id, price, shares);
        }
        self.schedule_autosave(&id, &symbol, kind);
    }

    /// Autosave is keyed by transaction id, so rapid edits of one field
    /// collapse into a single store write.
    fn schedule_autosave(&mut self, id: &str, symbol: &str, kind: InstrumentKind) {
        let Some(holding) = self.portfolio.holding(symbol, kind) else {
            return;
        };
        let transactions = holding.transactions().clone();
        let symbol = symbol.to_string();
        let store = self.portfolio.store();

        self.debouncer.schedule(id, AUTOSAVE_DELAY, async move {
            if let Err(e) = store.update_transactions(&symbol, kind, &transactions).await {
                eprintln!("Warning: Failed to save transactions for {}: {:?}", symbol, e);
            }
        });
    }
}
