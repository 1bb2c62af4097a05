use anyhow::Result;
use bank_dashboard::{
    apply, t, Action, ActionKind, Dashboard, DashboardView, FormatPolicy, IconId, Label, Tab,
    ViewState,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// One `Tick` per interval drives the tab transition
const TICK: Duration = Duration::from_millis(100);

const ACTION_COLUMNS: usize = 3;

pub struct App {
    pub dashboard: Dashboard,
    pub state: ViewState,
    pub policy: FormatPolicy,
    pub view: DashboardView,
    pub card_state: TableState,
    pub tx_state: TableState,
    pub selected_action: usize,
    pub status: Option<String>,
}

impl App {
    pub fn new(dashboard: Dashboard, state: ViewState, policy: FormatPolicy) -> Self {
        let view = DashboardView::derive(&dashboard, &state, policy);

        let mut card_state = TableState::default();
        if !dashboard.accounts.is_empty() {
            card_state.select(Some(0));
        }
        let mut tx_state = TableState::default();
        if !dashboard.transactions.is_empty() {
            tx_state.select(Some(0));
        }

        Self {
            dashboard,
            state,
            policy,
            view,
            card_state,
            tx_state,
            selected_action: 0,
            status: None,
        }
    }

    /// Run one action through the reducer; rejected actions leave the state as is
    pub fn dispatch(&mut self, action: Action) {
        match apply(&self.state, action) {
            Ok(next) => {
                let changed = next.revision != self.state.revision;
                self.state = next;
                if changed {
                    self.view = DashboardView::derive(&self.dashboard, &self.state, self.policy);
                    self.status = None;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "action rejected");
                self.status = Some(err.to_string());
            }
        }
    }

    pub fn selected_card_key(&self) -> Option<String> {
        self.card_state
            .selected()
            .and_then(|i| self.dashboard.accounts.get(i))
            .map(|card| card.account_key.clone())
    }

    pub fn selected_action_kind(&self) -> Option<ActionKind> {
        self.dashboard.actions.get(self.selected_action).map(|a| a.kind)
    }

    pub fn next(&mut self) {
        match self.state.tab {
            Tab::Accounts => step(&mut self.card_state, self.dashboard.accounts.len(), 1),
            Tab::Transactions => step(&mut self.tx_state, self.dashboard.transactions.len(), 1),
            Tab::Actions => {
                let len = self.dashboard.actions.len();
                if len > 0 {
                    self.selected_action = (self.selected_action + 1) % len;
                }
            }
        }
    }

    pub fn previous(&mut self) {
        match self.state.tab {
            Tab::Accounts => step(&mut self.card_state, self.dashboard.accounts.len(), -1),
            Tab::Transactions => step(&mut self.tx_state, self.dashboard.transactions.len(), -1),
            Tab::Actions => {
                let len = self.dashboard.actions.len();
                if len > 0 {
                    self.selected_action = (self.selected_action + len - 1) % len;
                }
            }
        }
    }

    /// Map a key to a reducer action, handling pure navigation keys directly.
    /// Returns `false` when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.previous();
                None
            }
            KeyCode::Char('v') => self.selected_card_key().map(Action::ToggleBalance),
            KeyCode::Char('a') => Some(Action::ToggleAllBalances),
            KeyCode::Char('s') => Some(Action::SetAllBalances(true)),
            KeyCode::Char('h') => Some(Action::SetAllBalances(false)),
            KeyCode::Char('l') => Some(Action::ToggleLocale),
            KeyCode::Char('e') => Some(Action::SetLocale("en".to_string())),
            KeyCode::Char('r') => Some(Action::SetLocale("ru".to_string())),
            KeyCode::Enter if self.state.tab == Tab::Actions => {
                if let Some(kind) = self.selected_action_kind() {
                    tracing::info!(?kind, "quick action selected");
                    self.status = Some(format!("{kind:?}"));
                }
                None
            }
            _ => None,
        };

        if let Some(action) = action {
            self.dispatch(action);
        }
        true
    }
}

fn step(state: &mut TableState, len: usize, delta: isize) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
        None => 0,
    };
    state.select(Some(i));
}

/// Wall-clock tick schedule, independent of how many key events arrive
struct Ticker {
    last: Instant,
}

impl Ticker {
    fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// How long the next event poll may block
    fn timeout(&self, now: Instant) -> Duration {
        TICK.saturating_sub(now.saturating_duration_since(self.last))
    }

    fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= TICK {
            self.last = now;
            true
        } else {
            false
        }
    }
}

fn icon_glyph(icon: IconId) -> &'static str {
    match icon {
        IconId::ArrowRight => "→",
        IconId::Receipt => "🧾",
        IconId::Plus => "+",
        IconId::Document => "📄",
        IconId::Swap => "⇄",
        IconId::Card => "💳",
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "ui loop failed");
    }

    Ok(res?)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut ticker = Ticker::new(Instant::now());

    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(ticker.timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(key) {
                    return Ok(());
                }
            }
        }

        if ticker.due(Instant::now()) && app.state.transition.is_some() {
            app.dispatch(Action::Tick);
        }
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with tabs
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.state.tab {
        Tab::Accounts => render_accounts(f, chunks[1], app),
        Tab::Transactions => render_transactions(f, chunks[1], app),
        Tab::Actions => render_actions(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let locale = app.state.locale();
    let mut tab_spans = vec![];

    for (i, (tab, name)) in Tab::ALL.iter().zip(app.view.tabs.iter()).enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = match app.state.transition {
            // Fade in: dim until half way, then full highlight
            Some(tr) if tr.to == *tab && tr.progress() < 0.5 => {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM)
            }
            Some(tr) if tr.from == *tab && tr.progress() < 0.5 => {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM)
            }
            _ if *tab == app.state.tab => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            _ => Style::default().fg(Color::DarkGray),
        };

        tab_spans.push(Span::styled(name.clone(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("{}: {}", t(locale, Label::TotalBalance), app.view.total_balance),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        locale.native_name(),
        Style::default().fg(Color::Cyan),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_accounts(f: &mut Frame, area: Rect, app: &mut App) {
    let hidden = t(app.state.locale(), Label::Hidden);
    let rows = app.view.cards.iter().map(|card| {
        let balance_style = if card.visible {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Row::new(vec![
            Cell::from(format!("({})", card.initials)).style(Style::default().fg(Color::Cyan)),
            Cell::from(card.title.clone()),
            Cell::from(card.account_number.clone()),
            Cell::from(card.balance.clone()).style(balance_style),
            Cell::from(if card.visible { "👁" } else { hidden }),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(24),
            Constraint::Length(8),
        ],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", app.view.tabs[0])),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.card_state);
}

fn render_transactions(f: &mut Frame, area: Rect, app: &mut App) {
    let locale = app.state.locale();
    let header_cells = [Label::ColumnDate, Label::ColumnMerchant, Label::ColumnCategory, Label::ColumnAmount]
        .iter()
        .map(|label| {
            Cell::from(t(locale, *label)).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.view.transactions.iter().map(|tx| {
        let color = if tx.incoming { Color::Green } else { Color::Red };

        Row::new(vec![
            Cell::from(tx.date.clone()),
            Cell::from(truncate(&tx.merchant, 28)),
            Cell::from(truncate(&tx.category, 16)),
            Cell::from(tx.amount.clone()).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(30),
            Constraint::Length(18),
            Constraint::Length(22),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", app.view.tabs[1])),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.tx_state);
}

fn render_actions(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(" {} ", app.view.tabs[2]));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let row_count = app.view.actions.len().div_ceil(ACTION_COLUMNS);
    if row_count == 0 {
        return;
    }

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(4); row_count])
        .split(inner);

    for (r, chunk) in app.view.actions.chunks(ACTION_COLUMNS).enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, ACTION_COLUMNS as u32); ACTION_COLUMNS])
            .split(row_areas[r]);

        for (c, action) in chunk.iter().enumerate() {
            let selected = r * ACTION_COLUMNS + c == app.selected_action;
            let border = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let tile = Paragraph::new(vec![
                Line::from(Span::styled(icon_glyph(action.icon), Style::default().fg(Color::Cyan))),
                Line::from(action.label.clone()),
            ])
            .block(Block::default().borders(Borders::ALL).border_style(border));

            f.render_widget(tile, cols[c]);
        }
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let locale = app.state.locale();
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let mut status_spans = vec![];

    if let Some(status) = &app.status {
        status_spans.push(Span::styled(format!(" {} ", status), Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" | "));
    }

    status_spans.extend([
        key("v"),
        Span::raw(format!(" {} | ", t(locale, Label::HintToggle))),
        key("a"),
        Span::raw(format!(" {} | ", t(locale, Label::HintToggleAll))),
        key("l"),
        Span::raw(format!(" {} | ", t(locale, Label::HintLanguage))),
        key("Tab"),
        Span::raw(format!(" {} | ", t(locale, Label::HintTabs))),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(format!(" {}", t(locale, Label::HintQuit))),
    ]);

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
