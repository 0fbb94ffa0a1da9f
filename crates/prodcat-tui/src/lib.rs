// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod screen;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use prodcat_app::{Session, SortColumn, ViewCommand, ViewEvent};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

pub use screen::{Body, FilterControl, Hook, RowModel, ScreenModel, SortHeader, UserTone};

const DEFAULT_STATUS_TIMEOUT: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Owners,
    Search,
    Categories,
    Table,
}

impl Focus {
    pub const ALL: [Self; 4] = [Self::Owners, Self::Search, Self::Categories, Self::Table];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owners => "owners",
            Self::Search => "search",
            Self::Categories => "categories",
            Self::Table => "table",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "owners" => Some(Self::Owners),
            "search" => Some(Self::Search),
            "categories" => Some(Self::Categories),
            "table" => Some(Self::Table),
            _ => None,
        }
    }

    fn rotate(self, delta: isize) -> Self {
        let current = Self::ALL
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or(0) as isize;
        let len = Self::ALL.len() as isize;
        Self::ALL[(current + delta).rem_euclid(len) as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub initial_focus: Focus,
    pub status_timeout: Duration,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            initial_focus: Focus::Owners,
            status_timeout: DEFAULT_STATUS_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiAction {
    Quit,
    ToggleHelp,
    FocusNext,
    FocusPrev,
    FocusSearch,
    MoveCursor(isize),
    MoveRow(isize),
    Activate,
    ResetAll,
    SearchInput(char),
    SearchBackspace,
    ClearSearch,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    focus: Focus,
    owner_cursor: usize,
    category_cursor: usize,
    column_cursor: usize,
    row_cursor: usize,
    help_visible: bool,
    status_line: Option<String>,
    status_token: u64,
    status_timeout: Duration,
}

impl ViewData {
    fn new(options: &UiOptions) -> Self {
        Self {
            focus: options.initial_focus,
            status_timeout: options.status_timeout,
            ..Self::default()
        }
    }
}

pub fn run_app(session: &mut Session, options: &UiOptions) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let result = restoring(|| run_alternate_screen(session, options), restore_terminal);
    info!("tui stopped");
    result
}

fn run_alternate_screen(session: &mut Session, options: &UiOptions) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")?;

    let listener = session.subscribe(|state, rows| {
        debug!(
            owner = %state.selected_owner_name,
            category = %state.selected_category_title,
            query = %state.search_query,
            rows = rows.len(),
            "rows recomputed"
        );
    });
    info!(rows = session.catalog().len(), "tui started");

    let result = event_loop(&mut terminal, session, options);
    session.unsubscribe(listener);
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut Session,
    options: &UiOptions,
) -> Result<()> {
    let mut view_data = ViewData::new(options);
    let (internal_tx, internal_rx) = mpsc::channel();
    loop {
        process_internal_events(&mut view_data, &internal_rx);
        terminal
            .draw(|frame| render(frame, session, &view_data))
            .context("draw frame")?;

        if event::poll(Duration::from_millis(120)).context("poll event")?
            && let Event::Key(key) = event::read().context("read event")?
            && handle_key_event(session, &mut view_data, &internal_tx, key)
        {
            return Ok(());
        }
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    Ok(())
}

/// Runs `restore` after `body` on every path; the body's error takes
/// precedence over a restore failure.
fn restoring<T>(
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

fn process_internal_events(view_data: &mut ViewData, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                view_data.status_line = None;
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64, after: Duration) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(after);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    view_data.status_line = Some(message.into());
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token, view_data.status_timeout);
}

/// Returns true when the user asked to quit.
fn handle_key_event(
    session: &mut Session,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let Some(action) = action_for_key(view_data.focus, view_data.help_visible, key) else {
        return false;
    };

    match action {
        UiAction::Quit => return true,
        UiAction::ToggleHelp => view_data.help_visible = !view_data.help_visible,
        UiAction::FocusNext => view_data.focus = view_data.focus.rotate(1),
        UiAction::FocusPrev => view_data.focus = view_data.focus.rotate(-1),
        UiAction::FocusSearch => view_data.focus = Focus::Search,
        UiAction::MoveCursor(delta) => move_cursor(session, view_data, delta),
        UiAction::MoveRow(delta) => {
            let len = session.visible_rows().len();
            view_data.row_cursor = step_cursor(view_data.row_cursor, len, delta);
        }
        UiAction::Activate => {
            let status = activate(session, view_data);
            if let Some(message) = status {
                emit_status(view_data, internal_tx, message);
            }
        }
        UiAction::ResetAll => {
            if !session.apply(ViewCommand::ResetAll).is_empty() {
                emit_status(view_data, internal_tx, "filters reset");
            }
        }
        UiAction::SearchInput(ch) => {
            let mut query = session.state().search_query.clone();
            query.push(ch);
            session.apply(ViewCommand::SetSearchQuery(query));
        }
        UiAction::SearchBackspace => {
            let mut query = session.state().search_query.clone();
            if query.pop().is_some() {
                session.apply(ViewCommand::SetSearchQuery(query));
            }
        }
        UiAction::ClearSearch => {
            if !session.apply(ViewCommand::ClearSearchQuery).is_empty() {
                emit_status(view_data, internal_tx, "search cleared");
            }
        }
    }

    clamp_row_cursor(session, view_data);
    false
}

fn action_for_key(focus: Focus, help_visible: bool, key: KeyEvent) -> Option<UiAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(UiAction::Quit),
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => return Some(UiAction::ResetAll),
        (KeyCode::Tab, _) => return Some(UiAction::FocusNext),
        (KeyCode::BackTab, _) => return Some(UiAction::FocusPrev),
        _ => {}
    }

    if help_visible {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') => Some(UiAction::ToggleHelp),
            KeyCode::Char('q') => Some(UiAction::Quit),
            _ => None,
        };
    }

    if focus == Focus::Search {
        return match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                Some(UiAction::ClearSearch)
            }
            (KeyCode::Backspace, _) => Some(UiAction::SearchBackspace),
            (KeyCode::Enter, _) => Some(UiAction::Activate),
            (KeyCode::Char(ch), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                Some(UiAction::SearchInput(ch))
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(UiAction::Quit),
        KeyCode::Char('?') => Some(UiAction::ToggleHelp),
        KeyCode::Char('/') => Some(UiAction::FocusSearch),
        KeyCode::Char('R') => Some(UiAction::ResetAll),
        KeyCode::Char('h') | KeyCode::Left => Some(UiAction::MoveCursor(-1)),
        KeyCode::Char('l') | KeyCode::Right => Some(UiAction::MoveCursor(1)),
        KeyCode::Char('j') | KeyCode::Down if focus == Focus::Table => Some(UiAction::MoveRow(1)),
        KeyCode::Char('k') | KeyCode::Up if focus == Focus::Table => Some(UiAction::MoveRow(-1)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiAction::Activate),
        _ => None,
    }
}

fn step_cursor(cursor: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len as isize - 1;
    (cursor as isize + delta).clamp(0, max) as usize
}

fn move_cursor(session: &Session, view_data: &mut ViewData, delta: isize) {
    match view_data.focus {
        Focus::Owners => {
            let len = session.catalog().users().len() + 1;
            view_data.owner_cursor = step_cursor(view_data.owner_cursor, len, delta);
        }
        Focus::Categories => {
            let len = session.catalog().categories().len() + 1;
            view_data.category_cursor = step_cursor(view_data.category_cursor, len, delta);
        }
        Focus::Table => {
            view_data.column_cursor =
                step_cursor(view_data.column_cursor, SortColumn::ALL.len(), delta);
        }
        Focus::Search => {}
    }
}

/// Clicks the control under the cursor in the focused zone.
fn activate(session: &mut Session, view_data: &mut ViewData) -> Option<String> {
    match view_data.focus {
        Focus::Owners => {
            let command = match view_data.owner_cursor {
                0 => ViewCommand::ClearOwnerFilter,
                index => {
                    let user = session.catalog().users().get(index - 1)?;
                    ViewCommand::SetOwnerFilter(user.name.clone())
                }
            };
            session.apply(command);
            Some(owner_status(session))
        }
        Focus::Categories => {
            let command = match view_data.category_cursor {
                0 => ViewCommand::ClearCategoryFilter,
                index => {
                    let category = session.catalog().categories().get(index - 1)?;
                    ViewCommand::SetCategoryFilter(category.title.clone())
                }
            };
            session.apply(command);
            Some(category_status(session))
        }
        Focus::Table => {
            let column = *SortColumn::ALL.get(view_data.column_cursor)?;
            let events = session.apply(ViewCommand::SetSortColumn(column));
            events.iter().find_map(|event| match event {
                ViewEvent::SortChanged { column, direction } => Some(format!(
                    "sort {} {}",
                    column.label(),
                    direction.as_str()
                )),
                _ => None,
            })
        }
        Focus::Search => {
            view_data.focus = Focus::Table;
            None
        }
    }
}

fn owner_status(session: &Session) -> String {
    match session.state().selected_owner_name.as_str() {
        "" => "owner: all".to_owned(),
        name => format!("owner: {name}"),
    }
}

fn category_status(session: &Session) -> String {
    match session.state().selected_category_title.as_str() {
        "" => "category: all".to_owned(),
        title => format!("category: {title}"),
    }
}

fn clamp_row_cursor(session: &Session, view_data: &mut ViewData) {
    let len = session.visible_rows().len();
    view_data.row_cursor = if len == 0 {
        0
    } else {
        view_data.row_cursor.min(len - 1)
    };
}

fn render(frame: &mut ratatui::Frame<'_>, session: &Session, view_data: &ViewData) {
    let screen = ScreenModel::build(session);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let owners = Paragraph::new(control_line(
        &screen.owners,
        view_data.focus == Focus::Owners,
        view_data.owner_cursor,
    ))
    .block(zone_block(screen.title, view_data.focus == Focus::Owners));
    frame.render_widget(owners, layout[0]);

    let search = Paragraph::new(search_line(&screen, view_data.focus == Focus::Search))
        .block(zone_block("search", view_data.focus == Focus::Search));
    frame.render_widget(search, layout[1]);

    let categories = Paragraph::new(control_line(
        &screen.categories,
        view_data.focus == Focus::Categories,
        view_data.category_cursor,
    ))
    .block(zone_block("categories", view_data.focus == Focus::Categories));
    frame.render_widget(categories, layout[2]);

    let reset = Paragraph::new(format!("[{}]  R / ctrl+r", screen.reset.label))
        .style(Style::default().fg(Color::Blue));
    frame.render_widget(reset, layout[3]);

    render_body(frame, layout[4], &screen, view_data);

    let status = Paragraph::new(status_text(view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, layout[5]);

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn zone_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style)
}

fn control_line(controls: &[FilterControl], focused: bool, cursor: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(controls.len() * 2);
    for (index, control) in controls.iter().enumerate() {
        let mut style = Style::default();
        if control.active {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        if focused && index == cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {} ", control.label), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn search_line(screen: &ScreenModel, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::raw(screen.search.value.clone())];
    if focused {
        spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }
    if screen.search.value.is_empty() && !focused {
        spans = vec![Span::styled("Search", Style::default().fg(Color::DarkGray))];
    }
    if screen.search.clear.is_some() {
        spans.push(Span::styled("  [x] esc", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn render_body(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    screen: &ScreenModel,
    view_data: &ViewData,
) {
    let (headers, rows) = match &screen.body {
        Body::Empty { message, .. } => {
            let empty = Paragraph::new(*message).block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, area);
            return;
        }
        Body::Table { headers, rows, .. } => (headers, rows),
    };

    let table_focused = view_data.focus == Focus::Table;
    let header_cells = headers.iter().enumerate().map(|(index, header)| {
        let mut style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        if table_focused && index == view_data.column_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Cell::from(header_label(header)).style(style)
    });
    let header = Row::new(header_cells);

    let body_rows = rows.iter().enumerate().map(|(row_index, row)| {
        let selected = table_focused && row_index == view_data.row_cursor;
        let cells = row.cells.iter().map(|cell| {
            let mut style = match cell.hook {
                Hook::ProductId => Style::default().add_modifier(Modifier::BOLD),
                Hook::ProductUser => Style::default().fg(tone_color(row.user_tone)),
                _ => Style::default(),
            };
            if selected {
                style = style.bg(Color::DarkGray);
            }
            Cell::from(cell.text.clone()).style(style)
        });
        Row::new(cells.collect::<Vec<_>>())
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Min(12),
        Constraint::Min(18),
        Constraint::Min(10),
    ];
    let table = Table::new(body_rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(format!("products ({})", rows.len()))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn header_label(header: &SortHeader) -> String {
    let glyph = match header.direction {
        prodcat_app::SortDirection::Unsorted => "↕",
        prodcat_app::SortDirection::Asc => "↑",
        prodcat_app::SortDirection::Desc => "↓",
    };
    format!("{} {glyph}", header.label)
}

const fn tone_color(tone: UserTone) -> Color {
    match tone {
        UserTone::Danger => Color::Red,
        UserTone::Link => Color::Blue,
    }
}

fn status_text(view_data: &ViewData) -> String {
    let hint = match view_data.focus {
        Focus::Owners | Focus::Categories => "h/l move  enter select",
        Focus::Search => "type to search  esc clear  enter table",
        Focus::Table => "h/l column  enter sort  j/k rows",
    };
    match &view_data.status_line {
        Some(status) => format!("{status} | {} | {hint} | ? help", view_data.focus.as_str()),
        None => format!("{} | {hint} | tab focus | ? help", view_data.focus.as_str()),
    }
}

fn help_overlay_text() -> &'static str {
    "tab / shift+tab   cycle focus: owners, search, categories, table\n\
     h l / left right  move within the focused row of controls\n\
     enter / space     select owner or category, sort by column\n\
     /                 jump to search\n\
     esc / ctrl+u      clear search (while searching)\n\
     R / ctrl+r        reset all filters and sorting\n\
     j k / up down     move the row cursor in the table\n\
     q / ctrl+c        quit\n\
     ?                 toggle this help"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}
