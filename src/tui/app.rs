//! Interactive task board.
//!
//! `App` owns the task store and keeps two derived views of it: kanban
//! columns of task ids and list rows of task ids. Both are rebuilt whenever the
//! store reports a committed change, or the search text or status filter moves.
//! Cards are moved by picking one up with `Space`, steering the cursor to a
//! column or another card, and pressing `Space` again, which is turned into a
//! drop event and resolved like any other.

use std::cell::Cell;
use std::rc::Rc;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{self, Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use tracing::debug;

use crate::board::{filter, status_counts, TaskFilter};
use crate::dnd::{self, DropEvent, DropTarget};
use crate::fields::{Status, StatusFilter, ViewMode};
use crate::format::format_assignees;
use crate::storage::{FileStore, KeyValueStore};
use crate::store::TaskStore;
use crate::task::Task;
use crate::tui::{
    colors::{priority_color, status_color},
    enums::{AppState, Drag},
    input::InputField,
    task_form::*,
};
use crate::validate::FormField;

const CARD_HEIGHT: u16 = 5;

/// Board application state.
pub struct App<S = FileStore> {
    store: TaskStore<S>,
    /// Set by the store subscription, cleared when the views are rebuilt.
    dirty: Rc<Cell<bool>>,
    state: AppState,
    view: ViewMode,
    search: InputField,
    status_filter: StatusFilter,
    columns: [Vec<String>; 3],
    rows: Vec<String>,
    selected_column: usize,
    selected_card: usize,
    selected_row: usize,
    drag: Option<Drag>,
    form: Option<TaskForm>,
    status_message: String,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(mut store: TaskStore<S>, view: ViewMode) -> Self {
        let dirty = Rc::new(Cell::new(false));
        let flag = Rc::clone(&dirty);
        store.subscribe(move |event, _| {
            debug!(?event, "store changed");
            flag.set(true);
        });

        let mut app = App {
            store,
            dirty,
            state: AppState::Board,
            view,
            search: InputField::new(),
            status_filter: StatusFilter::All,
            columns: Default::default(),
            rows: Vec::new(),
            selected_column: 0,
            selected_card: 0,
            selected_row: 0,
            drag: None,
            form: None,
            status_message: String::new(),
        };
        app.refresh();
        app
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Task ids per kanban column, after search.
    pub fn columns(&self) -> &[Vec<String>; 3] {
        &self.columns
    }

    /// Task ids in the list view, after search and status filter.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn dragging(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    /// Rebuild both views from the store.
    fn refresh(&mut self) {
        let tasks = self.store.tasks();
        let search = self.search.value.clone();

        let mut columns: [Vec<String>; 3] = Default::default();
        for task in filter(tasks, &TaskFilter::new(search.clone(), StatusFilter::All)) {
            columns[task.status.index()].push(task.id.clone());
        }
        self.columns = columns;
        self.rows = filter(tasks, &TaskFilter::new(search, self.status_filter))
            .into_iter()
            .map(|t| t.id.clone())
            .collect();
        self.clamp_selection();
    }

    /// Rebuild the views if the store changed since the last rebuild.
    fn sync(&mut self) {
        if self.dirty.replace(false) {
            self.refresh();
        }
    }

    fn clamp_selection(&mut self) {
        let column_len = self.columns[self.selected_column].len();
        self.selected_card = self.selected_card.min(column_len.saturating_sub(1));
        self.selected_row = self.selected_row.min(self.rows.len().saturating_sub(1));
    }

    /// Move the cursor onto `id` in whichever view is showing.
    fn select_task(&mut self, id: &str) {
        for (col, ids) in self.columns.iter().enumerate() {
            if let Some(card) = ids.iter().position(|i| i == id) {
                self.selected_column = col;
                self.selected_card = card;
            }
        }
        if let Some(row) = self.rows.iter().position(|i| i == id) {
            self.selected_row = row;
        }
    }

    fn selected_id(&self) -> Option<&str> {
        let id = match self.view {
            ViewMode::Kanban => self.columns[self.selected_column].get(self.selected_card),
            ViewMode::List => self.rows.get(self.selected_row),
        };
        id.map(String::as_str)
    }

    fn selected_task(&self) -> Option<&Task> {
        self.selected_id().and_then(|id| self.store.get(id))
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Handle one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        let quit = match self.state {
            AppState::Board => self.handle_board_key(key),
            AppState::Search => {
                self.handle_search_key(key);
                false
            }
            AppState::CreateTask => {
                self.handle_form_key(key);
                false
            }
            AppState::ConfirmDelete => {
                self.handle_confirm_key(key);
                false
            }
            AppState::Detail | AppState::Help => {
                self.state = AppState::Board;
                false
            }
        };
        self.sync();
        quit
    }

    fn handle_board_key(&mut self, key: KeyEvent) -> bool {
        if self.drag.is_some() {
            return self.handle_drag_key(key);
        }
        self.status_message.clear();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => {
                self.view = self.view.toggled();
                self.clamp_selection();
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => self.move_cursor(key.code),
            KeyCode::Char(' ') if self.view == ViewMode::Kanban => self.pick_up(),
            KeyCode::Char(c @ '1'..='4') if self.view == ViewMode::List => {
                let idx = c as usize - '1' as usize;
                self.status_filter = StatusFilter::ALL[idx];
                self.selected_row = 0;
                self.refresh();
            }
            KeyCode::Char('/') => {
                self.state = AppState::Search;
            }
            KeyCode::Char('n') => {
                let status = match self.view {
                    ViewMode::Kanban => Status::ALL[self.selected_column],
                    ViewMode::List => self.status_filter.status().unwrap_or_default(),
                };
                self.form = Some(TaskForm::new(status));
                self.state = AppState::CreateTask;
            }
            KeyCode::Char('a') => self.advance_selected(),
            KeyCode::Char('d') => {
                if self.selected_id().is_some() {
                    self.state = AppState::ConfirmDelete;
                }
            }
            KeyCode::Enter => {
                if self.selected_id().is_some() {
                    self.state = AppState::Detail;
                }
            }
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_drag_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => self.cancel_drag(),
            KeyCode::Char(' ') | KeyCode::Enter => self.drop_card(),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => self.move_cursor(key.code),
            _ => {}
        }
        false
    }

    fn move_cursor(&mut self, code: KeyCode) {
        match (self.view, code) {
            (ViewMode::Kanban, KeyCode::Left) => {
                self.selected_column = self.selected_column.saturating_sub(1);
                self.clamp_selection();
            }
            (ViewMode::Kanban, KeyCode::Right) => {
                self.selected_column = (self.selected_column + 1).min(self.columns.len() - 1);
                self.clamp_selection();
            }
            (ViewMode::Kanban, KeyCode::Up) => self.selected_card = self.selected_card.saturating_sub(1),
            (ViewMode::Kanban, KeyCode::Down) => {
                if self.selected_card + 1 < self.columns[self.selected_column].len() {
                    self.selected_card += 1;
                }
            }
            (ViewMode::List, KeyCode::Up) => self.selected_row = self.selected_row.saturating_sub(1),
            (ViewMode::List, KeyCode::Down) => {
                if self.selected_row + 1 < self.rows.len() {
                    self.selected_row += 1;
                }
            }
            _ => {}
        }
    }

    fn pick_up(&mut self) {
        let Some(id) = self.selected_id().map(str::to_string) else {
            self.set_status_message("No card to move");
            return;
        };
        self.set_status_message(format!("Moving #{id}: arrows to aim, Space to drop, Esc to cancel"));
        self.drag = Some(Drag {
            task_id: id,
            origin_column: self.selected_column,
        });
    }

    /// Drop the carried card on the card under the cursor, or on the column
    /// itself when the column is empty or the cursor is on the carried card.
    fn drop_card(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let status = Status::ALL[self.selected_column];
        let over = match self.columns[self.selected_column].get(self.selected_card) {
            Some(id) if *id != drag.task_id => DropTarget::Task(id.clone()),
            _ => DropTarget::Column(status),
        };
        match dnd::apply(&mut self.store, &DropEvent::new(drag.task_id.clone(), Some(over))) {
            Some(change) => {
                self.sync();
                self.select_task(&change.task_id);
                self.set_status_message(format!("Moved #{} to {}", change.task_id, change.to));
            }
            None => self.set_status_message(format!("#{} stays in {}", drag.task_id, Status::ALL[drag.origin_column])),
        }
    }

    /// A drop with no target: resolves to no change.
    fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            dnd::apply(&mut self.store, &DropEvent::new(drag.task_id, None));
            self.selected_column = drag.origin_column;
            self.clamp_selection();
            self.set_status_message("Move cancelled");
        }
    }

    fn advance_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, status) = (task.id.clone(), task.status);
        if status == Status::Complete {
            self.set_status_message(format!("#{id} is already complete"));
            return;
        }
        if let Some(change) = dnd::apply(&mut self.store, &DropEvent::onto_column(id, status.next())) {
            self.sync();
            self.select_task(&change.task_id);
            self.set_status_message(format!("#{} is now {}", change.task_id, change.to));
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search.clear();
                self.state = AppState::Board;
                self.status_message.clear();
            }
            KeyCode::Enter => {
                self.state = AppState::Board;
                if self.search.value.is_empty() {
                    self.set_status_message("Search cleared");
                } else {
                    let shown: usize = self.columns.iter().map(Vec::len).sum();
                    self.set_status_message(format!("Search: '{}' ({shown} tasks shown)", self.search.value));
                }
                return;
            }
            KeyCode::Backspace => self.search.handle_backspace(),
            KeyCode::Delete => self.search.handle_delete(),
            KeyCode::Left => self.search.move_cursor_left(),
            KeyCode::Right => self.search.move_cursor_right(),
            KeyCode::Char(c) => self.search.handle_char(c),
            _ => return,
        }
        self.refresh();
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            self.state = AppState::Board;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                self.state = AppState::Board;
                self.set_status_message("Create cancelled");
            }
            KeyCode::Enter => {
                if let Some(draft) = form.submit(Local::now().date_naive()) {
                    let task = self.store.create(draft);
                    self.form = None;
                    self.state = AppState::Board;
                    self.sync();
                    self.select_task(&task.id);
                    self.set_status_message(format!("Created task #{}", task.id));
                }
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.handle_left_right(false),
            KeyCode::Right => form.handle_left_right(true),
            KeyCode::Backspace => form.handle_backspace(),
            KeyCode::Char(c) => form.handle_char(c),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        self.state = AppState::Board;
        if !matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            self.set_status_message("Delete cancelled");
            return;
        }
        let Some(id) = self.selected_id().map(str::to_string) else {
            return;
        };
        match self.store.delete(&id) {
            Ok(task) => self.set_status_message(format!("Deleted task #{} ({})", task.id, task.title)),
            Err(e) => self.set_status_message(e.to_string()),
        }
    }

    /// Draw the whole screen.
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board or list
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        match self.view {
            ViewMode::Kanban => self.render_board(f, chunks[1]),
            ViewMode::List => self.render_list(f, chunks[1]),
        }
        self.render_status_bar(f, chunks[2]);

        match self.state {
            AppState::CreateTask => self.render_form(f),
            AppState::ConfirmDelete => self.render_confirm(f),
            AppState::Detail => self.render_detail(f),
            AppState::Help => self.render_help(f),
            AppState::Board | AppState::Search => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let view = match self.view {
            ViewMode::Kanban => "Kanban",
            ViewMode::List => "List",
        };
        let mut spans = vec![
            Span::styled("TASK BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  View: {view}  ")),
            Span::styled("Search: ", Style::default().fg(Color::Cyan)),
        ];
        let searching = self.state == AppState::Search;
        if self.search.value.is_empty() && !searching {
            spans.push(Span::styled("(press /)", Style::default().fg(Color::DarkGray)));
        } else {
            spans.push(Span::raw(self.search.value.clone()));
        }

        let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        f.render_widget(header, area);

        if searching {
            let prefix = "TASK BOARD".len() + format!("  View: {view}  ").len() + "Search: ".len();
            let x = area.x + 1 + (prefix + self.search.cursor()) as u16;
            f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    fn render_board(&self, f: &mut Frame, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(area);

        for (i, &column_area) in layout.iter().enumerate() {
            self.render_column(f, column_area, i);
        }
    }

    fn render_column(&self, f: &mut Frame, area: Rect, column_index: usize) {
        let status = Status::ALL[column_index];
        let color = status_color(status);
        let is_selected = column_index == self.selected_column;
        let ids = &self.columns[column_index];

        let border_style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ({}) ", status.title(), ids.len()))
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        if ids.is_empty() {
            let empty = Paragraph::new("No tasks yet")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(empty, inner);
            return;
        }

        let visible = usize::from((inner.height / CARD_HEIGHT).max(1));
        let offset = if is_selected {
            (self.selected_card + 1).saturating_sub(visible)
        } else {
            0
        };

        let mut y = inner.y;
        for (card_index, id) in ids.iter().enumerate().skip(offset).take(visible) {
            let Some(task) = self.store.get(id) else {
                continue;
            };
            if y + CARD_HEIGHT > inner.bottom() {
                break;
            }
            let card_area = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
            self.render_card(f, card_area, task, is_selected && card_index == self.selected_card);
            y += CARD_HEIGHT;
        }

        let below = ids.len().saturating_sub(offset + visible);
        if below > 0 && inner.height > 0 {
            let more = Paragraph::new(format!("▼ +{below} below")).style(Style::default().fg(Color::Cyan));
            f.render_widget(more, Rect::new(inner.x, inner.bottom() - 1, inner.width, 1));
        }
    }

    fn render_card(&self, f: &mut Frame, area: Rect, task: &Task, is_cursor: bool) {
        let carried = self.drag.as_ref().is_some_and(|d| d.task_id == task.id);
        let accent = status_color(task.status);

        let mut style = Style::default();
        let mut border = Style::default().fg(Color::DarkGray);
        if is_cursor {
            border = Style::default().fg(accent).add_modifier(Modifier::BOLD);
            if self.drag.is_none() {
                style = style.bg(accent).fg(Color::Black);
            }
        }
        if carried {
            style = style.add_modifier(Modifier::ITALIC | Modifier::DIM);
        }

        let title = if carried {
            format!("↕ #{} {}", task.id, task.title)
        } else {
            format!("#{} {}", task.id, task.title)
        };
        let lines = vec![
            Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(task.date_range()),
            Line::from(vec![
                Span::styled(task.priority.as_str(), Style::default().fg(priority_color(task.priority))),
                Span::raw(" | "),
                Span::raw(format_assignees(&task.assignees)),
            ]),
        ];

        let card = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).border_style(border))
            .style(style);
        f.render_widget(card, area);
    }

    fn render_list(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let counts = status_counts(self.store.tasks());
        let mut buttons = Vec::new();
        for (i, &filter) in StatusFilter::ALL.iter().enumerate() {
            let label = format!(" {} {} ({}) ", i + 1, filter.label(), counts.for_filter(filter));
            let color = filter.status().map_or(Color::White, status_color);
            let style = if filter == self.status_filter {
                Style::default().bg(color).fg(Color::Black).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            buttons.push(Span::styled(label, style));
            buttons.push(Span::raw(" "));
        }
        f.render_widget(Paragraph::new(Line::from(buttons)), chunks[0]);

        let header = Row::new(["ID", "Title", "Dates", "Assignees", "Priority", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self
            .rows
            .iter()
            .filter_map(|id| self.store.get(id))
            .map(|t| {
                Row::new(vec![
                    widgets::Cell::from(t.id.clone()),
                    widgets::Cell::from(t.title.clone()),
                    widgets::Cell::from(t.date_range()),
                    widgets::Cell::from(format_assignees(&t.assignees)),
                    widgets::Cell::from(t.priority.as_str()).style(Style::default().fg(priority_color(t.priority))),
                    widgets::Cell::from(t.status.title()).style(Style::default().fg(status_color(t.status))),
                ])
            })
            .collect();

        let empty = rows.is_empty();
        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Min(20),
                Constraint::Length(24),
                Constraint::Length(20),
                Constraint::Length(10),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Tasks "))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = TableState::default().with_selected((!empty).then_some(self.selected_row));
        f.render_stateful_widget(table, chunks[1], &mut state);

        if empty {
            let inner = Rect::new(chunks[1].x + 1, chunks[1].y + 2, chunks[1].width.saturating_sub(2), 1);
            f.render_widget(
                Paragraph::new("No tasks found").alignment(Alignment::Center),
                inner.intersection(chunks[1]),
            );
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if self.state == AppState::Search {
            "Type to search titles | Enter: apply | Esc: clear".to_string()
        } else if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let hint = match self.view {
                ViewMode::Kanban => "Space: move",
                ViewMode::List => "1-4: filter",
            };
            format!(
                "Tasks: {} | {hint} | n: new | a: advance | d: delete | /: search | Tab: view | h: help | q: quit",
                self.store.len()
            )
        };
        let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
        f.render_widget(bar, area);
    }

    fn render_form(&self, f: &mut Frame) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let area = popup_area(f.area(), 70, 80);
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" New Task (Enter: save, Esc: cancel) ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(status_color(form.selected_status())));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let text_field = |label: &str, input: &InputField, order: usize| (label.to_string(), input.value.clone(), order);
        let fields = [
            text_field("Title", &form.title, TITLE_ORDER),
            ("Status".to_string(), format!("< {} >", form.selected_status().title()), STATUS_ORDER),
            text_field("Start date", &form.start_date, START_DATE_ORDER),
            text_field("End date", &form.end_date, END_DATE_ORDER),
            text_field("Assignees", &form.assignees, ASSIGNEES_ORDER),
            ("Priority".to_string(), format!("< {} >", form.selected_priority()), PRIORITY_ORDER),
            text_field("Description", &form.description, DESCRIPTION_ORDER),
        ];

        let mut lines = Vec::new();
        let mut cursor = None;
        for (label, value, order) in fields {
            let active = form.current_field == order;
            let label_style = if active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if active && !TaskForm::is_selector(order) {
                let input = match order {
                    TITLE_ORDER => &form.title,
                    START_DATE_ORDER => &form.start_date,
                    END_DATE_ORDER => &form.end_date,
                    ASSIGNEES_ORDER => &form.assignees,
                    _ => &form.description,
                };
                cursor = Some((14 + input.cursor() as u16, lines.len() as u16));
            }
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<12}: "), label_style),
                Span::raw(value),
            ]));

            let field = match order {
                TITLE_ORDER => Some(FormField::Title),
                START_DATE_ORDER => Some(FormField::StartDate),
                END_DATE_ORDER => Some(FormField::EndDate),
                _ => None,
            };
            if let Some(err) = field.and_then(|field| form.error_for(field)) {
                lines.push(Line::from(Span::styled(
                    format!("              {err}"),
                    Style::default().fg(Color::Red),
                )));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Tab/↑↓: field | ←→: change selection | blank dates default to today | assignees comma-separated",
            Style::default().fg(Color::DarkGray),
        )));

        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        if let Some((x, y)) = cursor {
            if y < inner.height {
                f.set_cursor_position((inner.x + x.min(inner.width.saturating_sub(1)), inner.y + y));
            }
        }
    }

    fn render_confirm(&self, f: &mut Frame) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let area = popup_area(f.area(), 50, 20);
        f.render_widget(Clear, area);
        let text = vec![
            Line::from(format!("Delete task #{} \"{}\"?", task.id, task.title)),
            Line::from(""),
            Line::from("y: delete | any other key: cancel"),
        ];
        let popup = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Confirm ")
                    .border_style(Style::default().fg(Color::Red)),
            );
        f.render_widget(popup, area);
    }

    fn render_detail(&self, f: &mut Frame) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let area = popup_area(f.area(), 70, 60);
        f.render_widget(Clear, area);

        let lines = vec![
            Line::from(Span::styled(
                format!("Task #{}: {}", task.id, task.title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Status:       "),
                Span::styled(task.status.title(), Style::default().fg(status_color(task.status))),
            ]),
            Line::from(vec![
                Span::raw("Priority:     "),
                Span::styled(task.priority.as_str(), Style::default().fg(priority_color(task.priority))),
            ]),
            Line::from(format!("Start:        {}", task.start_date)),
            Line::from(format!("End:          {}", task.end_date)),
            Line::from(format!("Assignees:    {}", format_assignees(&task.assignees))),
            Line::from(""),
            Line::from("Description:"),
            Line::from(task.description.as_deref().unwrap_or("-").to_string()),
        ];
        let popup = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Task Details (any key to close) ")
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(status_color(task.status))),
            );
        f.render_widget(popup, area);
    }

    fn render_help(&self, f: &mut Frame) {
        let area = popup_area(f.area(), 60, 70);
        f.render_widget(Clear, area);
        let keys = [
            ("←→↑↓", "Move the cursor"),
            ("Space", "Pick up / drop a card (kanban)"),
            ("Esc", "Cancel a move, or quit"),
            ("1-4", "Filter: all, to do, in progress, complete (list)"),
            ("Tab", "Switch kanban / list"),
            ("/", "Search titles"),
            ("Enter", "Task details"),
            ("n", "New task"),
            ("a", "Advance task to the next status"),
            ("d", "Delete task"),
            ("q", "Quit"),
        ];
        let lines: Vec<Line> = keys
            .iter()
            .map(|(k, desc)| {
                Line::from(vec![
                    Span::styled(format!("{k:<8}"), Style::default().fg(Color::Yellow)),
                    Span::raw(*desc),
                ])
            })
            .collect();
        let popup = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help "));
        f.render_widget(popup, area);
    }
}

/// Centered rectangle covering the given percentages of `area`.
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    // Widened so wide terminals cannot overflow; the result never exceeds `area`.
    let scale = |len: u16, percent: u16| (u32::from(len) * u32::from(percent.min(100)) / 100) as u16;
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
