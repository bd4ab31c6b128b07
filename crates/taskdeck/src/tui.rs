//! Terminal UI for browsing and updating the task board.
//!
//! Pure state transitions live on [`App`] so they can be unit-tested
//! without a terminal; the crossterm/ratatui plumbing stays in [`run`].

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph},
};
use taskdeck_app::{StateStore, TaskBoard};
use taskdeck_core::{Priority, Task, TaskFilter, TaskId, format_date};

/// Input mode of the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Search,
    ConfirmDelete(TaskId),
}

/// What the key handler asks the event loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Continue,
    Quit,
}

/// Color roles resolved from the persisted display mode.
struct Palette {
    bg: Color,
    fg: Color,
    dim: Color,
    accent: Color,
}

const DARK: Palette = Palette {
    bg: Color::Black,
    fg: Color::White,
    dim: Color::DarkGray,
    accent: Color::Cyan,
};

const LIGHT: Palette = Palette {
    bg: Color::White,
    fg: Color::Black,
    dim: Color::Gray,
    accent: Color::Blue,
};

/// Application state shared between the event loop and rendering.
struct App<S: StateStore> {
    board: TaskBoard<S>,
    selected: usize,
    mode: Mode,
    search: String,
    error: Option<String>,
}

impl<S: StateStore> App<S> {
    fn new(board: TaskBoard<S>) -> Self {
        Self {
            board,
            selected: 0,
            mode: Mode::Normal,
            search: String::new(),
            error: None,
        }
    }

    fn filter(&self) -> TaskFilter {
        TaskFilter::builder()
            .with_text((!self.search.is_empty()).then(|| self.search.clone()))
            .build()
    }

    /// Tasks currently visible: the canonical order, narrowed by the search.
    fn visible(&self) -> Vec<&Task> {
        self.board.filtered(&self.filter())
    }

    fn visible_ids(&self) -> Vec<TaskId> {
        self.visible().iter().map(|task| task.id).collect()
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.visible_ids().get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_ids().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn record<T>(&mut self, result: Result<T>) {
        match result {
            Ok(_) => self.error = None,
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> Action {
        match self.mode {
            Mode::Normal => self.handle_normal_key(code),
            Mode::Search => {
                self.handle_search_key(code);
                Action::Continue
            }
            Mode::ConfirmDelete(id) => {
                self.handle_confirm_key(code, id);
                Action::Continue
            }
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    let result = self.board.toggle_status(id);
                    self.record(result);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    self.mode = Mode::ConfirmDelete(id);
                }
            }
            KeyCode::Char('s') => {
                self.board.toggle_sort();
                self.clamp_selection();
            }
            KeyCode::Char('m') => {
                let result = self.board.toggle_dark_mode();
                self.record(result);
            }
            KeyCode::Char('/') => self.mode = Mode::Search,
            _ => {}
        }
        Action::Continue
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.search.clear();
                self.mode = Mode::Normal;
                self.clamp_selection();
            }
            KeyCode::Enter => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                self.search.pop();
                self.clamp_selection();
            }
            KeyCode::Char(c) => {
                self.search.push(c);
                self.clamp_selection();
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode, id: TaskId) {
        if matches!(code, KeyCode::Char('y' | 'Y')) {
            let result = self.board.delete(id);
            self.record(result);
            self.clamp_selection();
        }
        self.mode = Mode::Normal;
    }

    fn select_next(&mut self) {
        let len = self.visible_ids().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn palette(&self) -> &'static Palette {
        if self.board.dark_mode() { &DARK } else { &LIGHT }
    }
}

/// Run the TUI until the user quits.
///
/// # Errors
/// Returns an error if the terminal cannot be configured or drawing fails.
pub fn run<S: StateStore>(board: TaskBoard<S>) -> Result<()> {
    let mut app = App::new(board);
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal);
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) {
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();
}

fn event_loop<S: StateStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;
        if let CrosstermEvent::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key.code) == Action::Quit {
                return Ok(());
            }
        }
    }
}

fn draw<S: StateStore>(frame: &mut ratatui::Frame<'_>, app: &App<S>) {
    let palette = app.palette();
    let base = Style::default().bg(palette.bg).fg(palette.fg);
    frame.render_widget(Block::default().style(base), frame.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(4)])
        .split(frame.area());

    draw_progress(frame, app, rows[0], palette);
    draw_task_list(frame, app, rows[1], palette);
    draw_status(frame, app, rows[2], palette);

    if let Mode::ConfirmDelete(id) = app.mode {
        draw_confirm_popup(frame, app, id, palette);
    }
}

fn draw_progress<S: StateStore>(
    frame: &mut ratatui::Frame<'_>,
    app: &App<S>,
    area: Rect,
    palette: &Palette,
) {
    let stats = app.board.stats();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    " {} total / {} pending / {} completed ",
                    stats.total, stats.pending, stats.completed
                )),
        )
        .gauge_style(Style::default().fg(palette.accent).bg(palette.bg))
        .percent(u16::from(stats.progress_percent))
        .label(format!("{}% complete", stats.progress_percent));
    frame.render_widget(gauge, area);
}

fn draw_task_list<S: StateStore>(
    frame: &mut ratatui::Frame<'_>,
    app: &App<S>,
    area: Rect,
    palette: &Palette,
) {
    let visible = app.visible();
    let items: Vec<ListItem<'_>> = if visible.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No tasks found. Add a new task or adjust filters.",
            Style::default().fg(palette.dim),
        )))]
    } else {
        visible
            .iter()
            .map(|task| ListItem::new(task_row(task, palette)))
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tasks "))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(palette.accent))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.selected.min(visible.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn task_row<'a>(task: &'a Task, palette: &Palette) -> Line<'a> {
    let mut title_style = Style::default();
    if task.status.is_completed() {
        title_style = title_style.fg(palette.dim).add_modifier(Modifier::CROSSED_OUT);
    }
    let due = task
        .due_date
        .map_or_else(|| "no due date".to_owned(), format_date);

    Line::from(vec![
        Span::styled(
            format!("[{}] ", task.priority.as_str()),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::styled(task.title.clone(), title_style),
        Span::styled(format!("  due {due}"), Style::default().fg(palette.dim)),
    ])
}

const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

fn draw_status<S: StateStore>(
    frame: &mut ratatui::Frame<'_>,
    app: &App<S>,
    area: Rect,
    palette: &Palette,
) {
    let mode_line = match app.mode {
        Mode::Search => Line::from(format!("search: {}_  (enter keep, esc clear)", app.search)),
        _ => Line::from(format!(
            "q quit  j/k move  space toggle  d delete  s sort ({})  m {} mode  / search",
            app.board.sort(),
            if app.board.dark_mode() { "light" } else { "dark" },
        )),
    };

    let second_line = app.error.as_ref().map_or_else(
        || {
            if app.search.is_empty() {
                Line::from(Span::styled("", Style::default()))
            } else {
                Line::from(Span::styled(
                    format!("filtering: \"{}\"", app.search),
                    Style::default().fg(palette.dim),
                ))
            }
        },
        |err| Line::from(Span::styled(err.clone(), Style::default().fg(Color::Red))),
    );

    let paragraph = Paragraph::new(vec![mode_line, second_line])
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_confirm_popup<S: StateStore>(
    frame: &mut ratatui::Frame<'_>,
    app: &App<S>,
    id: TaskId,
    palette: &Palette,
) {
    let title = app
        .board
        .get(id)
        .map_or_else(|| id.to_string(), |task| task.title.clone());
    let area = centered_rect(50, 3, frame.area());
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(format!("Delete '{title}'? y/N"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" confirm ")
                .style(Style::default().bg(palette.bg).fg(palette.fg)),
        );
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
    use taskdeck_app::TaskDraft;
    use taskdeck_core::SortKey;

    #[derive(Clone, Default)]
    struct MemStore {
        inner: Arc<MemStoreInner>,
    }

    #[derive(Default)]
    struct MemStoreInner {
        tasks: Mutex<Vec<Task>>,
        dark: Mutex<bool>,
        fail_writes: Mutex<bool>,
    }

    impl StateStore for MemStore {
        fn load_tasks(&self) -> Vec<Task> {
            guard(&self.inner.tasks).clone()
        }

        fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
            if *guard(&self.inner.fail_writes) {
                return Err(anyhow!("disk full"));
            }
            *guard(&self.inner.tasks) = tasks.to_vec();
            Ok(())
        }

        fn load_dark_mode(&self) -> bool {
            *guard(&self.inner.dark)
        }

        fn save_dark_mode(&self, dark: bool) -> Result<()> {
            *guard(&self.inner.dark) = dark;
            Ok(())
        }
    }

    fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn app_with_titles(titles: &[&str]) -> App<MemStore> {
        let store = MemStore::default();
        let mut board = TaskBoard::open(store, SortKey::Priority);
        for title in titles {
            board
                .create(TaskDraft {
                    title: (*title).to_owned(),
                    ..TaskDraft::default()
                })
                .unwrap_or_else(|err| panic!("create: {err}"));
        }
        App::new(board)
    }

    #[test]
    fn q_quits_and_other_keys_continue() {
        let mut app = app_with_titles(&["a"]);
        assert_eq!(app.handle_key(KeyCode::Char('x')), Action::Continue);
        assert_eq!(app.handle_key(KeyCode::Char('q')), Action::Quit);
    }

    #[test]
    fn selection_moves_within_bounds() {
        let mut app = app_with_titles(&["a", "b"]);
        assert_eq!(app.selected, 0);
        app.handle_key(KeyCode::Char('j'));
        assert_eq!(app.selected, 1);
        app.handle_key(KeyCode::Char('j'));
        assert_eq!(app.selected, 1);
        app.handle_key(KeyCode::Char('k'));
        assert_eq!(app.selected, 0);
        app.handle_key(KeyCode::Char('k'));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn space_toggles_the_selected_task() {
        let mut app = app_with_titles(&["flip me"]);
        app.handle_key(KeyCode::Char(' '));
        assert!(app.board.all()[0].status.is_completed());
        app.handle_key(KeyCode::Char(' '));
        assert!(!app.board.all()[0].status.is_completed());
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = app_with_titles(&["keep", "drop"]);
        app.handle_key(KeyCode::Char('j'));
        app.handle_key(KeyCode::Char('d'));
        assert!(matches!(app.mode, Mode::ConfirmDelete(_)));

        // Declining keeps the task.
        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.board.all().len(), 2);

        // Confirming removes it and the selection stays in bounds.
        app.handle_key(KeyCode::Char('d'));
        app.handle_key(KeyCode::Char('y'));
        assert_eq!(app.board.all().len(), 1);
        assert_eq!(app.board.all()[0].title, "keep");
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn search_narrows_the_visible_list() {
        let mut app = app_with_titles(&["water plants", "file taxes"]);
        app.handle_key(KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        for c in "tax".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        assert_eq!(app.visible().len(), 1);
        assert_eq!(app.visible()[0].title, "file taxes");

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.visible().len(), 1);

        // Esc from search clears the filter.
        app.handle_key(KeyCode::Char('/'));
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.visible().len(), 2);
    }

    #[test]
    fn sort_key_toggles_from_the_keyboard() {
        let mut app = app_with_titles(&["a"]);
        assert_eq!(app.board.sort(), SortKey::Priority);
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.board.sort(), SortKey::DueDate);
    }

    #[test]
    fn dark_mode_key_switches_the_palette() {
        let mut app = app_with_titles(&[]);
        assert!(!app.board.dark_mode());
        app.handle_key(KeyCode::Char('m'));
        assert!(app.board.dark_mode());
    }

    #[test]
    fn write_failures_land_in_the_status_line() {
        let store = MemStore::default();
        let mut board = TaskBoard::open(store.clone(), SortKey::Priority);
        board
            .create(TaskDraft {
                title: "doomed".into(),
                ..TaskDraft::default()
            })
            .unwrap_or_else(|err| panic!("create: {err}"));
        let mut app = App::new(board);

        *guard(&store.inner.fail_writes) = true;
        app.handle_key(KeyCode::Char(' '));
        assert!(app.error.as_deref().is_some_and(|msg| msg.contains("disk full")));

        // The next successful action clears the message.
        *guard(&store.inner.fail_writes) = false;
        app.handle_key(KeyCode::Char(' '));
        assert!(app.error.is_none());
    }

    #[test]
    fn toggle_with_no_tasks_is_harmless() {
        let mut app = app_with_titles(&[]);
        assert_eq!(app.handle_key(KeyCode::Char(' ')), Action::Continue);
        assert_eq!(app.handle_key(KeyCode::Char('d')), Action::Continue);
        assert_eq!(app.mode, Mode::Normal);
    }
}
