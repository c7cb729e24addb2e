use std::io::{Stdout, stdout};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use jiff::Zoned;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::{
    models::screen::ScreenState,
    services::tasks::{self, AddTaskError, AddTaskParameters},
    storage::Storage,
};

pub mod dialog;
pub mod row;

use dialog::{AddTaskDialog, DialogOutcome};

/// Runs the screen until the user quits, restoring the terminal afterwards.
pub fn run(screen: ScreenState, storage: impl Storage) -> std::io::Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = TaskListScreen::new(screen, storage);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

pub struct TaskListScreen<S: Storage> {
    screen: ScreenState,
    storage: S,
    /// Index into the visible list. Ephemeral, never persisted.
    selected: usize,
    dialog: AddTaskDialog,
    /// Blocking error message; swallows all input until dismissed
    alert: Option<String>,
}

impl<S: Storage> TaskListScreen<S> {
    pub fn new(screen: ScreenState, storage: S) -> Self {
        Self {
            screen,
            storage,
            selected: 0,
            dialog: AddTaskDialog::new(),
            alert: None,
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> std::io::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if self.handle_key(key) {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Routes one key press; returns true when the user quits.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.alert.is_some() {
            self.handle_alert_key(key);
            return false;
        }
        if self.screen.show_add_task {
            self.handle_dialog_key(key);
            return false;
        }
        self.handle_list_key(key)
    }

    fn handle_alert_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.alert = None;
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match self.dialog.handle_key(key) {
            DialogOutcome::Pending => {}
            DialogOutcome::Cancelled => {
                self.screen.show_add_task = false;
                self.dialog = AddTaskDialog::new();
            }
            DialogOutcome::Saved {
                description,
                estimated_at,
            } => {
                let parameters = AddTaskParameters {
                    description,
                    estimated_at,
                };
                match tasks::add_task(&mut self.screen, &self.storage, parameters) {
                    Ok(_) => {
                        self.dialog = AddTaskDialog::new();
                        self.select_last();
                    }
                    Err(e @ AddTaskError::Storage(_)) => {
                        // The task made it onto the list, only the write
                        // failed. The dialog is already closed.
                        self.dialog = AddTaskDialog::new();
                        self.select_last();
                        self.alert = Some(e.to_string());
                    }
                    // Validation failures keep the dialog open with the
                    // inputs intact behind the alert.
                    Err(e) => self.alert = Some(e.to_string()),
                }
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('f') => self.toggle_filter(),
            KeyCode::Char('a') => self.open_add_dialog(),
            _ => {}
        }
        false
    }

    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.screen.visible_tasks.len() {
            self.selected += 1;
        }
    }

    fn select_last(&mut self) {
        self.selected = self.screen.visible_tasks.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self
            .selected
            .min(self.screen.visible_tasks.len().saturating_sub(1));
    }

    fn toggle_selected(&mut self) {
        let Some(task) = self.screen.visible_tasks.get(self.selected) else {
            return;
        };
        let id = task.id;
        if let Err(e) = tasks::toggle_task(&mut self.screen, &self.storage, id) {
            self.alert = Some(e.to_string());
        }
        self.clamp_selection();
    }

    fn delete_selected(&mut self) {
        let Some(task) = self.screen.visible_tasks.get(self.selected) else {
            return;
        };
        let id = task.id;
        if let Err(e) = tasks::delete_task(&mut self.screen, &self.storage, id) {
            self.alert = Some(e.to_string());
        }
        self.clamp_selection();
    }

    fn toggle_filter(&mut self) {
        if let Err(e) = tasks::toggle_filter(&mut self.screen, &self.storage) {
            self.alert = Some(e.to_string());
        }
        self.clamp_selection();
    }

    fn open_add_dialog(&mut self) {
        self.dialog = AddTaskDialog::new();
        self.screen.show_add_task = true;
    }

    fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.draw_header(f, layout[0]);
        self.draw_list(f, layout[1]);
        self.draw_footer(f, layout[2]);

        if self.screen.show_add_task {
            self.dialog.render(f);
        }
        if let Some(message) = &self.alert {
            draw_alert(f, message);
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let today = Zoned::now().strftime("%a, %b %d").to_string();
        let filter = if self.screen.show_done_tasks {
            "showing done tasks"
        } else {
            "hiding done tasks"
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    "Today",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(today, Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(Span::styled(filter, Style::default().fg(Color::DarkGray))),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }

    fn draw_list(&self, f: &mut Frame<'_>, area: Rect) {
        let visible = &self.screen.visible_tasks;
        let items: Vec<ListItem> = if visible.is_empty() {
            vec![ListItem::new(Span::styled(
                "No tasks",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            visible.iter().map(row::task_row).collect()
        };

        let mut state = ListState::default();
        if !visible.is_empty() {
            state.select(Some(self.selected.min(visible.len() - 1)));
        }

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(
                Style::default()
                    .bg(Color::LightCyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let key_style = Style::default().fg(Color::LightCyan);
        let hints = Line::from(vec![
            Span::styled("a", key_style),
            Span::raw(" add  "),
            Span::styled("space", key_style),
            Span::raw(" toggle  "),
            Span::styled("d", key_style),
            Span::raw(" delete  "),
            Span::styled("f", key_style),
            Span::raw(" filter  "),
            Span::styled("q", key_style),
            Span::raw(" quit"),
        ]);
        f.render_widget(Paragraph::new(hints).alignment(Alignment::Center), area);
    }
}

fn draw_alert(f: &mut Frame<'_>, message: &str) {
    let area = centered_rect(50, 25, f.area());
    let body = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::Gray),
        )),
    ];
    let alert = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(
                    "Error",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed)),
        );
    f.render_widget(Clear, area);
    f.render_widget(alert, area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn setup_terminal() -> std::io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
