use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jiff::Zoned;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;

/// What a key press did to the dialog.
#[derive(Debug, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Input was consumed, keep editing
    Pending,
    /// User backed out; the inputs should be discarded
    Cancelled,
    /// User submitted; both fields carried as typed
    Saved {
        description: String,
        estimated_at: String,
    },
}

/// Single-line text input with a byte-offset cursor.
#[derive(Clone)]
pub struct FieldValue {
    pub value: String,
    pub cursor: usize,
}

impl FieldValue {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor = prev_boundary(&self.value, self.cursor);
    }

    fn move_right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor = next_boundary(&self.value, self.cursor);
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_boundary(&self.value, self.cursor);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }
}

fn prev_boundary(value: &str, cursor: usize) -> usize {
    value[..cursor]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_boundary(value: &str, cursor: usize) -> usize {
    value[cursor..]
        .chars()
        .next()
        .map(|c| cursor + c.len_utf8())
        .unwrap_or(cursor)
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum DialogField {
    Description,
    Date,
}

/// The add-task modal. Owns only the in-progress inputs; whether it is
/// shown lives on the screen state.
pub struct AddTaskDialog {
    pub description: FieldValue,
    pub estimated_at: FieldValue,
    field: DialogField,
}

impl AddTaskDialog {
    /// Fresh dialog: empty description, estimate pre-filled with today.
    pub fn new() -> Self {
        Self {
            description: FieldValue::new(""),
            estimated_at: FieldValue::new(&Zoned::now().date().to_string()),
            field: DialogField::Description,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        match key.code {
            KeyCode::Esc => return DialogOutcome::Cancelled,
            KeyCode::Enter => {
                return DialogOutcome::Saved {
                    description: self.description.value.clone(),
                    estimated_at: self.estimated_at.value.clone(),
                };
            }
            KeyCode::Tab | KeyCode::BackTab => self.switch_field(),
            KeyCode::Left => self.active_field_mut().move_left(),
            KeyCode::Right => self.active_field_mut().move_right(),
            KeyCode::Backspace => self.active_field_mut().backspace(),
            KeyCode::Char(c) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.active_field_mut().insert_char(c);
                }
            }
            _ => {}
        }
        DialogOutcome::Pending
    }

    fn switch_field(&mut self) {
        self.field = match self.field {
            DialogField::Description => DialogField::Date,
            DialogField::Date => DialogField::Description,
        };
    }

    fn active_field_mut(&mut self) -> &mut FieldValue {
        match self.field {
            DialogField::Description => &mut self.description,
            DialogField::Date => &mut self.estimated_at,
        }
    }

    pub fn render(&self, f: &mut Frame<'_>) {
        let area = centered_rect(60, 40, f.area());

        let mut lines = Vec::new();
        lines.extend(field_lines(
            "Description",
            &self.description,
            self.field == DialogField::Description,
        ));
        lines.push(Line::from(""));
        lines.extend(field_lines(
            "Date (YYYY-MM-DD)",
            &self.estimated_at,
            self.field == DialogField::Date,
        ));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter to save • Esc to cancel • Tab to switch fields",
            Style::default().fg(Color::Gray),
        )));

        let dialog = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(
                        "New Task",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}

fn field_lines(label: &str, field: &FieldValue, active: bool) -> Vec<Line<'static>> {
    let label_style = if active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let value = if active {
        field.with_caret()
    } else {
        field.value.clone()
    };
    vec![
        Line::from(Span::styled(label.to_string(), label_style)),
        Line::from(Span::raw(value)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(dialog: &mut AddTaskDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn clear_active_field(dialog: &mut AddTaskDialog) {
        for _ in 0..32 {
            dialog.handle_key(key(KeyCode::Backspace));
        }
    }

    #[test]
    fn opens_with_an_empty_description_and_today_as_the_date() {
        let dialog = AddTaskDialog::new();

        assert!(dialog.description.value.is_empty());
        assert_eq!(dialog.description.cursor, 0);
        assert_eq!(dialog.estimated_at.value, Zoned::now().date().to_string());
    }

    #[test]
    fn typing_updates_the_description_buffer_and_cursor() {
        let mut dialog = AddTaskDialog::new();

        type_str(&mut dialog, "Buy milk");

        assert_eq!(dialog.description.value, "Buy milk");
        assert_eq!(dialog.description.cursor, 8);
    }

    #[test]
    fn backspace_removes_the_character_before_the_cursor() {
        let mut dialog = AddTaskDialog::new();
        type_str(&mut dialog, "Buy");

        dialog.handle_key(key(KeyCode::Backspace));

        assert_eq!(dialog.description.value, "Bu");
        assert_eq!(dialog.description.cursor, 2);
    }

    #[test]
    fn cursor_movement_stays_within_bounds() {
        let mut dialog = AddTaskDialog::new();
        type_str(&mut dialog, "Buy");

        dialog.handle_key(key(KeyCode::Left));
        assert_eq!(dialog.description.cursor, 2);

        dialog.handle_key(key(KeyCode::Right));
        dialog.handle_key(key(KeyCode::Right));
        assert_eq!(dialog.description.cursor, 3);

        for _ in 0..5 {
            dialog.handle_key(key(KeyCode::Left));
        }
        assert_eq!(dialog.description.cursor, 0);
    }

    #[test]
    fn characters_are_inserted_at_the_cursor() {
        let mut dialog = AddTaskDialog::new();
        type_str(&mut dialog, "Bu");

        dialog.handle_key(key(KeyCode::Left));
        dialog.handle_key(key(KeyCode::Char('x')));

        assert_eq!(dialog.description.value, "Bxu");
        assert_eq!(dialog.description.cursor, 2);
    }

    #[test]
    fn tab_moves_typing_to_the_date_field() {
        let mut dialog = AddTaskDialog::new();

        dialog.handle_key(key(KeyCode::Tab));
        clear_active_field(&mut dialog);
        type_str(&mut dialog, "2024-01-01");

        assert_eq!(dialog.estimated_at.value, "2024-01-01");
        assert!(dialog.description.value.is_empty());
    }

    #[test]
    fn back_tab_returns_to_the_description_field() {
        let mut dialog = AddTaskDialog::new();

        dialog.handle_key(key(KeyCode::Tab));
        dialog.handle_key(key(KeyCode::BackTab));
        type_str(&mut dialog, "Buy milk");

        assert_eq!(dialog.description.value, "Buy milk");
    }

    #[test]
    fn esc_cancels() {
        let mut dialog = AddTaskDialog::new();
        type_str(&mut dialog, "Buy milk");

        let outcome = dialog.handle_key(key(KeyCode::Esc));

        assert_eq!(outcome, DialogOutcome::Cancelled);
    }

    #[test]
    fn enter_emits_both_fields_as_typed() {
        let mut dialog = AddTaskDialog::new();
        type_str(&mut dialog, "Buy milk");
        dialog.handle_key(key(KeyCode::Tab));
        clear_active_field(&mut dialog);
        type_str(&mut dialog, "2024-03-05");

        let outcome = dialog.handle_key(key(KeyCode::Enter));

        match outcome {
            DialogOutcome::Saved {
                description,
                estimated_at,
            } => {
                assert_eq!(description, "Buy milk");
                assert_eq!(estimated_at, "2024-03-05");
            }
            other => panic!("Expected Saved, got {other:?}"),
        }
    }

    #[test]
    fn control_modified_characters_are_ignored() {
        let mut dialog = AddTaskDialog::new();

        dialog.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(dialog.description.value.is_empty());
    }
}
