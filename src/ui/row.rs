use jiff::tz::TimeZone;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use crate::models::task::Task;

/// Date column for a row: the completion date when the task is done, the
/// estimate otherwise.
pub fn date_label(task: &Task) -> String {
    match task.done_at {
        Some(done_at) => done_at
            .to_zoned(TimeZone::system())
            .strftime("%a, %b %d")
            .to_string(),
        None => task.estimated_at.strftime("%a, %b %d").to_string(),
    }
}

pub fn task_row(task: &Task) -> ListItem<'static> {
    let (glyph, description_style) = if task.is_done() {
        (
            "[x] ",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        ("[ ] ", Style::default())
    };

    ListItem::new(Line::from(vec![
        Span::styled(glyph, Style::default().fg(Color::Green)),
        Span::styled(task.description.clone(), description_style),
        Span::styled(
            format!("  {}", date_label(task)),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use jiff::civil::date;

    use super::*;

    #[test]
    fn pending_rows_show_the_estimate_date() {
        let task = Task::new(
            "Buy milk".to_string(),
            date(2024, 1, 1),
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(date_label(&task), "Mon, Jan 01");
    }

    #[test]
    fn done_rows_show_the_completion_date_instead() {
        let mut task = Task::new(
            "Buy milk".to_string(),
            date(2024, 1, 1),
            Timestamp::UNIX_EPOCH,
        );
        let done_at: Timestamp = "2024-02-02T12:00:00Z".parse().unwrap();
        task.toggle_done(done_at);

        let expected = done_at
            .to_zoned(TimeZone::system())
            .strftime("%a, %b %d")
            .to_string();
        assert_eq!(date_label(&task), expected);
    }
}
