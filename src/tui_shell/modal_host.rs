//! The arbiter's UI host: draws the open request over a dimmed frame and
//! turns key presses into resolutions. The prompt's input buffer lives on
//! the app, seeded once per open request.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::arbiter::{Answer, ModalKind, OpenModal};

use super::app::App;

/// Initialize the prompt buffer when a request becomes the open one.
pub(super) fn seed_modal_input(app: &mut App) {
    match app.arbiter.open_view() {
        Some(modal) => {
            if !app.modal_seeded {
                app.modal_input.reset();
                if let Some(initial) = modal.initial {
                    app.modal_input.replace(initial);
                }
                app.modal_seeded = true;
            }
        }
        None => {
            app.modal_seeded = false;
        }
    }
}

pub(super) fn handle_modal_key(app: &mut App, key: KeyEvent) {
    let Some(modal) = app.arbiter.open_view() else {
        return;
    };

    match modal.kind {
        ModalKind::Confirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                finish(app, Answer::Confirmed(true));
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                finish(app, Answer::Confirmed(false));
            }
            _ => {}
        },
        ModalKind::Prompt => match key.code {
            KeyCode::Enter => {
                let value = app.modal_input.text().trim().to_string();
                finish(app, Answer::Submitted(Some(value)));
            }
            KeyCode::Esc => {
                finish(app, Answer::Submitted(None));
            }
            KeyCode::Backspace => app.modal_input.backspace(),
            KeyCode::Delete => app.modal_input.delete(),
            KeyCode::Left => app.modal_input.move_left(),
            KeyCode::Right => app.modal_input.move_right(),
            KeyCode::Char(c) => app.modal_input.insert(c),
            _ => {}
        },
    }
}

fn finish(app: &mut App, answer: Answer) {
    app.arbiter.resolve(answer);
    // A queued request may have been promoted; its buffer seeds next frame.
    app.modal_seeded = false;
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, app: &App, modal: &OpenModal) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 70);
    let h = (modal.body.len() as u16 + 6).clamp(7, 16);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let box_area = Rect {
        x,
        y,
        width: w,
        height: h,
    };

    frame.render_widget(Clear, box_area);

    let accent = if modal.danger {
        Color::Red
    } else {
        Color::Yellow
    };
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        format!(" {} ", modal.title),
        Style::default().fg(accent),
    ));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let mut lines: Vec<Line> = modal.body.iter().map(|l| Line::from(l.as_str())).collect();
    lines.push(Line::from(""));

    match modal.kind {
        ModalKind::Confirm => {
            lines.push(Line::from(Span::styled(
                "y/Enter confirm  ·  n/Esc cancel",
                Style::default().fg(Color::Gray),
            )));
        }
        ModalKind::Prompt => {
            let shown = if modal.masked {
                "\u{2022}".repeat(app.modal_input.text().chars().count())
            } else {
                app.modal_input.text().to_string()
            };
            lines.push(Line::from(vec![
                Span::styled("> ", Style::default().fg(accent)),
                Span::raw(shown),
            ]));
            lines.push(Line::from(Span::styled(
                "Enter submit  ·  Esc cancel",
                Style::default().fg(Color::Gray),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
