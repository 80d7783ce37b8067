use std::any::Any;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::dice::RollResult;

use super::super::{RenderCtx, UiMode, View, render_view_chrome};

const HISTORY_CAP: usize = 100;

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct DiceView {
    pub(in crate::tui_shell) history: Vec<RollResult>,
}

impl DiceView {
    pub(in crate::tui_shell) fn new() -> Self {
        Self::default()
    }

    pub(in crate::tui_shell) fn push(&mut self, result: RollResult) {
        self.history.insert(0, result);
        self.history.truncate(HISTORY_CAP);
    }
}

impl View for DiceView {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn mode(&self) -> UiMode {
        UiMode::Dice
    }

    fn title(&self) -> &str {
        "Dice Engine"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, _ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(inner);

        // Latest result, big and centered-ish.
        let mut result_lines = Vec::new();
        match self.history.first() {
            Some(last) => {
                result_lines.push(Line::from(""));
                result_lines.push(Line::from(Span::styled(
                    "RESULT",
                    Style::default().fg(Color::Gray),
                )));
                result_lines.push(Line::from(Span::styled(
                    format!("{}", last.total),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
                result_lines.push(Line::from(Span::styled(
                    format!("{} {:?}", last.spec, last.rolls),
                    Style::default().fg(Color::Gray),
                )));
            }
            None => {
                result_lines.push(Line::from(""));
                result_lines.push(Line::from(Span::styled(
                    "FATE AWAITS",
                    Style::default().fg(Color::DarkGray),
                )));
                result_lines.push(Line::from(Span::styled(
                    "roll 2d20+3",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        frame.render_widget(
            Paragraph::new(result_lines)
                .alignment(ratatui::layout::Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            columns[0],
        );

        // History.
        let mut lines = Vec::new();
        for r in &self.history {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{: <10}", r.spec.to_string()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("{: >5}", r.total),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "no rolls yet recorded",
                Style::default().fg(Color::DarkGray),
            )));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Roll History")),
            columns[1],
        );
    }
}
