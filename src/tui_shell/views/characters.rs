use std::any::Any;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::CharacterSummary;

use super::super::{RenderCtx, UiMode, View, render_view_chrome};

#[derive(Debug)]
pub(in crate::tui_shell) struct CharactersView {
    pub(in crate::tui_shell) roster: Vec<CharacterSummary>,
    pub(in crate::tui_shell) selected_row: usize,
}

impl CharactersView {
    pub(in crate::tui_shell) fn new(roster: Vec<CharacterSummary>) -> Self {
        Self {
            roster,
            selected_row: 0,
        }
    }

    pub(in crate::tui_shell) fn selected(&self) -> Option<&CharacterSummary> {
        self.roster.get(self.selected_row)
    }
}

impl View for CharactersView {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn mode(&self) -> UiMode {
        UiMode::Characters
    }

    fn title(&self) -> &str {
        "Hero Engine"
    }

    fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    fn move_down(&mut self) {
        if !self.roster.is_empty() {
            self.selected_row = (self.selected_row + 1).min(self.roster.len() - 1);
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(inner);

        // Roster.
        let mut lines = Vec::new();
        if self.roster.is_empty() {
            lines.push(Line::from(Span::styled(
                "no characters in this campaign",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (i, c) in self.roster.iter().enumerate() {
            let style = if i == self.selected_row {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{: >2} ", i + 1), style.fg(Color::Gray)),
                Span::styled(format!("{: <20}", c.name), style.fg(Color::Yellow)),
                Span::styled(
                    format!("{} {} L{}", c.race, c.class_name, c.level),
                    style.fg(Color::Gray),
                ),
            ]));
        }
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Roster")),
            columns[0],
        );

        // Open sheet.
        let mut sheet_lines = Vec::new();
        match &ctx.app.sheet {
            Some(binding) => {
                let s = binding.local();
                sheet_lines.push(Line::from(vec![
                    Span::styled(
                        s.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("  {} {} L{}", s.race, s.class_name, s.level)),
                ]));
                sheet_lines.push(Line::from(""));
                sheet_lines.push(Line::from(format!(
                    "HP {}/{}   AC {}   SPD {}",
                    s.hp, s.hp_max, s.ac, s.speed
                )));
                sheet_lines.push(Line::from(""));
                for (stat, value) in &s.stats {
                    let modifier = (value - 10).div_euclid(2);
                    sheet_lines.push(Line::from(format!(
                        "{: <4} {: >3}  ({:+})",
                        stat, value, modifier
                    )));
                }
                if binding.dirty() {
                    sheet_lines.push(Line::from(""));
                    sheet_lines.push(Line::from(Span::styled(
                        "unsaved edits (`save` or `discard`)",
                        Style::default().fg(Color::Yellow),
                    )));
                }
            }
            None => {
                sheet_lines.push(Line::from(Span::styled(
                    "open <row> to load a sheet",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        let sheet_title = if ctx.app.sheet.as_ref().map(|b| b.dirty()).unwrap_or(false) {
            "Sheet [unsaved]"
        } else {
            "Sheet"
        };
        frame.render_widget(
            Paragraph::new(sheet_lines)
                .block(Block::default().borders(Borders::ALL).title(sheet_title)),
            columns[1],
        );
    }
}
