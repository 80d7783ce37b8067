use std::any::Any;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::{RenderCtx, UiMode, View, render_view_chrome};

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct AudioView {
    pub(in crate::tui_shell) selected_row: usize,
}

impl AudioView {
    pub(in crate::tui_shell) fn new() -> Self {
        Self::default()
    }
}

impl View for AudioView {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn mode(&self) -> UiMode {
        UiMode::Audio
    }

    fn title(&self) -> &str {
        "Audio Matrix"
    }

    fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    fn move_down(&mut self) {
        self.selected_row += 1;
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let app = ctx.app;
        let registry = app.audio.local();

        let title = if app.audio.dirty() {
            "Audio Matrix [unsaved]"
        } else {
            "Audio Matrix"
        };
        let inner = render_view_chrome(frame, title, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(inner);

        // DM override header.
        let voice_name = app
            .voices
            .iter()
            .find(|v| v.id == registry.dm_voice)
            .map(|v| v.name.clone())
            .unwrap_or_else(|| {
                if registry.dm_voice.is_empty() {
                    "(unassigned)".to_string()
                } else {
                    registry.dm_voice.clone()
                }
            });
        let header = vec![
            Line::from(vec![
                Span::styled("Narrator  ", Style::default().fg(Color::Gray)),
                Span::styled(
                    registry.dm_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled("voice ", Style::default().fg(Color::Gray)),
                Span::raw(voice_name),
            ]),
            Line::from(Span::styled(
                format!(
                    "catalogs: {} voices, {} tracks (`sync` refreshes)",
                    app.voices.len(),
                    app.tracks.len()
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(header).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Dungeon Master Voice"),
            ),
            rows[0],
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let total_rows = registry.archetypes.len() + registry.soundscapes.len();
        let selected = if total_rows == 0 {
            0
        } else {
            self.selected_row.min(total_rows - 1)
        };

        // Casting director (archetypes).
        let mut cast_lines = Vec::new();
        for (i, arch) in registry.archetypes.iter().enumerate() {
            let voice = app
                .voices
                .iter()
                .find(|v| v.id == arch.voice_id)
                .map(|v| v.name.as_str())
                .unwrap_or(if arch.voice_id.is_empty() {
                    "(unassigned)"
                } else {
                    arch.voice_id.as_str()
                });
            let style = if i == selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            cast_lines.push(Line::from(vec![
                Span::styled(format!("{: >2} ", i + 1), style.fg(Color::Yellow)),
                Span::styled(format!("{: <20}", arch.label), style),
                Span::styled(voice.to_string(), style.fg(Color::Gray)),
            ]));
        }
        if cast_lines.is_empty() {
            cast_lines.push(Line::from(Span::styled(
                "no triggers (`add trigger <label>`)",
                Style::default().fg(Color::DarkGray),
            )));
        }
        frame.render_widget(
            Paragraph::new(cast_lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Casting Director"),
            ),
            columns[0],
        );

        // Soundscapes.
        let offset = registry.archetypes.len();
        let mut scape_lines = Vec::new();
        for (i, scape) in registry.soundscapes.iter().enumerate() {
            let track = app
                .tracks
                .iter()
                .find(|t| t.id == scape.track_id)
                .map(|t| t.name.as_str())
                .unwrap_or(if scape.track_id.is_empty() {
                    "(unassigned)"
                } else {
                    scape.track_id.as_str()
                });
            let style = if offset + i == selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            scape_lines.push(Line::from(vec![
                Span::styled(format!("{: >2} ", i + 1), style.fg(Color::Blue)),
                Span::styled(format!("{: <20}", scape.label), style),
                Span::styled(track.to_string(), style.fg(Color::Gray)),
            ]));
        }
        if scape_lines.is_empty() {
            scape_lines.push(Line::from(Span::styled(
                "no soundscapes (`add scape <label>`)",
                Style::default().fg(Color::DarkGray),
            )));
        }
        frame.render_widget(
            Paragraph::new(scape_lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Kenku Soundscapes"),
            ),
            columns[1],
        );
    }
}
