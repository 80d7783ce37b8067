use std::any::Any;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Campaign;

use super::super::{RenderCtx, UiMode, View, render_view_chrome};

#[derive(Debug)]
pub(in crate::tui_shell) struct CampaignsView {
    pub(in crate::tui_shell) items: Vec<Campaign>,
    pub(in crate::tui_shell) selected_row: usize,
}

impl CampaignsView {
    pub(in crate::tui_shell) fn new(items: Vec<Campaign>) -> Self {
        Self {
            items,
            selected_row: 0,
        }
    }

    pub(in crate::tui_shell) fn selected_campaign(&self) -> Option<&Campaign> {
        self.items.get(self.selected_row)
    }

    pub(in crate::tui_shell) fn clamp_selection(&mut self) {
        if self.items.is_empty() {
            self.selected_row = 0;
        } else {
            self.selected_row = self.selected_row.min(self.items.len() - 1);
        }
    }
}

impl View for CampaignsView {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn mode(&self) -> UiMode {
        UiMode::Campaigns
    }

    fn title(&self) -> &str {
        "Campaign Library"
    }

    fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    fn move_down(&mut self) {
        self.selected_row += 1;
        self.clamp_selection();
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), area);
        let active = ctx
            .app
            .system
            .as_ref()
            .map(|s| s.active_campaign.clone())
            .unwrap_or_default();

        let mut lines = Vec::new();
        if self.items.is_empty() {
            lines.push(Line::from(Span::styled(
                "no campaigns on the backend",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let selected = self.selected_row.min(self.items.len().saturating_sub(1));
        for (i, c) in self.items.iter().enumerate() {
            let is_active = c.id == active;
            let style = if i == selected && !self.items.is_empty() {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let marker = if is_active {
                Span::styled("active ", Style::default().fg(Color::Green))
            } else {
                Span::raw("       ")
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{: >2} ", i + 1), style.fg(Color::Gray)),
                marker,
                Span::styled(format!("{: <28}", c.name), style.fg(Color::Yellow)),
                Span::styled(c.id.clone(), style.fg(Color::Gray)),
            ]));
            if !c.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("          {}", c.description),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "use <row|id> | rm <row|id>",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
