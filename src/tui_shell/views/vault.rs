use std::any::Any;
use std::collections::HashSet;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::super::{RenderCtx, UiMode, View, render_view_chrome};

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct VaultView {
    pub(in crate::tui_shell) selected_row: usize,
    pub(in crate::tui_shell) revealed: HashSet<String>,
}

impl VaultView {
    pub(in crate::tui_shell) fn new() -> Self {
        Self::default()
    }

    pub(in crate::tui_shell) fn clamp_selection_to(&mut self, len: usize) {
        if len == 0 {
            self.selected_row = 0;
        } else {
            self.selected_row = self.selected_row.min(len - 1);
        }
    }
}

impl View for VaultView {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn mode(&self) -> UiMode {
        UiMode::Vault
    }

    fn title(&self) -> &str {
        "Environment Vault"
    }

    /// The vault is the one view behind the PIN.
    fn lock_exempt(&self) -> bool {
        false
    }

    fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    fn move_down(&mut self) {
        self.selected_row += 1;
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), area);
        let vars = &ctx.app.env_vars;

        let mut lines = vec![Line::from(Span::styled(
            "Direct modification of stack environment variables.",
            Style::default().fg(Color::Red),
        ))];
        lines.push(Line::from(""));

        if vars.is_empty() {
            lines.push(Line::from(Span::styled(
                "no variables found (check the backend connection)",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let selected = self.selected_row.min(vars.len().saturating_sub(1));
        for (i, var) in vars.iter().enumerate() {
            let style = if i == selected && !vars.is_empty() {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let shown = if self.revealed.contains(&var.key) {
                var.value.clone()
            } else {
                "\u{2022}".repeat(var.value.chars().count().clamp(4, 20))
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{: >3} ", i + 1), style.fg(Color::Gray)),
                Span::styled(format!("{: <28}", var.key), style.fg(Color::Yellow)),
                Span::styled(shown, style),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "set KEY value | rm KEY | reveal KEY | hide KEY | lock",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
