use std::any::Any;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::super::{RenderCtx, UiMode, View, render_view_chrome};

#[derive(Debug)]
pub(in crate::tui_shell) struct LogsView {
    pub(in crate::tui_shell) service: String,
    pub(in crate::tui_shell) scroll: usize,
}

impl LogsView {
    pub(in crate::tui_shell) fn new(service: String) -> Self {
        Self { service, scroll: 0 }
    }
}

impl View for LogsView {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn mode(&self) -> UiMode {
        UiMode::Logs
    }

    fn title(&self) -> &str {
        "System Telemetry"
    }

    // Up walks back through history; Down returns toward the live tail.
    fn move_up(&mut self) {
        self.scroll += 1;
    }

    fn move_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(
            frame,
            &format!("Live Terminal // {}", self.service),
            area,
        );

        let text = match &ctx.app.service_log {
            Some((service, text)) if *service == self.service => text.clone(),
            _ => "fetching stream...".to_string(),
        };

        let height = inner.height.saturating_sub(1) as usize;
        let all: Vec<&str> = text.lines().collect();
        // Tail by default; scrolling walks backwards through history.
        let scroll = self.scroll.min(all.len().saturating_sub(1));
        let end = all.len().saturating_sub(scroll);
        let start = end.saturating_sub(height);

        let mut lines: Vec<Line> = all[start..end]
            .iter()
            .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::Gray))))
            .collect();
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "no logs available",
                Style::default().fg(Color::DarkGray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
