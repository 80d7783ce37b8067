use std::any::Any;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::SERVICES;
use crate::sync::ConnState;

use super::super::{EntryKind, RenderCtx, UiMode, View, fmt_since, fmt_ts_ui, render_view_chrome};

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct OverviewView {}

impl OverviewView {
    pub(in crate::tui_shell) fn new() -> Self {
        Self::default()
    }
}

impl View for OverviewView {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn mode(&self) -> UiMode {
        UiMode::Overview
    }

    fn title(&self) -> &str {
        "Command Center"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner);

        draw_stack(frame, columns[0], ctx);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(columns[1]);
        draw_party(frame, right[0], ctx);
        draw_command_log(frame, right[1], ctx);
    }
}

fn draw_stack(frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
    let app = ctx.app;
    let mut lines = Vec::new();

    let (provider, art) = match &app.system {
        Some(s) => (s.llm_provider.clone(), s.art_style.clone()),
        None => (String::new(), String::new()),
    };
    lines.push(Line::from(vec![
        Span::styled("LLM brain  ", Style::default().fg(Color::Gray)),
        Span::raw(if provider.is_empty() {
            "unknown".to_string()
        } else {
            provider
        }),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Art engine ", Style::default().fg(Color::Gray)),
        Span::raw(if art.is_empty() {
            "unknown".to_string()
        } else {
            art
        }),
    ]));
    if let Some(ts) = &app.system_updated_at
        && let Some(ago) = fmt_since(ts, ctx.now)
    {
        lines.push(Line::from(Span::styled(
            format!("config synced {}", ago),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    let dot = match app.health.state() {
        ConnState::Online => Span::styled("●", Style::default().fg(Color::Green)),
        ConnState::Connecting => Span::styled("●", Style::default().fg(Color::Yellow)),
        ConnState::Offline => Span::styled("●", Style::default().fg(Color::Red)),
    };
    for service in SERVICES {
        lines.push(Line::from(vec![
            dot.clone(),
            Span::raw(" "),
            Span::styled(
                format!("{: <12}", service.id),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(service.name),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "restart <service> | restart stack | logs <service>",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Container Operations"),
        ),
        area,
    );
}

fn draw_party(frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
    let mut lines = Vec::new();
    if ctx.app.party.is_empty() {
        lines.push(Line::from(Span::styled(
            "No signal...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for m in &ctx.app.party {
        let status_color = match m.status.as_str() {
            "online" => Color::Green,
            "idle" => Color::Yellow,
            "dnd" => Color::Red,
            _ => Color::DarkGray,
        };
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(status_color)),
            Span::raw(format!("{: <18}", m.name)),
            Span::styled(m.role.clone(), Style::default().fg(Color::Gray)),
        ]));
    }
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Discord Uplink"),
        ),
        area,
    );
}

fn draw_command_log(frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
    let mut lines = Vec::new();
    for entry in &ctx.app.log {
        let style = match entry.kind {
            EntryKind::Command => Style::default().fg(Color::Cyan),
            EntryKind::Output => Style::default().fg(Color::Gray),
            EntryKind::Error => Style::default().fg(Color::Red),
        };
        if let Some(first) = entry.lines.first() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("[{}] ", fmt_ts_ui(&entry.ts)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(first.clone(), style),
            ]));
        }
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Command Log")),
        area,
    );
}
