use std::any::Any;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use time::OffsetDateTime;

use super::UiMode;
use super::app::App;

pub(super) struct RenderCtx<'a> {
    pub(super) now: OffsetDateTime,
    pub(super) app: &'a App,
}

pub(super) trait View: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn mode(&self) -> UiMode;
    fn title(&self) -> &str;

    /// Whether this view escapes PIN gating. The predicate that consumes it
    /// runs per render; the flag itself is a static property of the view.
    fn lock_exempt(&self) -> bool {
        true
    }

    fn move_up(&mut self) {}
    fn move_down(&mut self) {}

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx);
}

pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    area: Rect,
) -> Rect {
    let header = Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Yellow),
    ));
    let outer = Block::default().borders(Borders::ALL).title(header);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}

/// What a gated view shows instead of its content.
pub(super) fn render_locked_placeholder(frame: &mut ratatui::Frame, area: Rect) {
    let inner = render_view_chrome(frame, "Security Protocol Active", area);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "This view requires the admin PIN.",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Type `unlock` to authenticate.",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
        inner,
    );
}
