use super::*;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(if app.suggestions.is_empty() { 0 } else { 9 }),
            Constraint::Length(3),
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    // The gate is evaluated here, on every frame, for the focused view;
    // nothing about the decision is cached across tab switches or polls.
    let ctx = RenderCtx {
        now: OffsetDateTime::now_utc(),
        app,
    };
    if app.session.gates(app.view().lock_exempt()) {
        super::super::view::render_locked_placeholder(frame, chunks[1]);
    } else {
        app.view().render(frame, chunks[1], &ctx);
    }

    draw_last_result(frame, app, chunks[2]);
    draw_suggestions(frame, app, chunks[3]);
    draw_input(frame, app, chunks[4]);

    if let Some(modal) = app.arbiter.open_view() {
        dim_frame(frame);
        modal_host::draw_modal(frame, app, &modal);
        return;
    }

    let prompt = app.mode().prompt();
    let x = prompt.len() as u16 + 1 + app.input.cursor() as u16;
    let y = chunks[4].y + 1;
    frame.set_cursor_position((chunks[4].x + x, y));
}

fn draw_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let conn = match app.health.state() {
        ConnState::Connecting => Span::styled("connecting", Style::default().fg(Color::Yellow)),
        ConnState::Online => Span::styled("online", Style::default().fg(Color::Green)),
        ConnState::Offline => Span::styled("offline", Style::default().fg(Color::Red)),
    };
    let lock = match app.session.state() {
        LockState::NoPin => Span::styled("open", Style::default().fg(Color::DarkGray)),
        LockState::Locked => Span::styled("locked", Style::default().fg(Color::Yellow)),
        LockState::Unlocked => Span::styled("unlocked", Style::default().fg(Color::Green)),
    };

    let backend = app
        .client
        .as_ref()
        .map(|c| c.base_url().to_string())
        .unwrap_or_else(|| "(no backend)".to_string());
    let campaign = app
        .system
        .as_ref()
        .map(|s| s.active_campaign.replace('_', " "))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "none".to_string());

    let spans = vec![
        Span::styled(
            "Realmdeck",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::raw(backend),
        Span::raw("  "),
        conn,
        Span::raw("  "),
        lock,
        Span::raw("  "),
        Span::styled(
            format!("campaign: {}", campaign),
            Style::default().fg(Color::Cyan),
        ),
    ];

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_last_result(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let mut lines = Vec::new();
    if let Some(cmd) = &app.last_command {
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(cmd.as_str()),
        ]));
    }
    if let Some(r) = &app.last_result {
        let style = match r.kind {
            EntryKind::Output => Style::default().fg(Color::White),
            EntryKind::Error => Style::default().fg(Color::Red),
            EntryKind::Command => Style::default().fg(Color::Cyan),
        };
        for (i, l) in r.lines.iter().enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{} ", fmt_ts_ui(&r.ts)),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(l.as_str(), style),
                ]));
            } else {
                lines.push(Line::from(Span::styled(l.as_str(), style)));
            }
        }
    }
    if lines.is_empty() {
        lines.push(Line::from(""));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP).title("Last")),
        area,
    );
}

fn draw_suggestions(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    if app.suggestions.is_empty() {
        return;
    }
    let total = app.suggestions.len();
    let sel_idx = app.suggestion_selected.min(total.saturating_sub(1));

    let mut lines = vec![Line::from(Span::styled(
        format!("Commands {}/{}", sel_idx + 1, total),
        Style::default().fg(Color::Gray),
    ))];

    let inner_h = area.height.saturating_sub(2) as usize;
    let max_items = inner_h.saturating_sub(1).max(1);
    let start = if sel_idx >= max_items {
        (sel_idx + 1 - max_items).min(total.saturating_sub(max_items))
    } else {
        0
    };
    let end = (start + max_items).min(total);

    for (i, def) in app.suggestions[start..end].iter().enumerate() {
        let style = if start + i == sel_idx {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{: <12}", def.name), style.fg(Color::Yellow)),
            Span::styled(def.help, style.fg(Color::White)),
        ]));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP | Borders::BOTTOM)),
        area,
    );
}

fn draw_input(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let prompt = app.mode().prompt();
    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::raw(app.input.text()),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::TOP)),
        area,
    );
}

fn dim_frame(frame: &mut ratatui::Frame) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.modifier |= Modifier::DIM;
            }
        }
    }
}
