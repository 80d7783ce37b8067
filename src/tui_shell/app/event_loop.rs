use std::io;
use std::time::Instant;

use super::*;

const LOG_TAIL_INTERVAL: Duration = Duration::from_secs(3);

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut last_log_tail = Instant::now() - LOG_TAIL_INTERVAL;

    loop {
        app.drain_poll_events();
        app.drain_actions();

        // Keep the focused service log fresh; skip while a modal is up.
        if app.mode() == UiMode::Logs
            && !app.arbiter.is_open()
            && last_log_tail.elapsed() >= LOG_TAIL_INTERVAL
        {
            if let Some(service) = app
                .current_view_mut::<LogsView>()
                .map(|v| v.service.clone())
            {
                app.refresh_logs_async(service);
            }
            last_log_tail = Instant::now();
        }

        modal_host::seed_modal_input(app);

        terminal
            .draw(|f| render::draw(f, app))
            .context("draw")?;

        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if app.arbiter.is_open() {
        modal_host::handle_modal_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Esc => {
            if !app.input.is_empty() {
                app.input.reset();
                app.suggestions.clear();
            } else {
                app.pop_view();
            }
        }
        KeyCode::Enter => {
            if let Some(def) = app.selected_suggestion().copied() {
                if app.input.text() != def.name {
                    app.input.replace(def.name.to_string());
                    app.update_suggestions();
                    return;
                }
            }
            let line = app.input.text().to_string();
            app.input.remember(&line);
            app.input.reset();
            app.suggestions.clear();
            app.run_command(&line);
        }
        KeyCode::Tab => {
            if let Some(def) = app.selected_suggestion().copied() {
                app.input.replace(format!("{} ", def.name));
                app.update_suggestions();
            }
        }
        KeyCode::Up => {
            if !app.suggestions.is_empty() {
                app.suggestion_selected = app.suggestion_selected.saturating_sub(1);
            } else if app.input.is_empty() {
                app.view_mut().move_up();
            } else {
                app.input.history_prev();
            }
        }
        KeyCode::Down => {
            if !app.suggestions.is_empty() {
                let max = app.suggestions.len().saturating_sub(1);
                app.suggestion_selected = (app.suggestion_selected + 1).min(max);
            } else if app.input.is_empty() {
                app.view_mut().move_down();
            } else {
                app.input.history_next();
            }
        }
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Backspace => {
            app.input.backspace();
            app.update_suggestions();
        }
        KeyCode::Delete => {
            app.input.delete();
            app.update_suggestions();
        }
        KeyCode::Char(c) => {
            app.input.insert(c);
            app.update_suggestions();
        }
        _ => {}
    }
}

impl App {
    fn selected_suggestion(&self) -> Option<&CommandDef> {
        if self.suggestions.is_empty() {
            return None;
        }
        let i = self
            .suggestion_selected
            .min(self.suggestions.len().saturating_sub(1));
        self.suggestions.get(i)
    }
}
