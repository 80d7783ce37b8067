use super::*;

use super::super::commands;

impl App {
    pub(in crate::tui_shell) fn update_suggestions(&mut self) {
        let typed = self.input.text().trim_start().to_string();
        if typed.is_empty() {
            self.suggestions.clear();
            self.suggestion_selected = 0;
            return;
        }
        let query = typed.strip_prefix('/').unwrap_or(&typed);
        // Only suggest while typing the command word itself.
        if query.contains(' ') {
            self.suggestions.clear();
            return;
        }
        self.suggestions = rank_commands(commands::defs_for(self.mode()), query);
        self.suggestion_selected = 0;
    }

    pub(in crate::tui_shell) fn run_command(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let line = line.strip_prefix('/').unwrap_or(line).to_string();
        self.push_command(&line);

        let tokens = tokenize(&line);
        let Some((cmd, args)) = tokens.split_first() else {
            return;
        };

        // Global commands first, then the focused view's own verbs.
        match cmd.as_str() {
            "help" | "h" | "?" => self.cmd_help(),
            "quit" | "q" | "exit" => self.quit = true,
            "overview" | "ov" => self.push_view(Box::new(OverviewView::new())),
            "audio" => self.push_view(Box::new(AudioView::new())),
            "vault" | "env" => self.open_vault(),
            "campaigns" => self.open_campaigns(),
            "heroes" | "chars" => self.open_characters(),
            "logs" => self.cmd_logs(args),
            "dice" => self.push_view(Box::new(DiceView::new())),
            "connect" => self.cmd_connect(args),
            "refresh" | "r" => self.cmd_refresh(),
            "lock" => self.cmd_lock(),
            "unlock" => self.cmd_unlock(),
            "restart" => self.cmd_restart(args),
            "roll" => self.cmd_roll(args),
            "debug" => {
                let lines: Vec<String> = self.debug.iter().take(15).cloned().collect();
                if lines.is_empty() {
                    self.push_output(vec!["no internal events recorded".to_string()]);
                } else {
                    self.push_output(lines);
                }
            }
            _ => self.run_mode_command(cmd, args),
        }
    }

    fn run_mode_command(&mut self, cmd: &str, args: &[String]) {
        match self.mode() {
            UiMode::Audio => self.audio_command(cmd, args),
            UiMode::Vault => self.vault_command(cmd, args),
            UiMode::Campaigns => self.campaigns_command(cmd, args),
            UiMode::Characters => self.characters_command(cmd, args),
            UiMode::Logs => self.logs_command(cmd, args),
            UiMode::Dice => self.dice_command(cmd, args),
            UiMode::Overview => {
                self.push_error(format!("unknown command: {} (try `help`)", cmd));
            }
        }
    }

    fn cmd_help(&mut self) {
        let mut lines = vec!["Commands here:".to_string()];
        for def in commands::defs_for(self.mode()) {
            lines.push(format!("  {: <18} {}", def.usage, def.help));
        }
        self.push_output(lines);
    }

    fn cmd_connect(&mut self, args: &[String]) {
        let Some(url) = args.first() else {
            self.push_error("usage: connect <url> [interval-secs]".to_string());
            return;
        };
        let interval = args
            .get(1)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or_else(crate::model::default_poll_interval_secs);

        if let Some(store) = self.store.clone() {
            if let Err(err) = store.set_backend(crate::model::BackendConfig {
                base_url: url.clone(),
                poll_interval_secs: interval,
            }) {
                self.push_error(format!("save backend config: {:#}", err));
                return;
            }
        }
        self.connect(url, interval);
    }

    pub(super) fn cmd_refresh(&mut self) {
        // Manual refresh: issue one extra tick's worth of fetches by
        // restarting the poller (its first tick is immediate).
        let interval = self.poll_interval();
        self.start_polling(interval);
        self.push_output(vec!["refreshing".to_string()]);
    }

    pub(super) fn poll_interval(&self) -> Duration {
        let secs = self
            .store
            .as_ref()
            .and_then(|s| s.read_config().ok())
            .and_then(|c| c.backend)
            .map(|b| b.poll_interval_secs)
            .unwrap_or_else(crate::model::default_poll_interval_secs);
        Duration::from_secs(secs.max(1))
    }
}

pub(super) fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_collapses_whitespace() {
        assert_eq!(tokenize("set  KEY   value"), vec!["set", "KEY", "value"]);
        assert!(tokenize("   ").is_empty());
    }
}
