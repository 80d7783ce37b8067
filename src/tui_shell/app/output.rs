use super::*;

const LOG_CAP: usize = 50;

impl App {
    pub(in crate::tui_shell) fn push_output(&mut self, lines: Vec<String>) {
        self.push_entry(EntryKind::Output, lines);
    }

    pub(in crate::tui_shell) fn push_error(&mut self, msg: String) {
        self.push_entry(EntryKind::Error, vec![msg]);
    }

    pub(in crate::tui_shell) fn push_command(&mut self, cmd: &str) {
        self.last_command = Some(cmd.to_string());
        self.push_entry(EntryKind::Command, vec![cmd.to_string()]);
    }

    fn push_entry(&mut self, kind: EntryKind, lines: Vec<String>) {
        let entry = ScrollEntry {
            ts: now_ts(),
            kind,
            lines,
        };
        if kind != EntryKind::Command {
            self.last_result = Some(entry.clone());
        }
        self.log.insert(0, entry);
        self.log.truncate(LOG_CAP);
    }

    /// Debug-level noise (failed polls, skipped reconciles). Kept out of
    /// the command log; `debug` prints the tail.
    pub(in crate::tui_shell) fn log_debug(&mut self, msg: String) {
        self.debug.insert(0, format!("{} {}", fmt_ts_ui(&now_ts()), msg));
        self.debug.truncate(100);
    }
}
