/// Single-line editor with recall history, shared by the command bar and the
/// prompt modal.
#[derive(Debug, Default)]
pub(super) struct Input {
    buf: String,
    cursor: usize,
    history: Vec<String>,
    recall: Option<usize>,
}

impl Input {
    pub(super) fn text(&self) -> &str {
        &self.buf
    }

    pub(super) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(super) fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub(super) fn reset(&mut self) {
        self.buf.clear();
        self.cursor = 0;
        self.recall = None;
    }

    pub(super) fn replace(&mut self, s: String) {
        self.cursor = s.len();
        self.buf = s;
    }

    pub(super) fn insert(&mut self, c: char) {
        self.buf.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub(super) fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.buf[..self.cursor]
            .chars()
            .next_back()
            .map(|c| c.len_utf8())
            .unwrap_or(1);
        self.cursor -= prev;
        self.buf.remove(self.cursor);
    }

    pub(super) fn delete(&mut self) {
        if self.cursor < self.buf.len() {
            self.buf.remove(self.cursor);
        }
    }

    pub(super) fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.buf[..self.cursor]
            .chars()
            .next_back()
            .map(|c| c.len_utf8())
            .unwrap_or(1);
        self.cursor -= prev;
    }

    pub(super) fn move_right(&mut self) {
        if self.cursor >= self.buf.len() {
            return;
        }
        let next = self.buf[self.cursor..]
            .chars()
            .next()
            .map(|c| c.len_utf8())
            .unwrap_or(1);
        self.cursor += next;
    }

    pub(super) fn remember(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || self.history.last().map(|s| s.as_str()) == Some(line) {
            return;
        }
        self.history.push(line.to_string());
        self.recall = None;
    }

    pub(super) fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let i = match self.recall {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.recall = Some(i);
        self.replace(self.history[i].clone());
    }

    pub(super) fn history_next(&mut self) {
        let Some(i) = self.recall else {
            return;
        };
        if i + 1 >= self.history.len() {
            self.recall = None;
            self.reset();
            return;
        }
        self.recall = Some(i + 1);
        self.replace(self.history[i + 1].clone());
    }
}
