use super::*;

impl App {
    pub(super) fn open_vault(&mut self) {
        // The vault is the one gated view; opening it while locked shows the
        // placeholder, and the gate itself is re-checked on every render.
        self.push_view(Box::new(VaultView::new()));
        if !self.session.gates(false) {
            self.vault_refresh();
        }
    }

    pub(super) fn vault_command(&mut self, cmd: &str, args: &[String]) {
        if self.session.gates(false) {
            // Only `unlock` (handled globally) is meaningful while gated.
            self.push_error("vault is locked (use `unlock`)".to_string());
            return;
        }
        match cmd {
            "set" => self.vault_set(args),
            "rm" | "delete" => self.vault_rm(args),
            "reveal" => self.vault_reveal(args, true),
            "hide" => self.vault_reveal(args, false),
            _ => self.push_error(format!("unknown command: {} (try `help`)", cmd)),
        }
    }

    pub(super) fn vault_refresh(&mut self) {
        let Some(client) = self.require_client() else {
            return;
        };
        match client.env_all() {
            Ok(vars) => {
                let len = vars.len();
                self.env_vars = vars;
                if let Some(v) = self.current_view_mut::<VaultView>() {
                    v.clamp_selection_to(len);
                }
            }
            Err(err) => self.push_error(format!("list env vars: {:#}", err)),
        }
    }

    fn vault_set(&mut self, args: &[String]) {
        let (Some(key), Some(_)) = (args.first(), args.get(1)) else {
            self.push_error("usage: set <KEY> <value>".to_string());
            return;
        };
        let key = sanitize_key(key);
        if key.is_empty() {
            self.push_error("key must be alphanumeric/underscore".to_string());
            return;
        }
        let value = args[1..].join(" ");

        let Some(client) = self.require_client() else {
            return;
        };
        match client.env_set(&key, &value) {
            Ok(()) => {
                match self.env_vars.iter_mut().find(|v| v.key == key) {
                    Some(var) => var.value = value,
                    None => {
                        self.env_vars.push(crate::model::EnvVar {
                            key: key.clone(),
                            value,
                        });
                        self.env_vars.sort_by(|a, b| {
                            a.key.to_lowercase().cmp(&b.key.to_lowercase())
                        });
                    }
                }
                self.push_output(vec![format!("{} updated", key)]);
            }
            Err(err) => self.push_error(format!("set {}: {:#}", key, err)),
        }
    }

    fn vault_rm(&mut self, args: &[String]) {
        let Some(key) = self.vault_key_arg(args) else {
            return;
        };

        let tx = self.actions_tx.clone();
        let target = key.clone();
        self.arbiter.confirm(
            ConfirmOptions::new(
                "Delete Variable",
                vec![format!("Delete {} from .env? This cannot be undone.", key)],
            )
            .danger(),
            move |yes| {
                if yes {
                    let _ = tx.send(AppAction::DeleteEnvVar(target));
                }
            },
        );
    }

    pub(super) fn do_delete_env(&mut self, key: &str) {
        let Some(client) = self.require_client() else {
            return;
        };
        match client.env_delete(key) {
            Ok(()) => {
                self.env_vars.retain(|v| v.key != key);
                let len = self.env_vars.len();
                if let Some(v) = self.current_view_mut::<VaultView>() {
                    v.revealed.remove(key);
                    v.clamp_selection_to(len);
                }
                self.push_output(vec![format!("{} deleted", key)]);
            }
            Err(err) => self.push_error(format!("delete {}: {:#}", key, err)),
        }
    }

    fn vault_reveal(&mut self, args: &[String], show: bool) {
        let Some(key) = self.vault_key_arg(args) else {
            return;
        };
        if let Some(v) = self.current_view_mut::<VaultView>() {
            if show {
                v.revealed.insert(key);
            } else {
                v.revealed.remove(&key);
            }
        }
    }

    /// Accept a key name or a 1-based row number; default to the selection.
    fn vault_key_arg(&mut self, args: &[String]) -> Option<String> {
        if let Some(arg) = args.first() {
            if let Ok(n) = arg.parse::<usize>() {
                let key = self.env_vars.get(n.saturating_sub(1)).map(|v| v.key.clone());
                if key.is_none() {
                    self.push_error(format!("no variable row {}", n));
                }
                return key;
            }
            return Some(sanitize_key(arg));
        }

        let row = self.current_view_mut::<VaultView>().map(|v| v.selected_row);
        let selected = row
            .and_then(|row| self.env_vars.get(row))
            .map(|v| v.key.clone());
        if selected.is_none() {
            self.push_error("usage: rm <KEY> (or select a row)".to_string());
        }
        selected
    }
}

/// Same key discipline as the backend: A-Z, 0-9, underscore; upper-cased.
fn sanitize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_ascii_uppercase()
}
