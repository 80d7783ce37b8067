use super::*;

use crate::model::{SERVICES, known_service};

impl App {
    // ---- lock / unlock -------------------------------------------------

    pub(super) fn cmd_lock(&mut self) {
        match self.session.state() {
            LockState::NoPin => {
                self.push_error("no PIN configured; nothing to lock".to_string());
            }
            LockState::Locked => {
                self.push_output(vec!["already locked".to_string()]);
            }
            LockState::Unlocked => {
                // Optimistic: locked in the UI before the backend answers.
                self.session.lock_optimistic();
                let tx = self.actions_tx.clone();
                let _ = tx.send(AppAction::LockNow);
                self.push_output(vec!["locked".to_string()]);
            }
        }
    }

    pub(super) fn do_lock(&mut self) {
        let Some(client) = self.require_client() else {
            return;
        };
        // Best-effort notify; on failure we stay locked and say so.
        if let Err(err) = client.lock() {
            self.push_error(format!(
                "lock notify failed (console stays locked): {:#}",
                err
            ));
        }
    }

    pub(super) fn cmd_unlock(&mut self) {
        match self.session.state() {
            LockState::NoPin => {
                self.push_output(vec!["no PIN configured; nothing is locked".to_string()]);
                return;
            }
            LockState::Unlocked => {
                self.push_output(vec!["already unlocked".to_string()]);
                return;
            }
            LockState::Locked => {}
        }

        let tx = self.actions_tx.clone();
        self.arbiter.prompt(
            PromptOptions::new("Unlock", vec!["Enter admin PIN.".to_string()]).masked(),
            move |pin| {
                if let Some(pin) = pin {
                    let _ = tx.send(AppAction::Unlock(pin));
                }
            },
        );
    }

    pub(super) fn do_unlock(&mut self, pin: &str) {
        let Some(client) = self.require_client() else {
            return;
        };
        match client.unlock(pin) {
            Ok(UnlockOutcome::Granted(status)) => {
                self.session.unlock_granted();
                self.session.observe(status);
                self.push_output(vec!["unlocked".to_string()]);
                // The vault was rendering its placeholder; load it now.
                if self.mode() == UiMode::Vault {
                    self.vault_refresh();
                }
            }
            Ok(UnlockOutcome::Denied) => {
                // State stays Locked; the prompt's input died with the modal.
                self.push_error("access denied".to_string());
            }
            Err(err) => {
                self.push_error(format!("unlock: {:#}", err));
            }
        }
    }

    // ---- container control ---------------------------------------------

    pub(super) fn cmd_restart(&mut self, args: &[String]) {
        let Some(target) = args.first() else {
            self.push_error("usage: restart <service>|stack".to_string());
            return;
        };

        if target == "stack" || target == "all" {
            let tx = self.actions_tx.clone();
            self.arbiter.confirm(
                ConfirmOptions::new(
                    "Restart Stack",
                    vec![
                        "Restart the ENTIRE stack?".to_string(),
                        "Every service goes down briefly.".to_string(),
                    ],
                )
                .danger(),
                move |yes| {
                    if yes {
                        let _ = tx.send(AppAction::RestartStack);
                    }
                },
            );
            return;
        }

        if !known_service(target) {
            self.push_error(format!("unknown service: {}", target));
            return;
        }

        let tx = self.actions_tx.clone();
        let service = target.clone();
        self.arbiter.confirm(
            ConfirmOptions::new("Restart", vec![format!("Restart {}?", service)]),
            move |yes| {
                if yes {
                    let _ = tx.send(AppAction::RestartService(service));
                }
            },
        );
    }

    pub(super) fn do_restart_service(&mut self, service: &str) {
        let Some(client) = self.require_client() else {
            return;
        };
        match client.restart_service(service) {
            Ok(()) => self.push_output(vec![format!("{} restart triggered", service)]),
            Err(err) => self.push_error(format!("restart {}: {:#}", service, err)),
        }
    }

    pub(super) fn do_restart_stack(&mut self) {
        let Some(client) = self.require_client() else {
            return;
        };
        let mut ok = 0usize;
        let mut failed: Vec<String> = Vec::new();
        for service in SERVICES {
            match client.restart_service(service.id) {
                Ok(()) => ok += 1,
                Err(_) => failed.push(service.id.to_string()),
            }
        }
        if failed.is_empty() {
            self.push_output(vec![format!("restart triggered for {} services", ok)]);
        } else {
            self.push_error(format!(
                "restarted {}; failed: {}",
                ok,
                failed.join(", ")
            ));
        }
    }

    // ---- logs ----------------------------------------------------------

    pub(super) fn cmd_logs(&mut self, args: &[String]) {
        let service = args
            .first()
            .cloned()
            .unwrap_or_else(|| "rq-bot".to_string());
        if !known_service(&service) {
            self.push_error(format!("unknown service: {}", service));
            return;
        }
        self.service_log = None;
        self.push_view(Box::new(LogsView::new(service.clone())));
        self.refresh_logs_async(service);
    }

    pub(super) fn logs_command(&mut self, cmd: &str, args: &[String]) {
        match cmd {
            "svc" | "service" => {
                let Some(service) = args.first() else {
                    self.push_error("usage: svc <service>".to_string());
                    return;
                };
                if !known_service(service) {
                    self.push_error(format!("unknown service: {}", service));
                    return;
                }
                if let Some(v) = self.current_view_mut::<LogsView>() {
                    v.service = service.clone();
                    v.scroll = 0;
                }
                self.service_log = None;
                self.refresh_logs_async(service.clone());
            }
            "tail" => {
                if let Some(service) = self
                    .current_view_mut::<LogsView>()
                    .map(|v| v.service.clone())
                {
                    self.refresh_logs_async(service);
                }
            }
            _ => self.push_error(format!("unknown command: {} (try `help`)", cmd)),
        }
    }

    // ---- campaigns -----------------------------------------------------

    pub(super) fn open_campaigns(&mut self) {
        let Some(client) = self.require_client() else {
            return;
        };
        match client.list_campaigns() {
            Ok(items) => {
                self.push_view(Box::new(CampaignsView::new(items)));
            }
            Err(err) => self.push_error(format!("list campaigns: {:#}", err)),
        }
    }

    pub(super) fn campaigns_command(&mut self, cmd: &str, args: &[String]) {
        match cmd {
            "use" | "load" => {
                let Some(id) = self.campaign_arg(args) else {
                    return;
                };
                let Some(client) = self.require_client() else {
                    return;
                };
                match client.activate_campaign(&id) {
                    Ok(()) => {
                        self.push_output(vec![format!("campaign switched to {}", id)]);
                        self.cmd_refresh();
                    }
                    Err(err) => self.push_error(format!("activate campaign: {:#}", err)),
                }
            }
            "rm" | "delete" => {
                let Some(id) = self.campaign_arg(args) else {
                    return;
                };
                let active = self
                    .system
                    .as_ref()
                    .map(|s| s.active_campaign == id)
                    .unwrap_or(false);
                if active {
                    self.push_error("cannot delete the active campaign".to_string());
                    return;
                }
                let tx = self.actions_tx.clone();
                let target = id.clone();
                self.arbiter.confirm(
                    ConfirmOptions::new(
                        "Delete Campaign",
                        vec![format!("Delete {}? This cannot be undone.", id)],
                    )
                    .danger(),
                    move |yes| {
                        if yes {
                            let _ = tx.send(AppAction::DeleteCampaign(target));
                        }
                    },
                );
            }
            _ => self.push_error(format!("unknown command: {} (try `help`)", cmd)),
        }
    }

    fn campaign_arg(&mut self, args: &[String]) -> Option<String> {
        if let Some(arg) = args.first() {
            // Accept a row number or an id.
            if let Ok(n) = arg.parse::<usize>() {
                let id = self
                    .current_view_mut::<CampaignsView>()
                    .and_then(|v| v.items.get(n.saturating_sub(1)))
                    .map(|c| c.id.clone());
                if id.is_none() {
                    self.push_error(format!("no campaign row {}", n));
                }
                return id;
            }
            return Some(arg.clone());
        }
        let selected = self
            .current_view_mut::<CampaignsView>()
            .and_then(|v| v.selected_campaign())
            .map(|c| c.id.clone());
        if selected.is_none() {
            self.push_error("usage: use <id> (or select a row)".to_string());
        }
        selected
    }

    pub(super) fn do_delete_campaign(&mut self, id: &str) {
        let Some(client) = self.require_client() else {
            return;
        };
        match client.delete_campaign(id) {
            Ok(()) => {
                if let Some(v) = self.current_view_mut::<CampaignsView>() {
                    v.items.retain(|c| c.id != id);
                    v.clamp_selection();
                }
                self.push_output(vec![format!("campaign {} deleted", id)]);
            }
            Err(err) => self.push_error(format!("delete campaign: {:#}", err)),
        }
    }
}
