use super::*;

use crate::sync::Reconcile;

impl App {
    /// Apply everything the poller delivered since the last frame.
    pub(in crate::tui_shell) fn drain_poll_events(&mut self) {
        while let Ok(event) = self.poll_rx.try_recv() {
            self.apply_poll_event(event);
        }
    }

    fn apply_poll_event(&mut self, event: PollEvent) {
        // A result issued before one we already applied is stale; drop it
        // before it can overwrite newer state.
        if !self.gate.admit(event.stream, event.seq) {
            return;
        }

        match event.outcome {
            Ok(payload) => self.apply_payload(payload),
            Err(err) => self.apply_poll_failure(event.stream, err),
        }
    }

    fn apply_payload(&mut self, payload: PollPayload) {
        match payload {
            PollPayload::Config(config) => {
                self.health.on_success();
                // The editable sub-document goes through the dirty guard;
                // the read-only summary always follows the backend.
                match self.audio.reconcile(config.audio_registry.clone()) {
                    Reconcile::Applied => {}
                    Reconcile::SkippedDirty => {
                        // Unsaved edits win; the next clean poll catches up.
                        self.log_debug("reconcile skipped: audio registry dirty".to_string());
                    }
                }
                self.system = Some(*config);
                self.system_updated_at = Some(now_ts());
            }
            PollPayload::Auth(Some(status)) => {
                self.session.observe(status);
            }
            PollPayload::Auth(None) => {
                self.session.observe_unavailable();
            }
            PollPayload::Party(members) => {
                self.party = members;
            }
            PollPayload::Logs { service, text } => {
                // Still-relevant check: the user may have switched services
                // (or left the view) while the fetch was in flight.
                let current = self
                    .current_view_service()
                    .map(|s| s == service)
                    .unwrap_or(false);
                if current {
                    self.service_log = Some((service, text));
                }
            }
        }
    }

    fn apply_poll_failure(&mut self, stream: PollStream, err: anyhow::Error) {
        match stream {
            PollStream::Config => {
                // Leave the previous config (and any dirty edits) intact.
                self.health.on_failure();
            }
            PollStream::Auth => {
                self.session.observe_error();
            }
            PollStream::Party | PollStream::Logs => {}
        }
        self.log_debug(format!("poll: {:#}", err));
    }

    fn current_view_service(&mut self) -> Option<String> {
        self.current_view_mut::<super::super::views::LogsView>()
            .map(|v| v.service.clone())
    }

    /// Execute deferred work queued by arbiter completions.
    pub(in crate::tui_shell) fn drain_actions(&mut self) {
        while let Ok(action) = self.actions_rx.try_recv() {
            self.run_action(action);
        }
    }

    fn run_action(&mut self, action: AppAction) {
        match action {
            AppAction::RestartService(service) => self.do_restart_service(&service),
            AppAction::RestartStack => self.do_restart_stack(),
            AppAction::DeleteEnvVar(key) => self.do_delete_env(&key),
            AppAction::DeleteCampaign(id) => self.do_delete_campaign(&id),
            AppAction::Unlock(pin) => self.do_unlock(&pin),
            AppAction::LockNow => self.do_lock(),
            AppAction::DeleteAsset { id, force } => self.do_delete_asset(&id, force),
            AppAction::ClearRolls => {
                if let Some(v) = self.current_view_mut::<DiceView>() {
                    v.history.clear();
                }
                self.push_output(vec!["roll log cleared".to_string()]);
            }
        }
    }
}
