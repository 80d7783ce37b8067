use super::*;

impl App {
    pub(in crate::tui_shell) fn load() -> Self {
        let mut app = App::default();
        app.arbiter.register_host();

        let cwd = match std::env::current_dir() {
            Ok(p) => p,
            Err(err) => {
                app.store_err = Some(format!("get current dir: {:#}", err));
                return app;
            }
        };

        match ConsoleStore::discover(&cwd) {
            Ok(store) => {
                app.store = Some(store);
            }
            Err(err) => {
                app.store_err = Some(format!("{}", err));
            }
        }

        if let Some(store) = app.store.clone() {
            match store.read_config() {
                Ok(cfg) => {
                    if let Some(backend) = cfg.backend {
                        app.connect(&backend.base_url, backend.poll_interval_secs);
                    } else {
                        app.push_output(vec![
                            "No backend configured.".to_string(),
                            "Use `connect <url>` to point at the stack API.".to_string(),
                        ]);
                    }
                }
                Err(err) => app.push_error(format!("read config: {:#}", err)),
            }
        } else {
            let reason = app
                .store_err
                .clone()
                .unwrap_or_else(|| "no console directory".to_string());
            app.push_output(vec![
                reason,
                "Run `realmdeck init`, then `connect <url>`.".to_string(),
            ]);
        }

        app.push_output(vec![
            "Type `help` for commands; `/` lists them as you type.".to_string(),
        ]);
        app
    }

    /// Point the console at a backend and (re)start polling.
    pub(in crate::tui_shell) fn connect(&mut self, base_url: &str, interval_secs: u64) {
        let client = match RemoteClient::new(base_url) {
            Ok(c) => c,
            Err(err) => {
                self.push_error(format!("connect: {:#}", err));
                return;
            }
        };
        self.client = Some(client);
        self.health = ConnHealth::default();
        self.start_polling(Duration::from_secs(interval_secs.max(1)));
        self.push_output(vec![format!("Connected to {}", base_url)]);
    }

    pub(in crate::tui_shell) fn require_client(&mut self) -> Option<RemoteClient> {
        match self.client.clone() {
            Some(c) => Some(c),
            None => {
                self.push_error("no backend configured (use `connect <url>`)".to_string());
                None
            }
        }
    }

    /// Start (or restart) the background poller. Each tick fetches the
    /// system config, the auth status, and the party roster; sequence
    /// numbers are allocated at issue time so the applier can discard
    /// superseded results.
    pub(in crate::tui_shell) fn start_polling(&mut self, interval: Duration) {
        self.stop_polling();

        let Some(client) = self.client.clone() else {
            return;
        };
        let tx = self.poll_tx.clone();
        let seq = Arc::clone(&self.seq);

        let poller = Poller::start(interval, move || {
            let config_seq = PollEvent::next_seq(&seq);
            let config = client.fetch_config().map(|c| PollPayload::Config(Box::new(c)));
            if tx
                .send(PollEvent {
                    stream: PollStream::Config,
                    seq: config_seq,
                    outcome: config,
                })
                .is_err()
            {
                return false;
            }

            let auth_seq = PollEvent::next_seq(&seq);
            let auth = client.auth_status().map(PollPayload::Auth);
            if tx
                .send(PollEvent {
                    stream: PollStream::Auth,
                    seq: auth_seq,
                    outcome: auth,
                })
                .is_err()
            {
                return false;
            }

            let party_seq = PollEvent::next_seq(&seq);
            let party = client.discord_members().map(PollPayload::Party);
            tx.send(PollEvent {
                stream: PollStream::Party,
                seq: party_seq,
                outcome: party,
            })
            .is_ok()
        });

        self.poller = Some(poller);
    }

    pub(in crate::tui_shell) fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
    }

    /// One-shot background log fetch for the focused service. Results flow
    /// through the same channel and staleness gate as poll ticks; the
    /// applier additionally drops chunks for a service the user has left.
    pub(in crate::tui_shell) fn refresh_logs_async(&mut self, service: String) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let tx = self.poll_tx.clone();
        let seq = PollEvent::next_seq(&self.seq);

        std::thread::spawn(move || {
            let outcome = client.service_logs(&service).map(|text| PollPayload::Logs {
                service,
                text,
            });
            let _ = tx.send(PollEvent {
                stream: PollStream::Logs,
                seq,
                outcome,
            });
        });
    }

    pub(in crate::tui_shell) fn shutdown(&mut self) {
        // Drain pending confirmations to their safe defaults before the UI
        // goes away so no completion is left hanging.
        self.arbiter.shutdown();
        self.stop_polling();
    }
}
