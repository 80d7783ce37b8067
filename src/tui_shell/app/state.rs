use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum EntryKind {
    Command,
    Output,
    Error,
}

#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct ScrollEntry {
    pub(in crate::tui_shell) ts: String,
    pub(in crate::tui_shell) kind: EntryKind,
    pub(in crate::tui_shell) lines: Vec<String>,
}

pub(in crate::tui_shell) struct ViewFrame {
    pub(in crate::tui_shell) view: Box<dyn View>,
}

pub(in crate::tui_shell) struct App {
    pub(in crate::tui_shell) store: Option<ConsoleStore>,
    pub(in crate::tui_shell) store_err: Option<String>,
    pub(in crate::tui_shell) client: Option<RemoteClient>,

    pub(in crate::tui_shell) health: ConnHealth,
    pub(in crate::tui_shell) session: SessionLock,
    pub(in crate::tui_shell) arbiter: ModalArbiter,
    pub(in crate::tui_shell) modal_input: Input,
    pub(in crate::tui_shell) modal_seeded: bool,

    // Authoritative state mirrors, fed by the poller.
    pub(in crate::tui_shell) system: Option<SystemConfig>,
    pub(in crate::tui_shell) system_updated_at: Option<String>,
    pub(in crate::tui_shell) audio: EditableBinding<AudioRegistry>,
    pub(in crate::tui_shell) sheet: Option<EditableBinding<CharacterSheet>>,
    pub(in crate::tui_shell) party: Vec<PartyMember>,
    pub(in crate::tui_shell) env_vars: Vec<EnvVar>,
    pub(in crate::tui_shell) voices: Vec<VoiceAsset>,
    pub(in crate::tui_shell) tracks: Vec<TrackAsset>,
    pub(in crate::tui_shell) service_log: Option<(String, String)>,

    // Poll plumbing.
    pub(in crate::tui_shell) seq: Arc<AtomicU64>,
    pub(in crate::tui_shell) gate: StaleGate,
    pub(in crate::tui_shell) poller: Option<Poller>,
    pub(in crate::tui_shell) poll_tx: mpsc::Sender<PollEvent>,
    pub(in crate::tui_shell) poll_rx: mpsc::Receiver<PollEvent>,

    // Arbiter completions deliver work here.
    pub(in crate::tui_shell) actions_tx: mpsc::Sender<AppAction>,
    pub(in crate::tui_shell) actions_rx: mpsc::Receiver<AppAction>,

    // Command log, newest first, capped.
    pub(in crate::tui_shell) log: Vec<ScrollEntry>,
    pub(in crate::tui_shell) debug: Vec<String>,
    pub(in crate::tui_shell) last_command: Option<String>,
    pub(in crate::tui_shell) last_result: Option<ScrollEntry>,

    pub(in crate::tui_shell) input: Input,
    pub(in crate::tui_shell) suggestions: Vec<CommandDef>,
    pub(in crate::tui_shell) suggestion_selected: usize,

    pub(in crate::tui_shell) frames: Vec<ViewFrame>,

    pub(in crate::tui_shell) quit: bool,
}

impl Default for App {
    fn default() -> Self {
        let (poll_tx, poll_rx) = mpsc::channel();
        let (actions_tx, actions_rx) = mpsc::channel();
        Self {
            store: None,
            store_err: None,
            client: None,

            health: ConnHealth::default(),
            session: SessionLock::default(),
            arbiter: ModalArbiter::new(),
            modal_input: Input::default(),
            modal_seeded: false,

            system: None,
            system_updated_at: None,
            audio: EditableBinding::new(AudioRegistry::default()),
            sheet: None,
            party: Vec::new(),
            env_vars: Vec::new(),
            voices: Vec::new(),
            tracks: Vec::new(),
            service_log: None,

            seq: Arc::new(AtomicU64::new(0)),
            gate: StaleGate::default(),
            poller: None,
            poll_tx,
            poll_rx,

            actions_tx,
            actions_rx,

            log: Vec::new(),
            debug: Vec::new(),
            last_command: None,
            last_result: None,

            input: Input::default(),
            suggestions: Vec::new(),
            suggestion_selected: 0,

            frames: vec![ViewFrame {
                view: Box::new(OverviewView::new()),
            }],

            quit: false,
        }
    }
}

impl App {
    pub(in crate::tui_shell) fn mode(&self) -> UiMode {
        self.view().mode()
    }

    pub(in crate::tui_shell) fn view(&self) -> &dyn View {
        self.frames
            .last()
            .map(|f| f.view.as_ref())
            .expect("frame stack never empty")
    }

    pub(in crate::tui_shell) fn view_mut(&mut self) -> &mut Box<dyn View> {
        &mut self
            .frames
            .last_mut()
            .expect("frame stack never empty")
            .view
    }

    pub(in crate::tui_shell) fn current_view_mut<V: View + 'static>(&mut self) -> Option<&mut V> {
        self.view_mut().as_any_mut().downcast_mut::<V>()
    }

    pub(in crate::tui_shell) fn push_view(&mut self, view: Box<dyn View>) {
        // Switching tabs replaces any deeper frame of the same mode instead
        // of stacking duplicates.
        if self.mode() == view.mode() {
            return;
        }
        self.frames.retain(|f| f.view.mode() != view.mode());
        self.frames.push(ViewFrame { view });
    }

    pub(in crate::tui_shell) fn pop_view(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }
}
