//! Serialized user confirmation/input requests. Any part of the console can
//! ask for a confirm or a prompt without holding a reference to the UI; the
//! arbiter keeps at most one request visible, queues the rest FIFO, and
//! guarantees every request's completion runs exactly once — including
//! requests issued before a host exists (safe default) and requests still
//! pending at shutdown (drained to the safe default).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    Confirm,
    Prompt,
}

#[derive(Clone, Debug)]
pub struct ConfirmOptions {
    pub title: String,
    pub body: Vec<String>,
    /// Destructive actions render with a warning accent.
    pub danger: bool,
}

impl ConfirmOptions {
    pub fn new(title: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            title: title.into(),
            body,
            danger: false,
        }
    }

    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }
}

#[derive(Clone, Debug)]
pub struct PromptOptions {
    pub title: String,
    pub body: Vec<String>,
    /// Mask typed characters (PIN entry).
    pub masked: bool,
    pub initial: Option<String>,
}

impl PromptOptions {
    pub fn new(title: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            title: title.into(),
            body,
            masked: false,
            initial: None,
        }
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn with_initial(mut self, s: impl Into<String>) -> Self {
        self.initial = Some(s.into());
        self
    }
}

/// Display data for the currently open request; the host renders this and
/// owns the input buffer for prompts.
#[derive(Clone, Debug)]
pub struct OpenModal {
    pub kind: ModalKind,
    pub title: String,
    pub body: Vec<String>,
    pub danger: bool,
    pub masked: bool,
    pub initial: Option<String>,
}

/// The host's answer to the open request.
#[derive(Clone, Debug)]
pub enum Answer {
    Confirmed(bool),
    Submitted(Option<String>),
}

enum Resolver {
    Confirm(Box<dyn FnOnce(bool) + Send>),
    Prompt(Box<dyn FnOnce(Option<String>) + Send>),
}

impl Resolver {
    fn run(self, answer: Answer) {
        match (self, answer) {
            (Resolver::Confirm(done), Answer::Confirmed(yes)) => done(yes),
            (Resolver::Prompt(done), Answer::Submitted(value)) => done(value),
            // Kind mismatch falls back to the safe default.
            (Resolver::Confirm(done), _) => done(false),
            (Resolver::Prompt(done), _) => done(None),
        }
    }

    fn run_default(self) {
        match self {
            Resolver::Confirm(done) => done(false),
            Resolver::Prompt(done) => done(None),
        }
    }
}

struct Pending {
    view: OpenModal,
    resolver: Resolver,
}

#[derive(Default)]
struct Inner {
    host_ready: bool,
    open: Option<Pending>,
    queue: VecDeque<Pending>,
}

#[derive(Clone)]
pub struct ModalArbiter {
    inner: Arc<Mutex<Inner>>,
}

impl Default for ModalArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalArbiter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Called once when the UI starts presenting modals.
    pub fn register_host(&self) {
        self.lock().host_ready = true;
    }

    /// Deregister the host and drain every pending request to its safe
    /// default so no caller is left waiting.
    pub fn shutdown(&self) {
        let drained: Vec<Resolver> = {
            let mut inner = self.lock();
            inner.host_ready = false;
            inner
                .open
                .take()
                .into_iter()
                .chain(inner.queue.drain(..))
                .map(|p| p.resolver)
                .collect()
        };
        for resolver in drained {
            resolver.run_default();
        }
    }

    /// Ask the user a yes/no question. `done` runs exactly once: with the
    /// user's answer, or with `false` if no host is available (fail closed).
    pub fn confirm(&self, opts: ConfirmOptions, done: impl FnOnce(bool) + Send + 'static) {
        let view = OpenModal {
            kind: ModalKind::Confirm,
            title: opts.title,
            body: opts.body,
            danger: opts.danger,
            masked: false,
            initial: None,
        };
        self.submit(Pending {
            view,
            resolver: Resolver::Confirm(Box::new(done)),
        });
    }

    /// Ask the user for a line of text. `done` runs exactly once: with
    /// `Some(value)` on submit, `None` on cancel or when no host is
    /// available (fail empty).
    pub fn prompt(&self, opts: PromptOptions, done: impl FnOnce(Option<String>) + Send + 'static) {
        let view = OpenModal {
            kind: ModalKind::Prompt,
            title: opts.title,
            body: opts.body,
            danger: false,
            masked: opts.masked,
            initial: opts.initial,
        };
        self.submit(Pending {
            view,
            resolver: Resolver::Prompt(Box::new(done)),
        });
    }

    fn submit(&self, pending: Pending) {
        let rejected = {
            let mut inner = self.lock();
            if !inner.host_ready {
                Some(pending.resolver)
            } else if inner.open.is_some() || !inner.queue.is_empty() {
                // Never jump the queue: a request issued while one is open
                // waits its turn instead of clobbering it.
                inner.queue.push_back(pending);
                None
            } else {
                inner.open = Some(pending);
                None
            }
        };
        if let Some(resolver) = rejected {
            resolver.run_default();
        }
    }

    /// The request the host should be presenting, if any.
    pub fn open_view(&self) -> Option<OpenModal> {
        self.lock().open.as_ref().map(|p| p.view.clone())
    }

    pub fn is_open(&self) -> bool {
        self.lock().open.is_some()
    }

    pub fn queued(&self) -> usize {
        self.lock().queue.len()
    }

    /// Resolve the open request with the host's answer and promote the next
    /// queued request. No-op when nothing is open.
    pub fn resolve(&self, answer: Answer) {
        let resolver = {
            let mut inner = self.lock();
            match inner.open.take() {
                Some(p) => p.resolver,
                None => return,
            }
        };

        // Run outside the lock: the completion may issue follow-up requests.
        resolver.run(answer);

        let mut inner = self.lock();
        if inner.open.is_none()
            && let Some(next) = inner.queue.pop_front()
        {
            inner.open = Some(next);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned arbiter mutex means a completion panicked mid-resolve;
        // the state itself is still coherent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;

    fn confirm_opts(title: &str) -> ConfirmOptions {
        ConfirmOptions::new(title, vec!["sure?".to_string()])
    }

    #[test]
    fn confirm_before_host_fails_closed() {
        let arbiter = ModalArbiter::new();
        let (tx, rx) = mpsc::channel();
        arbiter.confirm(confirm_opts("Delete Variable"), move |yes| {
            tx.send(yes).unwrap();
        });
        assert_eq!(rx.try_recv(), Ok(false));
        assert!(!arbiter.is_open());
    }

    #[test]
    fn prompt_before_host_fails_empty() {
        let arbiter = ModalArbiter::new();
        let (tx, rx) = mpsc::channel();
        arbiter.prompt(PromptOptions::new("PIN", vec![]), move |v| {
            tx.send(v).unwrap();
        });
        assert_eq!(rx.try_recv(), Ok(None));
    }

    #[test]
    fn second_confirm_queues_and_both_resolve_in_order() {
        let arbiter = ModalArbiter::new();
        arbiter.register_host();

        let (tx, rx) = mpsc::channel();
        let tx1 = tx.clone();
        arbiter.confirm(confirm_opts("Delete Variable"), move |yes| {
            tx1.send(("first", yes)).unwrap();
        });
        arbiter.confirm(confirm_opts("Delete Variable"), move |yes| {
            tx.send(("second", yes)).unwrap();
        });

        assert!(arbiter.is_open());
        assert_eq!(arbiter.queued(), 1);

        arbiter.resolve(Answer::Confirmed(true));
        assert_eq!(rx.try_recv(), Ok(("first", true)));

        // Second request was promoted, not dropped.
        assert!(arbiter.is_open());
        arbiter.resolve(Answer::Confirmed(false));
        assert_eq!(rx.try_recv(), Ok(("second", false)));
        assert!(!arbiter.is_open());
    }

    #[test]
    fn one_visible_modal_across_kinds() {
        let arbiter = ModalArbiter::new();
        arbiter.register_host();

        arbiter.confirm(confirm_opts("Restart Stack"), |_| {});
        let (tx, rx) = mpsc::channel();
        arbiter.prompt(PromptOptions::new("PIN", vec![]).masked(), move |v| {
            tx.send(v).unwrap();
        });

        // The prompt waits behind the confirm.
        assert_eq!(arbiter.open_view().unwrap().kind, ModalKind::Confirm);
        assert_eq!(arbiter.queued(), 1);

        arbiter.resolve(Answer::Confirmed(false));
        assert_eq!(arbiter.open_view().unwrap().kind, ModalKind::Prompt);

        arbiter.resolve(Answer::Submitted(Some("1234".to_string())));
        assert_eq!(rx.try_recv(), Ok(Some("1234".to_string())));
    }

    #[test]
    fn shutdown_drains_to_safe_defaults() {
        let arbiter = ModalArbiter::new();
        arbiter.register_host();

        let count = Arc::new(AtomicUsize::new(0));
        let (c1, c2) = (Arc::clone(&count), Arc::clone(&count));
        arbiter.confirm(confirm_opts("a"), move |yes| {
            assert!(!yes);
            c1.fetch_add(1, Ordering::SeqCst);
        });
        arbiter.prompt(PromptOptions::new("b", vec![]), move |v| {
            assert!(v.is_none());
            c2.fetch_add(1, Ordering::SeqCst);
        });

        arbiter.shutdown();
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(!arbiter.is_open());

        // After shutdown the host is gone again: fail closed.
        let (tx, rx) = mpsc::channel();
        arbiter.confirm(confirm_opts("late"), move |yes| {
            tx.send(yes).unwrap();
        });
        assert_eq!(rx.try_recv(), Ok(false));
    }

    #[test]
    fn completion_may_issue_a_follow_up_request() {
        let arbiter = ModalArbiter::new();
        arbiter.register_host();

        let (tx, rx) = mpsc::channel();
        let chained = arbiter.clone();
        // First confirmation spawns a second one from inside its completion
        // (the force-delete pattern).
        arbiter.confirm(confirm_opts("Delete Asset"), move |yes| {
            if yes {
                let tx = tx.clone();
                chained.confirm(confirm_opts("Force Delete"), move |force| {
                    tx.send(force).unwrap();
                });
            }
        });

        arbiter.resolve(Answer::Confirmed(true));
        assert!(arbiter.is_open());
        arbiter.resolve(Answer::Confirmed(true));
        assert_eq!(rx.try_recv(), Ok(true));
    }

    #[test]
    fn resolve_without_open_request_is_a_no_op() {
        let arbiter = ModalArbiter::new();
        arbiter.register_host();
        arbiter.resolve(Answer::Confirmed(true));
        assert!(!arbiter.is_open());
    }
}
