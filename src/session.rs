//! PIN-lock session state, derived from the backend's reported auth status
//! plus explicit lock/unlock actions. Views consult the gating predicate on
//! every render; nothing caches the decision.

use crate::model::AuthStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockState {
    /// No PIN configured; no gating anywhere.
    NoPin,
    /// PIN configured and this session has not authenticated.
    Locked,
    /// PIN configured and this session has authenticated.
    Unlocked,
}

impl LockState {
    pub fn label(self) -> &'static str {
        match self {
            LockState::NoPin => "open",
            LockState::Locked => "locked",
            LockState::Unlocked => "unlocked",
        }
    }
}

#[derive(Debug)]
pub struct SessionLock {
    state: LockState,
}

impl Default for SessionLock {
    fn default() -> Self {
        // Gating stays off until the backend reports a PIN.
        Self {
            state: LockState::NoPin,
        }
    }
}

impl SessionLock {
    pub fn state(&self) -> LockState {
        self.state
    }

    /// Fold in one poll tick's auth report.
    ///
    /// `locked=true` always wins (covers initial load and a lock issued from
    /// another session). A report of `locked=false` never upgrades a session
    /// that is already `Locked` — only a successful credential check does.
    pub fn observe(&mut self, status: AuthStatus) {
        self.state = match (status.has_pin, status.locked) {
            (false, _) => LockState::NoPin,
            (true, true) => LockState::Locked,
            (true, false) => match self.state {
                LockState::Locked => LockState::Locked,
                _ => LockState::Unlocked,
            },
        };
    }

    /// The auth endpoint is not deployed: gating is defined to be off.
    pub fn observe_unavailable(&mut self) {
        self.state = LockState::NoPin;
    }

    /// Transient auth fetch failure: keep whatever we knew. A missed poll
    /// must neither unlock a locked session nor lock out the console.
    pub fn observe_error(&mut self) {}

    /// Successful credential check.
    pub fn unlock_granted(&mut self) {
        if self.state == LockState::Locked {
            self.state = LockState::Unlocked;
        }
    }

    /// Explicit lock action: applied immediately, before the backend
    /// acknowledges. A failed notify call leaves the console locked; the
    /// caller surfaces the warning.
    pub fn lock_optimistic(&mut self) {
        if self.state == LockState::Unlocked {
            self.state = LockState::Locked;
        }
    }

    /// Whether a view renders its locked placeholder. Evaluated fresh on
    /// every render.
    pub fn gates(&self, view_is_exempt: bool) -> bool {
        self.state == LockState::Locked && !view_is_exempt
    }
}
