use serde::Deserialize;

use crate::model::{AudioRegistry, AuthStatus};

/// Body of every `/system/auth/*` action response.
#[derive(Debug, Deserialize)]
pub struct AuthAck {
    #[serde(default)]
    pub ok: bool,
    pub locked: bool,
    pub has_pin: bool,
}

impl AuthAck {
    pub fn status(&self) -> AuthStatus {
        AuthStatus {
            has_pin: self.has_pin,
            locked: self.locked,
        }
    }
}

/// Outcome of a PIN check. A denial is an expected, recoverable answer, not
/// a transport error.
#[derive(Debug)]
pub enum UnlockOutcome {
    Granted(AuthStatus),
    Denied,
}

#[derive(Debug, Deserialize)]
pub struct SaveAudioAck {
    #[serde(default)]
    pub ok: bool,

    #[serde(default)]
    pub saved: bool,

    /// Server-normalized registry (rows with empty ids dropped, labels
    /// backfilled).
    pub audio_registry: AudioRegistry,
}

/// Outcome of deleting a list-like resource. `Conflict` means the backend
/// refused because the resource is referenced elsewhere; the caller decides
/// whether to retry with force.
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted,
    Conflict { reason: String },
}
