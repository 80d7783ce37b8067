//! State synchronization between the backend and locally edited documents:
//! a dirty-tracked editable binding per server-owned document, and a
//! background poller whose results are applied through a staleness gate.

mod binding;
mod poller;

pub use binding::{EditableBinding, Reconcile};
pub use poller::{
    ConnHealth, ConnState, PollEvent, PollPayload, PollStream, Poller, StaleGate,
};
