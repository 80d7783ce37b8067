mod common;

use anyhow::Result;

use realmdeck::model::AuthStatus;
use realmdeck::remote::{RemoteClient, UnlockOutcome};
use realmdeck::session::{LockState, SessionLock};

use common::BackendState;

fn observe_backend(session: &mut SessionLock, client: &RemoteClient) -> Result<Option<AuthStatus>> {
    match client.auth_status() {
        Ok(Some(status)) => {
            session.observe(status);
            Ok(Some(status))
        }
        Ok(None) => {
            session.observe_unavailable();
            Ok(None)
        }
        Err(_) => {
            session.observe_error();
            Ok(None)
        }
    }
}

#[test]
fn locked_backend_gates_until_the_right_pin() -> Result<()> {
    let mut state = BackendState::default();
    state.admin_pin = Some("7777".to_string());
    state.locked = true;
    let server = common::spawn_server(state)?;
    let client = RemoteClient::new(&server.base_url)?;

    let mut session = SessionLock::default();
    observe_backend(&mut session, &client)?;
    assert_eq!(session.state(), LockState::Locked);
    assert!(session.gates(false), "non-exempt views gated");
    assert!(!session.gates(true), "lock-exempt views still render");

    // Bad PIN: denied, state unchanged, recoverable.
    match client.unlock("0000")? {
        UnlockOutcome::Denied => session.observe_error(),
        other => panic!("expected denial, got {:?}", other),
    }
    assert_eq!(session.state(), LockState::Locked);

    // Good PIN: only now does the session unlock.
    match client.unlock("7777")? {
        UnlockOutcome::Granted(status) => {
            session.unlock_granted();
            session.observe(status);
        }
        other => panic!("expected grant, got {:?}", other),
    }
    assert_eq!(session.state(), LockState::Unlocked);
    assert!(!session.gates(false), "gate recomputes without a reload");
    Ok(())
}

#[test]
fn optimistic_lock_shows_before_backend_ack() -> Result<()> {
    let mut state = BackendState::default();
    state.admin_pin = Some("7777".to_string());
    state.locked = false;
    let server = common::spawn_server(state)?;
    let client = RemoteClient::new(&server.base_url)?;

    let mut session = SessionLock::default();
    observe_backend(&mut session, &client)?;
    assert_eq!(session.state(), LockState::Unlocked);

    // The UI locks before the notify call goes out.
    session.lock_optimistic();
    assert_eq!(session.state(), LockState::Locked);

    // Backend ack catches up.
    let status = client.lock()?;
    session.observe(status);
    assert_eq!(session.state(), LockState::Locked);
    assert!(server.state.lock().unwrap().locked);
    Ok(())
}

#[test]
fn lock_notify_failure_never_reverts_to_unlocked() -> Result<()> {
    let mut state = BackendState::default();
    state.admin_pin = Some("7777".to_string());
    let server = common::spawn_server(state)?;
    let client = RemoteClient::new(&server.base_url)?;

    let mut session = SessionLock::default();
    observe_backend(&mut session, &client)?;
    assert_eq!(session.state(), LockState::Unlocked);

    session.lock_optimistic();
    drop(server);

    // The notify call fails; the console stays locked.
    assert!(client.lock().is_err());
    session.observe_error();
    assert_eq!(session.state(), LockState::Locked);
    Ok(())
}

#[test]
fn external_lock_is_picked_up_by_the_next_poll() -> Result<()> {
    let mut state = BackendState::default();
    state.admin_pin = Some("7777".to_string());
    state.locked = false;
    let server = common::spawn_server(state)?;
    let client = RemoteClient::new(&server.base_url)?;

    let mut session = SessionLock::default();
    observe_backend(&mut session, &client)?;
    assert_eq!(session.state(), LockState::Unlocked);

    // Another session locks the stack.
    server.state.lock().unwrap().locked = true;
    observe_backend(&mut session, &client)?;
    assert_eq!(session.state(), LockState::Locked);

    // And a later poll reporting unlocked does not silently unlock us.
    server.state.lock().unwrap().locked = false;
    observe_backend(&mut session, &client)?;
    assert_eq!(session.state(), LockState::Locked);
    Ok(())
}

#[test]
fn stack_without_auth_endpoint_never_gates() -> Result<()> {
    let mut state = BackendState::default();
    state.auth_deployed = false;
    let server = common::spawn_server(state)?;
    let client = RemoteClient::new(&server.base_url)?;

    let mut session = SessionLock::default();
    observe_backend(&mut session, &client)?;
    assert_eq!(session.state(), LockState::NoPin);
    assert!(!session.gates(false));
    Ok(())
}
