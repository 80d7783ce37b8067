use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::arbiter::{ConfirmOptions, ModalArbiter, PromptOptions};
use crate::model::{
    AudioRegistry, CharacterSheet, EnvVar, PartyMember, SystemConfig, TrackAsset, VoiceAsset,
};
use crate::remote::{DeleteOutcome, RemoteClient, UnlockOutcome};
use crate::session::{LockState, SessionLock};
use crate::store::ConsoleStore;
use crate::sync::{
    ConnHealth, ConnState, EditableBinding, PollEvent, PollPayload, PollStream, Poller, StaleGate,
};

use super::input::Input;
use super::modal_host;
use super::suggest::rank_commands;
use super::view::{RenderCtx, View};
use super::views::{
    AudioView, CampaignsView, CharactersView, DiceView, LogsView, OverviewView, VaultView,
};
use super::CommandDef;

mod cmd_audio;
mod cmd_game;
mod cmd_system;
mod cmd_vault;
mod dispatch;
mod event_loop;
mod lifecycle;
mod output;
mod poll_apply;
mod render;
mod state;
mod time_utils;

pub(super) use self::state::App;
pub(super) use self::state::{EntryKind, ScrollEntry};
pub(super) use self::time_utils::{fmt_since, fmt_ts_ui, now_ts};

/// Deferred work produced by arbiter completions; executed on the UI thread
/// between frames.
#[derive(Debug)]
pub(super) enum AppAction {
    RestartService(String),
    RestartStack,
    DeleteEnvVar(String),
    DeleteCampaign(String),
    Unlock(String),
    LockNow,
    DeleteAsset { id: String, force: bool },
    ClearRolls,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum UiMode {
    Overview,
    Audio,
    Vault,
    Campaigns,
    Characters,
    Logs,
    Dice,
}

impl UiMode {
    pub(super) fn prompt(self) -> &'static str {
        match self {
            UiMode::Overview => "deck>",
            UiMode::Audio => "audio>",
            UiMode::Vault => "vault>",
            UiMode::Campaigns => "campaigns>",
            UiMode::Characters => "heroes>",
            UiMode::Logs => "logs>",
            UiMode::Dice => "dice>",
        }
    }
}

pub(super) fn run() -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("the console requires an interactive terminal (TTY)");
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::load();
    let res = event_loop::run_loop(&mut terminal, &mut app);

    app.shutdown();

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}
