use anyhow::Result;

mod app;
mod commands;
mod input;
mod modal_host;
mod suggest;
mod view;
mod views;

// Core TUI types/helpers shared by submodules via `super::...`.
use app::{EntryKind, UiMode, fmt_since, fmt_ts_ui};
use commands::CommandDef;
use view::{RenderCtx, View, render_view_chrome};

pub(crate) fn run() -> Result<()> {
    app::run()
}
