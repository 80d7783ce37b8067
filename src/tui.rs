use anyhow::Result;

pub fn run() -> Result<()> {
    crate::tui_shell::run()
}
