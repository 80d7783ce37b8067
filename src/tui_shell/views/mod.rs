mod audio;
mod campaigns;
mod characters;
mod dice;
mod logs;
mod overview;
mod vault;

pub(in crate::tui_shell) use audio::AudioView;
pub(in crate::tui_shell) use campaigns::CampaignsView;
pub(in crate::tui_shell) use characters::CharactersView;
pub(in crate::tui_shell) use dice::DiceView;
pub(in crate::tui_shell) use logs::LogsView;
pub(in crate::tui_shell) use overview::OverviewView;
pub(in crate::tui_shell) use vault::VaultView;
