use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Initialize a console directory (.realmdeck)
    Init {
        /// Re-initialize if .realmdeck already exists
        #[arg(long)]
        force: bool,
        /// Path to initialize (defaults to current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Configure the backend connection
    Connect {
        #[arg(long)]
        url: String,
        /// Poll interval used by the interactive console
        #[arg(long, default_value_t = 10)]
        interval: u64,
    },

    /// Show backend status (reachability, lock state, active campaign)
    Status {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the audio registry
    Audio {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Environment vault
    Env {
        #[command(subcommand)]
        command: EnvCommands,
    },

    /// Campaign library
    Campaigns {
        #[command(subcommand)]
        command: CampaignCommands,
    },

    /// Print a service's container log tail
    Logs { service: String },

    /// Restart one service, or `stack` for everything
    Restart {
        service: String,
        /// Required for `stack`
        #[arg(long)]
        yes: bool,
    },

    /// Lock the admin session
    Lock,

    /// Unlock the admin session with the PIN
    Unlock {
        #[arg(long)]
        pin: String,
    },

    /// Roll dice (NdS[+/-M])
    Roll {
        spec: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum EnvCommands {
    /// List variables
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Add or update a variable
    Set { key: String, value: String },
    /// Delete a variable
    Unset {
        key: String,
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum CampaignCommands {
    /// List campaigns
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Activate a campaign
    Use { id: String },
    /// Delete a campaign
    Delete {
        id: String,
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
}
