use super::UiMode;

#[derive(Clone, Copy, Debug)]
pub(super) struct CommandDef {
    pub(super) name: &'static str,
    pub(super) aliases: &'static [&'static str],
    pub(super) usage: &'static str,
    pub(super) help: &'static str,
}

fn global_defs() -> Vec<CommandDef> {
    vec![
        CommandDef {
            name: "help",
            aliases: &["h", "?"],
            usage: "help",
            help: "Show commands for this view",
        },
        CommandDef {
            name: "overview",
            aliases: &["ov"],
            usage: "overview",
            help: "Command center",
        },
        CommandDef {
            name: "audio",
            aliases: &[],
            usage: "audio",
            help: "Audio registry editor",
        },
        CommandDef {
            name: "vault",
            aliases: &["env"],
            usage: "vault",
            help: "Environment vault (PIN gated)",
        },
        CommandDef {
            name: "campaigns",
            aliases: &[],
            usage: "campaigns",
            help: "Campaign library",
        },
        CommandDef {
            name: "heroes",
            aliases: &["chars"],
            usage: "heroes",
            help: "Character roster",
        },
        CommandDef {
            name: "logs",
            aliases: &[],
            usage: "logs [service]",
            help: "Tail a service log",
        },
        CommandDef {
            name: "dice",
            aliases: &[],
            usage: "dice",
            help: "Dice engine",
        },
        CommandDef {
            name: "roll",
            aliases: &[],
            usage: "roll <NdS[+M]>",
            help: "Roll dice",
        },
        CommandDef {
            name: "connect",
            aliases: &[],
            usage: "connect <url>",
            help: "Point at the stack API",
        },
        CommandDef {
            name: "refresh",
            aliases: &["r"],
            usage: "refresh",
            help: "Re-fetch backend state now",
        },
        CommandDef {
            name: "lock",
            aliases: &[],
            usage: "lock",
            help: "Lock the console",
        },
        CommandDef {
            name: "unlock",
            aliases: &[],
            usage: "unlock",
            help: "Unlock with the admin PIN",
        },
        CommandDef {
            name: "restart",
            aliases: &[],
            usage: "restart <service>|stack",
            help: "Restart containers",
        },
        CommandDef {
            name: "debug",
            aliases: &[],
            usage: "debug",
            help: "Show recent internal events",
        },
        CommandDef {
            name: "quit",
            aliases: &["q"],
            usage: "quit",
            help: "Exit",
        },
    ]
}

pub(super) fn defs_for(mode: UiMode) -> Vec<CommandDef> {
    let mut out = global_defs();
    match mode {
        UiMode::Overview | UiMode::Logs => {
            if mode == UiMode::Logs {
                out.extend([
                    CommandDef {
                        name: "svc",
                        aliases: &["service"],
                        usage: "svc <service>",
                        help: "Switch the tailed service",
                    },
                    CommandDef {
                        name: "tail",
                        aliases: &[],
                        usage: "tail",
                        help: "Re-fetch the log now",
                    },
                ]);
            }
        }
        UiMode::Audio => out.extend([
            CommandDef {
                name: "sync",
                aliases: &[],
                usage: "sync",
                help: "Refresh voice/track catalogs",
            },
            CommandDef {
                name: "add",
                aliases: &[],
                usage: "add trigger|scape [label]",
                help: "Add a registry row (unsaved)",
            },
            CommandDef {
                name: "rm",
                aliases: &[],
                usage: "rm trigger|scape <row>",
                help: "Remove a registry row (unsaved)",
            },
            CommandDef {
                name: "set",
                aliases: &[],
                usage: "set name|voice|trigger|scape ...",
                help: "Edit the registry (unsaved)",
            },
            CommandDef {
                name: "save",
                aliases: &[],
                usage: "save",
                help: "Persist the audio registry",
            },
            CommandDef {
                name: "discard",
                aliases: &[],
                usage: "discard",
                help: "Drop unsaved edits",
            },
        ]),
        UiMode::Vault => out.extend([
            CommandDef {
                name: "set",
                aliases: &[],
                usage: "set <KEY> <value>",
                help: "Add or update a variable",
            },
            CommandDef {
                name: "rm",
                aliases: &["delete"],
                usage: "rm <KEY>",
                help: "Delete a variable (confirmed)",
            },
            CommandDef {
                name: "reveal",
                aliases: &[],
                usage: "reveal <KEY>",
                help: "Show a value in clear text",
            },
            CommandDef {
                name: "hide",
                aliases: &[],
                usage: "hide <KEY>",
                help: "Mask a value again",
            },
        ]),
        UiMode::Campaigns => out.extend([
            CommandDef {
                name: "use",
                aliases: &["load"],
                usage: "use <id|row>",
                help: "Activate a campaign",
            },
            CommandDef {
                name: "rm",
                aliases: &["delete"],
                usage: "rm <id|row>",
                help: "Delete a campaign (confirmed)",
            },
        ]),
        UiMode::Characters => out.extend([
            CommandDef {
                name: "open",
                aliases: &[],
                usage: "open <row|id>",
                help: "Open a character sheet",
            },
            CommandDef {
                name: "close",
                aliases: &[],
                usage: "close",
                help: "Close the open sheet",
            },
            CommandDef {
                name: "set",
                aliases: &[],
                usage: "set hp|ac|speed|stat ...",
                help: "Edit the open sheet (unsaved)",
            },
            CommandDef {
                name: "save",
                aliases: &[],
                usage: "save",
                help: "Persist the open sheet",
            },
            CommandDef {
                name: "discard",
                aliases: &[],
                usage: "discard",
                help: "Drop unsaved sheet edits",
            },
            CommandDef {
                name: "gallery",
                aliases: &[],
                usage: "gallery rm <asset-id>",
                help: "Delete a gallery asset",
            },
        ]),
        UiMode::Dice => out.push(CommandDef {
            name: "clear",
            aliases: &[],
            usage: "clear",
            help: "Clear the roll log (confirmed)",
        }),
    }
    out
}
