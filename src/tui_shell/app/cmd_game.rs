use super::*;

impl App {
    // ---- characters ----------------------------------------------------

    pub(super) fn open_characters(&mut self) {
        let Some(client) = self.require_client() else {
            return;
        };
        match client.list_characters() {
            Ok(roster) => {
                self.push_view(Box::new(CharactersView::new(roster)));
            }
            Err(err) => self.push_error(format!("list characters: {:#}", err)),
        }
    }

    pub(super) fn characters_command(&mut self, cmd: &str, args: &[String]) {
        match cmd {
            "open" => self.character_open(args),
            "close" => {
                if self.sheet.as_ref().map(|b| b.dirty()).unwrap_or(false) {
                    self.push_error(
                        "sheet has unsaved edits (use `save` or `discard` first)".to_string(),
                    );
                    return;
                }
                self.sheet = None;
            }
            "set" => self.character_set(args),
            "save" => self.character_save(),
            "discard" => {
                if let Some(sheet) = self.sheet.as_mut() {
                    sheet.discard();
                    self.push_output(vec!["sheet edits discarded".to_string()]);
                }
            }
            "gallery" => self.gallery_command(args),
            _ => self.push_error(format!("unknown command: {} (try `help`)", cmd)),
        }
    }

    fn character_open(&mut self, args: &[String]) {
        let id = match args.first() {
            Some(arg) => match arg.parse::<usize>() {
                Ok(n) => {
                    let Some(id) = self
                        .current_view_mut::<CharactersView>()
                        .and_then(|v| v.roster.get(n.saturating_sub(1)))
                        .map(|c| c.id.clone())
                    else {
                        self.push_error(format!("no character row {}", n));
                        return;
                    };
                    id
                }
                Err(_) => arg.clone(),
            },
            None => {
                let Some(id) = self
                    .current_view_mut::<CharactersView>()
                    .and_then(|v| v.selected())
                    .map(|c| c.id.clone())
                else {
                    self.push_error("usage: open <row|id>".to_string());
                    return;
                };
                id
            }
        };

        if self.sheet.as_ref().map(|b| b.dirty()).unwrap_or(false) {
            self.push_error("sheet has unsaved edits (use `save` or `discard` first)".to_string());
            return;
        }

        let Some(client) = self.require_client() else {
            return;
        };
        match client.get_character(&id) {
            Ok(sheet) => {
                // Own binding, independent of the audio registry's dirtiness.
                let mut binding = EditableBinding::new(sheet.clone());
                binding.reconcile(sheet);
                self.sheet = Some(binding);
            }
            Err(err) => self.push_error(format!("open character: {:#}", err)),
        }
    }

    fn character_set(&mut self, args: &[String]) {
        let usage = "usage: set hp|ac|speed <n> | set stat <STAT> <n>";
        let Some(sheet) = self.sheet.as_mut() else {
            self.push_error("no sheet open (use `open <row>`)".to_string());
            return;
        };

        match args.first().map(|s| s.as_str()) {
            Some("hp") | Some("ac") | Some("speed") => {
                let field = args[0].clone();
                let Some(value) = args.get(1).and_then(|v| v.parse::<i32>().ok()) else {
                    self.push_error(usage.to_string());
                    return;
                };
                sheet.edit(|s| match field.as_str() {
                    "hp" => s.hp = value,
                    "ac" => s.ac = value,
                    _ => s.speed = value,
                });
                self.push_output(vec![format!("{} updated (unsaved)", field)]);
            }
            Some("stat") => {
                let (Some(stat), Some(value)) = (args.get(1), args.get(2)) else {
                    self.push_error(usage.to_string());
                    return;
                };
                let Ok(value) = value.parse::<i32>() else {
                    self.push_error(usage.to_string());
                    return;
                };
                let stat = stat.to_ascii_uppercase();
                sheet.edit(|s| {
                    s.stats.insert(stat, value);
                });
                self.push_output(vec!["stat updated (unsaved)".to_string()]);
            }
            _ => self.push_error(usage.to_string()),
        }
    }

    fn character_save(&mut self) {
        let Some(client) = self.require_client() else {
            return;
        };
        let Some(sheet) = self.sheet.as_mut() else {
            self.push_error("no sheet open".to_string());
            return;
        };
        if !sheet.dirty() {
            self.push_output(vec!["nothing to save".to_string()]);
            return;
        }
        match sheet.save(|s| client.save_character(s)) {
            Ok(()) => self.push_output(vec!["character saved".to_string()]),
            Err(err) => self.push_error(format!("save character: {:#}", err)),
        }
    }

    // ---- gallery assets ------------------------------------------------

    fn gallery_command(&mut self, args: &[String]) {
        match (args.first().map(|s| s.as_str()), args.get(1)) {
            (Some("rm"), Some(id)) => {
                let tx = self.actions_tx.clone();
                let target = id.clone();
                self.arbiter.confirm(
                    ConfirmOptions::new(
                        "Delete Asset",
                        vec![format!("Delete asset {}?", id)],
                    )
                    .danger(),
                    move |yes| {
                        if yes {
                            let _ = tx.send(AppAction::DeleteAsset {
                                id: target,
                                force: false,
                            });
                        }
                    },
                );
            }
            _ => self.push_error("usage: gallery rm <asset-id>".to_string()),
        }
    }

    pub(super) fn do_delete_asset(&mut self, id: &str, force: bool) {
        let Some(client) = self.require_client() else {
            return;
        };
        match client.delete_asset(id, force) {
            Ok(DeleteOutcome::Deleted) => {
                self.push_output(vec![format!("asset {} deleted", id)]);
            }
            Ok(DeleteOutcome::Conflict { reason }) => {
                if force {
                    // Forced delete still conflicted; nothing more to offer.
                    self.push_error(format!("delete asset: {}", reason));
                    return;
                }
                // Conflict becomes a second, explicit decision.
                let tx = self.actions_tx.clone();
                let target = id.to_string();
                self.arbiter.confirm(
                    ConfirmOptions::new(
                        "Force Delete",
                        vec![
                            reason,
                            "Delete anyway? References will break.".to_string(),
                        ],
                    )
                    .danger(),
                    move |yes| {
                        if yes {
                            let _ = tx.send(AppAction::DeleteAsset {
                                id: target,
                                force: true,
                            });
                        }
                    },
                );
            }
            Err(err) => self.push_error(format!("delete asset: {:#}", err)),
        }
    }

    // ---- dice ----------------------------------------------------------

    pub(super) fn cmd_roll(&mut self, args: &[String]) {
        let spec_str = if args.is_empty() {
            "1d20".to_string()
        } else {
            args.join("")
        };
        let spec: crate::dice::RollSpec = match spec_str.parse() {
            Ok(s) => s,
            Err(err) => {
                self.push_error(format!("{:#}", err));
                return;
            }
        };
        match crate::dice::roll(spec) {
            Ok(result) => {
                let line = format!(
                    "{} -> {} {:?}",
                    result.spec, result.total, result.rolls
                );
                if self.mode() != UiMode::Dice {
                    self.push_view(Box::new(DiceView::new()));
                }
                if let Some(v) = self.current_view_mut::<DiceView>() {
                    v.push(result);
                }
                self.push_output(vec![line]);
            }
            Err(err) => self.push_error(format!("roll: {:#}", err)),
        }
    }

    pub(super) fn dice_command(&mut self, cmd: &str, args: &[String]) {
        match cmd {
            "clear" => {
                let tx = self.actions_tx.clone();
                self.arbiter.confirm(
                    ConfirmOptions::new("Clear Roll Log", vec!["Clear all rolls?".to_string()]),
                    move |yes| {
                        if yes {
                            let _ = tx.send(AppAction::ClearRolls);
                        }
                    },
                );
            }
            // Bare `2d6` works as a roll inside the dice view.
            other if other.contains('d') => {
                let mut all = vec![other.to_string()];
                all.extend(args.iter().cloned());
                self.cmd_roll(&all);
            }
            _ => self.push_error(format!("unknown command: {} (try `help`)", cmd)),
        }
    }
}
