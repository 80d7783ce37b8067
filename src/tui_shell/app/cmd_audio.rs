use super::*;

use crate::model::{Archetype, Soundscape, new_item_id};

impl App {
    pub(super) fn audio_command(&mut self, cmd: &str, args: &[String]) {
        match cmd {
            "sync" => self.audio_sync_assets(),
            "add" => self.audio_add(args),
            "rm" => self.audio_rm(args),
            "set" => self.audio_set(args),
            "save" => self.audio_save(),
            "discard" => {
                self.audio.discard();
                self.push_output(vec!["unsaved audio edits discarded".to_string()]);
            }
            _ => self.push_error(format!("unknown command: {} (try `help`)", cmd)),
        }
    }

    /// Refresh the selectable voice/track lists. These are plain asset
    /// catalogs, not part of the bound registry document, so a sync never
    /// touches unsaved edits.
    fn audio_sync_assets(&mut self) {
        let Some(client) = self.require_client() else {
            return;
        };
        match client.list_voices() {
            Ok(voices) => self.voices = voices,
            Err(err) => {
                self.push_error(format!("sync voices: {:#}", err));
                return;
            }
        }
        match client.list_tracks() {
            Ok(tracks) => self.tracks = tracks,
            Err(err) => {
                self.push_error(format!("sync tracks: {:#}", err));
                return;
            }
        }
        self.push_output(vec![format!(
            "audio assets synced ({} voices, {} tracks)",
            self.voices.len(),
            self.tracks.len()
        )]);
    }

    fn audio_add(&mut self, args: &[String]) {
        let usage = "usage: add trigger|scape [label...]";
        let Some(kind) = args.first() else {
            self.push_error(usage.to_string());
            return;
        };
        let label = if args.len() > 1 {
            args[1..].join(" ")
        } else {
            String::new()
        };

        match kind.as_str() {
            "trigger" | "archetype" => {
                let label = if label.is_empty() {
                    "New Trigger".to_string()
                } else {
                    label
                };
                // Dirty from the moment the row exists: the next poll tick
                // would otherwise erase it.
                self.audio.edit(|reg| {
                    reg.archetypes.push(Archetype {
                        id: new_item_id("archetype"),
                        label,
                        voice_id: String::new(),
                    });
                });
                self.push_output(vec!["trigger added (unsaved)".to_string()]);
            }
            "scape" | "soundscape" => {
                let label = if label.is_empty() {
                    "New Soundscape".to_string()
                } else {
                    label
                };
                self.audio.edit(|reg| {
                    reg.soundscapes.push(Soundscape {
                        id: new_item_id("soundscape"),
                        label,
                        track_id: String::new(),
                    });
                });
                self.push_output(vec!["soundscape added (unsaved)".to_string()]);
            }
            _ => self.push_error(usage.to_string()),
        }
    }

    fn audio_rm(&mut self, args: &[String]) {
        let usage = "usage: rm trigger|scape <row>";
        let (Some(kind), Some(row)) = (args.first(), args.get(1)) else {
            self.push_error(usage.to_string());
            return;
        };
        let Ok(n) = row.parse::<usize>() else {
            self.push_error(usage.to_string());
            return;
        };
        let idx = n.saturating_sub(1);

        match kind.as_str() {
            "trigger" | "archetype" => {
                if idx >= self.audio.local().archetypes.len() {
                    self.push_error(format!("no trigger row {}", n));
                    return;
                }
                self.audio.edit(|reg| {
                    reg.archetypes.remove(idx);
                });
                self.push_output(vec![format!("trigger {} removed (unsaved)", n)]);
            }
            "scape" | "soundscape" => {
                if idx >= self.audio.local().soundscapes.len() {
                    self.push_error(format!("no soundscape row {}", n));
                    return;
                }
                self.audio.edit(|reg| {
                    reg.soundscapes.remove(idx);
                });
                self.push_output(vec![format!("soundscape {} removed (unsaved)", n)]);
            }
            _ => self.push_error(usage.to_string()),
        }
    }

    fn audio_set(&mut self, args: &[String]) {
        let usage = "usage: set name <text> | set voice <voice-id> | set trigger <row> label|voice <value> | set scape <row> label|track <value>";
        match args.first().map(|s| s.as_str()) {
            Some("name") => {
                let value = args[1..].join(" ");
                if value.is_empty() {
                    self.push_error(usage.to_string());
                    return;
                }
                self.audio.edit(|reg| reg.dm_name = value);
                self.push_output(vec!["DM name updated (unsaved)".to_string()]);
            }
            Some("voice") => {
                let Some(voice) = args.get(1) else {
                    self.push_error(usage.to_string());
                    return;
                };
                let voice = self.resolve_voice_id(voice);
                self.audio.edit(|reg| reg.dm_voice = voice);
                self.push_output(vec!["DM voice updated (unsaved)".to_string()]);
            }
            Some("trigger") => self.audio_set_row(args, true, usage),
            Some("scape") => self.audio_set_row(args, false, usage),
            _ => self.push_error(usage.to_string()),
        }
    }

    fn audio_set_row(&mut self, args: &[String], archetype: bool, usage: &str) {
        let (Some(row), Some(field)) = (args.get(1), args.get(2)) else {
            self.push_error(usage.to_string());
            return;
        };
        let Ok(n) = row.parse::<usize>() else {
            self.push_error(usage.to_string());
            return;
        };
        let idx = n.saturating_sub(1);
        let value = args[3..].join(" ");
        if value.is_empty() {
            self.push_error(usage.to_string());
            return;
        }

        if archetype {
            if idx >= self.audio.local().archetypes.len() {
                self.push_error(format!("no trigger row {}", n));
                return;
            }
            match field.as_str() {
                "label" => self.audio.edit(|reg| reg.archetypes[idx].label = value),
                "voice" => {
                    let voice = self.resolve_voice_id(&value);
                    self.audio.edit(|reg| reg.archetypes[idx].voice_id = voice);
                }
                _ => {
                    self.push_error(usage.to_string());
                    return;
                }
            }
        } else {
            if idx >= self.audio.local().soundscapes.len() {
                self.push_error(format!("no soundscape row {}", n));
                return;
            }
            match field.as_str() {
                "label" => self.audio.edit(|reg| reg.soundscapes[idx].label = value),
                "track" => {
                    let track = self.resolve_track_id(&value);
                    self.audio.edit(|reg| reg.soundscapes[idx].track_id = track);
                }
                _ => {
                    self.push_error(usage.to_string());
                    return;
                }
            }
        }
        self.push_output(vec!["row updated (unsaved)".to_string()]);
    }

    /// Accept a 1-based row into the synced voice list, or a raw id.
    fn resolve_voice_id(&self, arg: &str) -> String {
        if let Ok(n) = arg.parse::<usize>()
            && let Some(v) = self.voices.get(n.saturating_sub(1))
        {
            return v.id.clone();
        }
        arg.to_string()
    }

    fn resolve_track_id(&self, arg: &str) -> String {
        if let Ok(n) = arg.parse::<usize>()
            && let Some(t) = self.tracks.get(n.saturating_sub(1))
        {
            return t.id.clone();
        }
        arg.to_string()
    }

    fn audio_save(&mut self) {
        let Some(client) = self.require_client() else {
            return;
        };
        if !self.audio.dirty() {
            self.push_output(vec!["nothing to save".to_string()]);
            return;
        }

        let result = self
            .audio
            .save(|registry| client.save_audio_registry(registry).map(|_| ()));
        match result {
            Ok(()) => self.push_output(vec!["audio registry saved".to_string()]),
            Err(err) => {
                // Dirty flag survives; the next `save` retries the same edits.
                self.push_error(format!("save audio registry: {:#}", err));
            }
        }
    }
}
