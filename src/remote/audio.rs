use anyhow::{Context, Result};

use super::{RemoteClient, SaveAudioAck, with_retries};
use crate::model::{AudioRegistry, TrackAsset, VoiceAsset};

impl RemoteClient {
    /// Persist the audio registry; returns the server-normalized document.
    pub fn save_audio_registry(&self, registry: &AudioRegistry) -> Result<AudioRegistry> {
        let resp = self
            .client
            .post(self.url("/system/audio/save"))
            .json(registry)
            .send()
            .context("save audio registry")?;
        let ack: SaveAudioAck = self
            .ensure_ok(resp, "save audio registry")?
            .json()
            .context("parse save audio response")?;
        Ok(ack.audio_registry)
    }

    pub fn list_voices(&self) -> Result<Vec<VoiceAsset>> {
        with_retries("list voices", || {
            let resp = self
                .client
                .get(self.url("/system/audio/voices"))
                .send()
                .context("list voices")?;
            let voices: Vec<VoiceAsset> = self
                .ensure_ok(resp, "list voices")?
                .json()
                .context("parse voices")?;
            Ok(voices)
        })
    }

    pub fn list_tracks(&self) -> Result<Vec<TrackAsset>> {
        with_retries("list tracks", || {
            let resp = self
                .client
                .get(self.url("/system/audio/kenku/tracks"))
                .send()
                .context("list tracks")?;
            let tracks: Vec<TrackAsset> = self
                .ensure_ok(resp, "list tracks")?
                .json()
                .context("parse tracks")?;
            Ok(tracks)
        })
    }
}
