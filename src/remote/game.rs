//! Campaign content: party roster, characters, gallery assets.

use anyhow::{Context, Result};

use super::{DeleteOutcome, RemoteClient, with_retries};
use crate::model::{CharacterSheet, CharacterSummary, PartyMember};

impl RemoteClient {
    pub fn discord_members(&self) -> Result<Vec<PartyMember>> {
        let resp = self
            .client
            .get(self.url("/game/discord/members"))
            .send()
            .context("fetch discord members")?;
        let members: Vec<PartyMember> = self
            .ensure_ok(resp, "fetch discord members")?
            .json()
            .context("parse discord members")?;
        Ok(members)
    }

    pub fn list_characters(&self) -> Result<Vec<CharacterSummary>> {
        with_retries("list characters", || {
            let resp = self
                .client
                .get(self.url("/game/characters"))
                .send()
                .context("list characters")?;
            let roster: Vec<CharacterSummary> = self
                .ensure_ok(resp, "list characters")?
                .json()
                .context("parse characters")?;
            Ok(roster)
        })
    }

    pub fn get_character(&self, id: &str) -> Result<CharacterSheet> {
        let resp = self
            .client
            .get(self.url(&format!("/game/characters/{}", id)))
            .send()
            .context("fetch character")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("character not found: {}", id);
        }

        let sheet: CharacterSheet = self
            .ensure_ok(resp, "fetch character")?
            .json()
            .context("parse character")?;
        Ok(sheet)
    }

    pub fn save_character(&self, sheet: &CharacterSheet) -> Result<()> {
        let resp = self
            .client
            .post(self.url(&format!("/game/characters/{}/save", sheet.id)))
            .json(sheet)
            .send()
            .context("save character")?;
        let _ = self.ensure_ok(resp, "save character")?;
        Ok(())
    }

    /// Delete a gallery asset. A 409 means the asset is referenced by other
    /// content; the caller offers an explicit force pass instead of failing
    /// or forcing silently.
    pub fn delete_asset(&self, asset_id: &str, force: bool) -> Result<DeleteOutcome> {
        let mut url = self.url(&format!("/game/assets/{}", asset_id));
        if force {
            url.push_str("?force=true");
        }
        let resp = self
            .client
            .delete(url)
            .send()
            .context("delete asset")?;

        if resp.status() == reqwest::StatusCode::CONFLICT {
            let reason = resp
                .json::<serde_json::Value>()
                .ok()
                .and_then(|v| {
                    v.get("detail")
                        .and_then(|d| d.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or_else(|| "asset is referenced elsewhere".to_string());
            return Ok(DeleteOutcome::Conflict { reason });
        }

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("asset not found: {}", asset_id);
        }

        let _ = self.ensure_ok(resp, "delete asset")?;
        Ok(DeleteOutcome::Deleted)
    }
}
