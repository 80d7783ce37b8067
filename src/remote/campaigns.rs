use anyhow::{Context, Result};

use super::RemoteClient;
use crate::model::Campaign;

impl RemoteClient {
    pub fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let resp = self
            .client
            .get(self.url("/system/campaigns/list"))
            .send()
            .context("list campaigns")?;
        let campaigns: Vec<Campaign> = self
            .ensure_ok(resp, "list campaigns")?
            .json()
            .context("parse campaigns")?;
        Ok(campaigns)
    }

    pub fn activate_campaign(&self, campaign_id: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.url("/system/campaigns/activate"))
            .json(&serde_json::json!({ "campaign_id": campaign_id }))
            .send()
            .context("activate campaign")?;
        let _ = self.ensure_ok(resp, "activate campaign")?;
        Ok(())
    }

    pub fn delete_campaign(&self, campaign_id: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.url(&format!("/system/campaigns/delete/{}", campaign_id)))
            .send()
            .context("delete campaign")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("campaign not found: {}", campaign_id);
        }

        let _ = self.ensure_ok(resp, "delete campaign")?;
        Ok(())
    }
}
