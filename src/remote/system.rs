//! System config, PIN auth, and env vault endpoints.

use anyhow::{Context, Result};

use super::{AuthAck, RemoteClient, UnlockOutcome};
use crate::model::{AuthStatus, EnvVar, SystemConfig};

impl RemoteClient {
    pub fn fetch_config(&self) -> Result<SystemConfig> {
        let resp = self
            .client
            .get(self.url("/system/config"))
            .send()
            .context("fetch system config")?;
        let config: SystemConfig = self
            .ensure_ok(resp, "fetch system config")?
            .json()
            .context("parse system config")?;
        Ok(config)
    }

    /// `Ok(None)` means the auth endpoint is not deployed in this stack;
    /// the session machine treats that as "no gating".
    pub fn auth_status(&self) -> Result<Option<AuthStatus>> {
        let resp = self
            .client
            .get(self.url("/system/auth/status"))
            .send()
            .context("fetch auth status")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let ack: AuthAck = self
            .ensure_ok(resp, "fetch auth status")?
            .json()
            .context("parse auth status")?;
        Ok(Some(ack.status()))
    }

    /// Best-effort lock notify; the console has already locked itself.
    pub fn lock(&self) -> Result<AuthStatus> {
        let resp = self
            .client
            .post(self.url("/system/auth/lock"))
            .send()
            .context("lock session")?;
        let ack: AuthAck = self
            .ensure_ok(resp, "lock session")?
            .json()
            .context("parse lock response")?;
        Ok(ack.status())
    }

    pub fn unlock(&self, pin: &str) -> Result<UnlockOutcome> {
        let resp = self
            .client
            .post(self.url("/system/auth/unlock"))
            .json(&serde_json::json!({ "pin": pin }))
            .send()
            .context("unlock session")?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(UnlockOutcome::Denied);
        }

        let ack: AuthAck = self
            .ensure_ok(resp, "unlock session")?
            .json()
            .context("parse unlock response")?;
        Ok(UnlockOutcome::Granted(ack.status()))
    }

    pub fn env_all(&self) -> Result<Vec<EnvVar>> {
        let resp = self
            .client
            .get(self.url("/system/env/all"))
            .send()
            .context("list env vars")?;
        let vars: Vec<EnvVar> = self
            .ensure_ok(resp, "list env vars")?
            .json()
            .context("parse env vars")?;
        Ok(vars)
    }

    pub fn env_set(&self, key: &str, value: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.url("/system/env"))
            .json(&serde_json::json!({ "key": key, "value": value }))
            .send()
            .context("set env var")?;
        let _ = self.ensure_ok(resp, "set env var")?;
        Ok(())
    }

    /// The backend deletes a key when handed an empty value.
    pub fn env_delete(&self, key: &str) -> Result<()> {
        self.env_set(key, "")
    }
}
