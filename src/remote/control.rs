//! Container lifecycle and log tailing.

use anyhow::{Context, Result};

use super::RemoteClient;

impl RemoteClient {
    /// Tail of a service's container log; plain text on the wire.
    pub fn service_logs(&self, service: &str) -> Result<String> {
        let resp = self
            .client
            .get(self.url(&format!("/system/control/logs/{}", service)))
            .send()
            .context("fetch service logs")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("container not found for service {}", service);
        }

        let text = self
            .ensure_ok(resp, "fetch service logs")?
            .text()
            .context("read service logs")?;
        Ok(text)
    }

    pub fn restart_service(&self, service: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.url(&format!("/system/control/restart/{}", service)))
            .send()
            .context("restart service")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("container not found for service {}", service);
        }

        let _ = self.ensure_ok(resp, "restart service")?;
        Ok(())
    }
}
