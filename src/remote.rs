use std::time::Duration;

use anyhow::{Context, Result};

mod http_client;
use self::http_client::with_retries;

mod types;
pub use self::types::*;

mod audio;
mod campaigns;
mod control;
mod game;
mod system;

/// Blocking client over the assistant stack's REST backend. The console
/// never talks to the wire anywhere else.
#[derive(Clone)]
pub struct RemoteClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("realmdeck")
            .timeout(Duration::from_secs(10))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Liveness probe against the backend root.
    pub fn ping(&self) -> Result<()> {
        let resp = self
            .client
            .get(self.url("/"))
            .send()
            .context("ping backend")?;
        let _ = self.ensure_ok(resp, "ping backend")?;
        Ok(())
    }
}
