use super::*;

/// Retry an idempotent fetch a couple of times before giving up; transient
/// blips on asset catalogs should not bubble up as errors.
pub(super) fn with_retries<T>(label: &str, mut f: impl FnMut() -> Result<T>) -> Result<T> {
    let mut delay = std::time::Duration::from_millis(150);
    for _ in 0..2 {
        if let Ok(v) = f() {
            return Ok(v);
        }
        std::thread::sleep(delay);
        delay *= 2;
    }
    f().with_context(|| format!("{} (after retries)", label))
}

impl RemoteClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            anyhow::bail!("access denied");
        }
        resp.error_for_status()
            .with_context(|| format!("{} status", label))
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
