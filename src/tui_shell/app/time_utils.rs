use super::*;

pub(in crate::tui_shell) fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

/// Short clock form for the log strip ("14:03:22").
pub(in crate::tui_shell) fn fmt_ts_ui(ts: &str) -> String {
    match OffsetDateTime::parse(ts, &Rfc3339) {
        Ok(t) => format!("{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second()),
        Err(_) => ts.to_string(),
    }
}

/// Relative form for freshness hints ("12s ago").
pub(in crate::tui_shell) fn fmt_since(ts: &str, now: OffsetDateTime) -> Option<String> {
    let t = OffsetDateTime::parse(ts, &Rfc3339).ok()?;
    let secs = (now - t).whole_seconds().max(0);
    Some(if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    })
}
