use crate::domain::constants::{APP_DIR, AUDIT_FILE};
use std::path::{Path, PathBuf};

pub fn app_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(APP_DIR))
}

pub fn audit_path() -> anyhow::Result<PathBuf> {
    Ok(app_dir()?.join(AUDIT_FILE))
}

/// Append one JSON line per operation to the audit log. Best effort; `None`
/// disables the log.
pub fn audit(path: Option<&Path>, action: &str, data: serde_json::Value) {
    let Some(path) = path else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": unix_now(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    if let Err(err) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()))
    {
        tracing::debug!(path = %path.display(), error = %err, "audit write skipped");
    }
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
